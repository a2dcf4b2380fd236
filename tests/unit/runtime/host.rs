use std::{cell::Cell, rc::Rc};

use super::*;

fn counter() -> (Rc<Cell<u32>>, impl FnMut() + 'static) {
    let hits = Rc::new(Cell::new(0));
    let h = Rc::clone(&hits);
    (hits, move || h.set(h.get() + 1))
}

#[test]
fn timeout_fires_once_when_due() {
    let host = Host::new(Viewport::new(10, 10));
    let (hits, cb) = counter();
    host.set_timeout(1000.0, cb);

    host.advance(999.0);
    assert_eq!(hits.get(), 0);
    host.advance(1.0);
    assert_eq!(hits.get(), 1);
    host.advance(5000.0);
    assert_eq!(hits.get(), 1);
    assert_eq!(host.active_timers(), 0);
}

#[test]
fn interval_rearms_until_cleared() {
    let host = Host::new(Viewport::new(10, 10));
    let (hits, cb) = counter();
    let handle = host.set_interval(5000.0, cb);

    host.advance(12_000.0);
    assert_eq!(hits.get(), 2);
    host.advance(3_000.0);
    assert_eq!(hits.get(), 3);
    host.clear_timer(handle);
    host.advance(20_000.0);
    assert_eq!(hits.get(), 3);
    assert_eq!(host.active_timers(), 0);
}

#[test]
fn timers_fire_in_due_order_and_see_their_due_time() {
    let host = Host::new(Viewport::new(10, 10));
    let log = Rc::new(RefCell::new(Vec::new()));
    for (delay, name) in [(300.0, "c"), (100.0, "a"), (200.0, "b")] {
        let log = Rc::clone(&log);
        let h = host.clone();
        host.set_timeout(delay, move || log.borrow_mut().push((name, h.now_ms())));
    }
    host.advance(1000.0);
    assert_eq!(*log.borrow(), vec![("a", 100.0), ("b", 200.0), ("c", 300.0)]);
    assert_eq!(host.now_ms(), 1000.0);
}

#[test]
fn timer_may_arm_another_timer() {
    let host = Host::new(Viewport::new(10, 10));
    let (hits, cb) = counter();
    let cb = Rc::new(RefCell::new(cb));
    let h = host.clone();
    host.set_timeout(1000.0, move || {
        let cb = Rc::clone(&cb);
        h.set_interval(5000.0, move || (*cb.borrow_mut())());
    });

    host.advance(1000.0);
    assert_eq!(host.active_timers(), 1);
    host.advance(10_000.0);
    assert_eq!(hits.get(), 2);
}

#[test]
fn frames_are_one_shot_and_rerequests_wait() {
    let host = Host::new(Viewport::new(10, 10));
    let seen = Rc::new(Cell::new(0.0));
    let s = Rc::clone(&seen);
    let h = host.clone();
    host.request_animation_frame(move |now| {
        s.set(now);
        h.request_animation_frame(|_| {});
    });

    host.advance(16.0);
    assert_eq!(host.run_animation_frame(), 1);
    assert_eq!(seen.get(), 16.0);
    assert_eq!(host.pending_frames(), 1);
    assert_eq!(host.step(16.0), 1);
    assert_eq!(host.pending_frames(), 0);
}

#[test]
fn cancelled_frame_never_runs() {
    let host = Host::new(Viewport::new(10, 10));
    let ran = Rc::new(Cell::new(false));
    let r = Rc::clone(&ran);
    let handle = host.request_animation_frame(move |_| r.set(true));
    host.cancel_animation_frame(handle);
    assert_eq!(host.run_animation_frame(), 0);
    assert!(!ran.get());
}

#[test]
fn resize_reaches_listeners_until_removed() {
    let host = Host::new(Viewport::new(1920, 1080));
    let seen = Rc::new(Cell::new(Viewport::default()));
    let s = Rc::clone(&seen);
    let handle = host.add_resize_listener(move |vp| s.set(vp));

    host.resize(800, 600);
    assert_eq!(seen.get(), Viewport::new(800, 600));
    assert_eq!(host.viewport(), Viewport::new(800, 600));

    host.remove_resize_listener(handle);
    host.resize(100, 100);
    assert_eq!(seen.get(), Viewport::new(800, 600));
    assert_eq!(host.resize_listeners(), 0);
}

#[test]
fn visibility_listeners_hear_changes_only() {
    let host = Host::new(Viewport::new(10, 10));
    let (hits, mut cb) = counter();
    host.add_visibility_listener(move |_| cb());

    host.set_hidden(false);
    assert_eq!(hits.get(), 0);
    host.set_hidden(true);
    host.set_hidden(true);
    assert!(host.is_hidden());
    assert_eq!(hits.get(), 1);
    host.set_hidden(false);
    assert_eq!(hits.get(), 2);
}

#[test]
fn theme_attribute_is_shared() {
    use crate::theme::{palette::Theme, source::ThemeSource};

    let host = Host::new(Viewport::new(10, 10)).with_theme_attribute(Some("light"));
    assert_eq!(host.theme_attribute().current(), Theme::Light);
    host.theme_attribute().set(None);
    assert_eq!(host.clone().theme_attribute().current(), Theme::Dark);
}
