use std::{cell::RefCell, rc::Rc};

use super::*;

#[test]
fn current_defaults_to_dark() {
    assert_eq!(ThemeAttribute::default().current(), Theme::Dark);
    assert_eq!(ThemeAttribute::new(Some("light")).current(), Theme::Light);
}

#[test]
fn subscribers_see_every_change_synchronously() {
    let attr = ThemeAttribute::new(None);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let sub = attr.subscribe(Box::new(move |t| sink.borrow_mut().push(t)));

    attr.set(Some("light"));
    attr.set(Some("dark"));
    attr.set(None);

    assert_eq!(*seen.borrow(), vec![Theme::Light, Theme::Dark, Theme::Dark]);
    drop(sub);
}

#[test]
fn dropping_subscription_deregisters() {
    let attr = ThemeAttribute::default();
    let hits = Rc::new(RefCell::new(0));
    let h = Rc::clone(&hits);
    let sub = attr.subscribe(Box::new(move |_| *h.borrow_mut() += 1));
    assert_eq!(attr.subscriber_count(), 1);

    sub.unsubscribe();
    assert_eq!(attr.subscriber_count(), 0);
    attr.set(Some("light"));
    assert_eq!(*hits.borrow(), 0);
}

#[test]
fn callback_may_unsubscribe_itself() {
    let attr = ThemeAttribute::default();
    let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
    let inner = Rc::clone(&slot);
    let sub = attr.subscribe(Box::new(move |_| {
        inner.borrow_mut().take();
    }));
    *slot.borrow_mut() = Some(sub);

    attr.set(Some("light"));
    assert_eq!(attr.subscriber_count(), 0);
}

#[test]
fn subscription_outliving_attribute_is_harmless() {
    let attr = ThemeAttribute::default();
    let sub = attr.subscribe(Box::new(|_| {}));
    drop(attr);
    drop(sub);
}
