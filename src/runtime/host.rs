use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

use crate::{foundation::core::Viewport, theme::source::ThemeAttribute};

/// Pending animation-frame request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

/// Armed timeout or interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// Registered resize or visibility listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerHandle(u64);

type FrameCallback = Box<dyn FnOnce(f64)>;
type TimerCallback = Rc<RefCell<Box<dyn FnMut()>>>;
type ResizeListener = Rc<RefCell<Box<dyn FnMut(Viewport)>>>;
type VisibilityListener = Rc<RefCell<Box<dyn FnMut(bool)>>>;

/// Shortest interval period; a zero period would never let the clock move.
const MIN_INTERVAL_MS: f64 = 1.0;

struct Timer {
    due_ms: f64,
    every_ms: Option<f64>,
    callback: TimerCallback,
}

struct HostState {
    now_ms: f64,
    next_id: u64,
    viewport: Viewport,
    hidden: bool,
    frames: BTreeMap<u64, FrameCallback>,
    timers: BTreeMap<u64, Timer>,
    resize: BTreeMap<u64, ResizeListener>,
    visibility: BTreeMap<u64, VisibilityListener>,
    theme: ThemeAttribute,
}

impl HostState {
    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Single-threaded host environment with a virtual clock.
///
/// Stands in for the browser window: animation frames, timers, resize and
/// visibility events, and the document theme attribute. Time only moves
/// through [`Host::advance`] and [`Host::step`]. Cloning yields another
/// handle to the same host.
///
/// Callbacks run with no internal borrow held, so they may freely call back
/// into the host.
#[derive(Clone)]
pub struct Host {
    inner: Rc<RefCell<HostState>>,
}

impl Host {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            inner: Rc::new(RefCell::new(HostState {
                now_ms: 0.0,
                next_id: 1,
                viewport,
                hidden: false,
                frames: BTreeMap::new(),
                timers: BTreeMap::new(),
                resize: BTreeMap::new(),
                visibility: BTreeMap::new(),
                theme: ThemeAttribute::default(),
            })),
        }
    }

    /// Start with the theme attribute set to `theme`.
    pub fn with_theme_attribute(self, theme: Option<&str>) -> Self {
        self.theme_attribute().set(theme);
        self
    }

    pub fn now_ms(&self) -> f64 {
        self.inner.borrow().now_ms
    }

    // Animation frames

    pub fn request_animation_frame(&self, callback: impl FnOnce(f64) + 'static) -> FrameHandle {
        let mut state = self.inner.borrow_mut();
        let id = state.next_id();
        state.frames.insert(id, Box::new(callback));
        FrameHandle(id)
    }

    pub fn cancel_animation_frame(&self, handle: FrameHandle) {
        self.inner.borrow_mut().frames.remove(&handle.0);
    }

    /// Deliver every pending frame callback with the current time. Frames
    /// requested from inside a callback wait for the next delivery.
    pub fn run_animation_frame(&self) -> usize {
        let (now, frames) = {
            let mut state = self.inner.borrow_mut();
            (state.now_ms, std::mem::take(&mut state.frames))
        };
        let delivered = frames.len();
        for (_, callback) in frames {
            callback(now);
        }
        delivered
    }

    // Timers

    pub fn set_timeout(&self, delay_ms: f64, callback: impl FnMut() + 'static) -> TimerHandle {
        self.arm(delay_ms.max(0.0), None, Box::new(callback))
    }

    pub fn set_interval(&self, every_ms: f64, callback: impl FnMut() + 'static) -> TimerHandle {
        let every = every_ms.max(MIN_INTERVAL_MS);
        self.arm(every, Some(every), Box::new(callback))
    }

    fn arm(&self, delay_ms: f64, every_ms: Option<f64>, callback: Box<dyn FnMut()>) -> TimerHandle {
        let mut state = self.inner.borrow_mut();
        let id = state.next_id();
        let due_ms = state.now_ms + delay_ms;
        state.timers.insert(
            id,
            Timer {
                due_ms,
                every_ms,
                callback: Rc::new(RefCell::new(callback)),
            },
        );
        TimerHandle(id)
    }

    pub fn clear_timer(&self, handle: TimerHandle) {
        self.inner.borrow_mut().timers.remove(&handle.0);
    }

    /// Move the clock forward by `ms`, firing every timer that falls due,
    /// earliest first. Intervals re-arm relative to their due time.
    pub fn advance(&self, ms: f64) {
        let target = self.now_ms() + ms.max(0.0);
        while let Some(callback) = self.pop_due_timer(target) {
            if let Ok(mut f) = callback.try_borrow_mut() {
                (*f)();
            }
        }
        self.inner.borrow_mut().now_ms = target;
    }

    fn pop_due_timer(&self, target: f64) -> Option<TimerCallback> {
        let mut state = self.inner.borrow_mut();
        let (id, due_ms) = state
            .timers
            .iter()
            .filter(|(_, t)| t.due_ms <= target)
            .min_by(|(ia, a), (ib, b)| a.due_ms.total_cmp(&b.due_ms).then(ia.cmp(ib)))
            .map(|(id, t)| (*id, t.due_ms))?;

        state.now_ms = state.now_ms.max(due_ms);
        let timer = state.timers.get_mut(&id)?;
        let callback = Rc::clone(&timer.callback);
        if let Some(every) = timer.every_ms {
            timer.due_ms += every;
        } else {
            state.timers.remove(&id);
        }
        Some(callback)
    }

    /// Advance the clock, then deliver one animation frame.
    pub fn step(&self, ms: f64) -> usize {
        self.advance(ms);
        self.run_animation_frame()
    }

    // Viewport

    pub fn viewport(&self) -> Viewport {
        self.inner.borrow().viewport
    }

    /// Change the viewport and notify every resize listener.
    pub fn resize(&self, width: u32, height: u32) {
        let (viewport, listeners) = {
            let mut state = self.inner.borrow_mut();
            state.viewport = Viewport::new(width, height);
            let listeners: Vec<ResizeListener> = state.resize.values().cloned().collect();
            (state.viewport, listeners)
        };
        tracing::trace!(width, height, listeners = listeners.len(), "host resized");
        for listener in listeners {
            if let Ok(mut f) = listener.try_borrow_mut() {
                (*f)(viewport);
            }
        }
    }

    pub fn add_resize_listener(&self, listener: impl FnMut(Viewport) + 'static) -> ListenerHandle {
        let mut state = self.inner.borrow_mut();
        let id = state.next_id();
        state.resize.insert(id, Rc::new(RefCell::new(Box::new(listener))));
        ListenerHandle(id)
    }

    pub fn remove_resize_listener(&self, handle: ListenerHandle) {
        self.inner.borrow_mut().resize.remove(&handle.0);
    }

    // Visibility

    pub fn is_hidden(&self) -> bool {
        self.inner.borrow().hidden
    }

    /// Change page visibility. Listeners only hear about actual changes.
    pub fn set_hidden(&self, hidden: bool) {
        let listeners = {
            let mut state = self.inner.borrow_mut();
            if state.hidden == hidden {
                return;
            }
            state.hidden = hidden;
            state.visibility.values().cloned().collect::<Vec<VisibilityListener>>()
        };
        for listener in listeners {
            if let Ok(mut f) = listener.try_borrow_mut() {
                (*f)(hidden);
            }
        }
    }

    pub fn add_visibility_listener(&self, listener: impl FnMut(bool) + 'static) -> ListenerHandle {
        let mut state = self.inner.borrow_mut();
        let id = state.next_id();
        state
            .visibility
            .insert(id, Rc::new(RefCell::new(Box::new(listener))));
        ListenerHandle(id)
    }

    pub fn remove_visibility_listener(&self, handle: ListenerHandle) {
        self.inner.borrow_mut().visibility.remove(&handle.0);
    }

    // Theme

    /// The document-level theme attribute.
    pub fn theme_attribute(&self) -> ThemeAttribute {
        self.inner.borrow().theme.clone()
    }

    // Leak accounting

    pub fn pending_frames(&self) -> usize {
        self.inner.borrow().frames.len()
    }

    pub fn active_timers(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    pub fn resize_listeners(&self) -> usize {
        self.inner.borrow().resize.len()
    }

    pub fn visibility_listeners(&self) -> usize {
        self.inner.borrow().visibility.len()
    }

    pub fn theme_watchers(&self) -> usize {
        self.theme_attribute().subscriber_count()
    }
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("Host")
            .field("now_ms", &state.now_ms)
            .field("viewport", &state.viewport)
            .field("hidden", &state.hidden)
            .field("frames", &state.frames.len())
            .field("timers", &state.timers.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/host.rs"]
mod tests;
