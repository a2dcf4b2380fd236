use std::{
    cell::RefCell,
    collections::BTreeMap,
    rc::{Rc, Weak},
};

use super::palette::Theme;

/// Where the display reads its theme from and how it learns about changes.
pub trait ThemeSource {
    /// Theme in effect right now.
    fn current(&self) -> Theme;

    /// Register `callback`, invoked synchronously on every change. The
    /// returned [`Subscription`] deregisters when dropped.
    fn subscribe(&self, callback: Box<dyn FnMut(Theme)>) -> Subscription;
}

/// RAII handle for a [`ThemeSource`] registration.
#[must_use = "dropping a Subscription immediately unsubscribes"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn unsubscribe(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

type Callback = Rc<RefCell<Box<dyn FnMut(Theme)>>>;

#[derive(Default)]
struct AttributeState {
    value: Option<String>,
    next_id: u64,
    subscribers: BTreeMap<u64, Callback>,
}

/// Shared, observable theme attribute (the document-level `data-theme` flag).
///
/// Cloning yields another handle to the same attribute. Every `set` notifies
/// subscribers, mirroring an attribute mutation observer.
#[derive(Clone, Default)]
pub struct ThemeAttribute {
    inner: Rc<RefCell<AttributeState>>,
}

impl ThemeAttribute {
    pub fn new(value: Option<&str>) -> Self {
        let attr = Self::default();
        attr.inner.borrow_mut().value = value.map(str::to_owned);
        attr
    }

    pub fn value(&self) -> Option<String> {
        self.inner.borrow().value.clone()
    }

    pub fn set(&self, value: Option<&str>) {
        let (theme, subscribers) = {
            let mut state = self.inner.borrow_mut();
            state.value = value.map(str::to_owned);
            let theme = Theme::from_attribute(state.value.as_deref());
            let subs: Vec<Callback> = state.subscribers.values().cloned().collect();
            (theme, subs)
        };

        tracing::debug!(%theme, subscribers = subscribers.len(), "theme attribute changed");
        for cb in subscribers {
            // A callback that mutates the attribute re-enters here; skip it
            // instead of aliasing its borrow.
            if let Ok(mut f) = cb.try_borrow_mut() {
                (*f)(theme);
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

impl ThemeSource for ThemeAttribute {
    fn current(&self) -> Theme {
        Theme::from_attribute(self.inner.borrow().value.as_deref())
    }

    fn subscribe(&self, callback: Box<dyn FnMut(Theme)>) -> Subscription {
        let id = {
            let mut state = self.inner.borrow_mut();
            let id = state.next_id;
            state.next_id += 1;
            state
                .subscribers
                .insert(id, Rc::new(RefCell::new(callback)));
            id
        };

        let weak: Weak<RefCell<AttributeState>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().subscribers.remove(&id);
            }
        })
    }
}

impl std::fmt::Debug for ThemeAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("ThemeAttribute")
            .field("value", &state.value)
            .field("subscribers", &state.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/theme/source.rs"]
mod tests;
