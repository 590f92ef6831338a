//! History backends that own the browser-visible location.
//!
//! SYSTEM CONTEXT
//! ==============
//! `HashHistory` is the browser implementation (`location.hash` +
//! `hashchange`). `MemoryHistory` stands in for it in tests and non-browser
//! builds; it notifies synchronously from `set`.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::parser::Location;
use crate::subscription::{Listeners, Subscription};

/// Source of truth for the current location and its change notifications.
pub trait HistoryBackend {
    fn current(&self) -> Location;

    /// Request a location change. Subscribers are notified by the backend,
    /// possibly asynchronously.
    fn set(&self, path: &str);

    fn subscribe(&self, listener: Rc<dyn Fn(&Location)>) -> Subscription;

    fn scroll_to_top(&self);
}

/// In-process history.
pub struct MemoryHistory {
    location: RefCell<Location>,
    listeners: Listeners<Location>,
    scroll_resets: Cell<u32>,
}

impl MemoryHistory {
    #[must_use]
    pub fn new(initial: &str) -> Self {
        Self {
            location: RefCell::new(Location::new(initial)),
            listeners: Listeners::new(),
            scroll_resets: Cell::new(0),
        }
    }

    /// Simulate a back/forward step that did not go through `set`.
    pub fn external_change(&self, path: &str) {
        self.set(path);
    }

    #[must_use]
    pub fn scroll_resets(&self) -> u32 {
        self.scroll_resets.get()
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }
}

impl HistoryBackend for MemoryHistory {
    fn current(&self) -> Location {
        self.location.borrow().clone()
    }

    fn set(&self, path: &str) {
        let next = Location::new(path);
        if *self.location.borrow() == next {
            // Browsers fire no `hashchange` for an unchanged hash.
            return;
        }
        *self.location.borrow_mut() = next.clone();
        self.listeners.emit(&next);
    }

    fn subscribe(&self, listener: Rc<dyn Fn(&Location)>) -> Subscription {
        self.listeners.subscribe(move |loc| listener(loc))
    }

    fn scroll_to_top(&self) {
        self.scroll_resets.set(self.scroll_resets.get() + 1);
    }
}

/// Browser history backed by `window.location.hash`.
#[cfg(feature = "csr")]
#[derive(Default)]
pub struct HashHistory;

#[cfg(feature = "csr")]
impl HashHistory {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "csr")]
impl HistoryBackend for HashHistory {
    fn current(&self) -> Location {
        let hash = web_sys::window()
            .and_then(|w| w.location().hash().ok())
            .unwrap_or_default();
        Location::from_hash(&hash)
    }

    fn set(&self, path: &str) {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_hash(path) {
                log::warn!("failed to set location hash {path:?}: {e:?}");
            }
        }
    }

    fn subscribe(&self, listener: Rc<dyn Fn(&Location)>) -> Subscription {
        use wasm_bindgen::JsCast;
        use wasm_bindgen::closure::Closure;

        let Some(window) = web_sys::window() else {
            return Subscription::noop();
        };

        let handler = Closure::<dyn Fn(web_sys::HashChangeEvent)>::new(move |_: web_sys::HashChangeEvent| {
            let hash = web_sys::window()
                .and_then(|w| w.location().hash().ok())
                .unwrap_or_default();
            listener(&Location::from_hash(&hash));
        });

        if let Err(e) = window.add_event_listener_with_callback("hashchange", handler.as_ref().unchecked_ref()) {
            log::warn!("failed to subscribe to hashchange: {e:?}");
            return Subscription::noop();
        }

        Subscription::new(move || {
            if let Some(window) = web_sys::window() {
                let _ = window.remove_event_listener_with_callback("hashchange", handler.as_ref().unchecked_ref());
            }
            drop(handler);
        })
    }

    fn scroll_to_top(&self) {
        if let Some(window) = web_sys::window() {
            window.scroll_to_with_x_and_y(0.0, 0.0);
        }
    }
}
