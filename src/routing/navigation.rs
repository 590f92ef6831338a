//! Navigation controller: current location, derived route and drawer state.
//!
//! ARCHITECTURE
//! ============
//! `NavigationController` is plain Rust so it can be driven by
//! `MemoryHistory` in tests. `Navigator` is the Copy handle placed in Leptos
//! context; it mirrors controller snapshots into a signal.
//!
//! The history backend's change notification is the only thing that moves
//! the location forward. `navigate` asks the backend for a change and the
//! re-parse happens when the notification arrives, which for the browser
//! backend is on a later tick.

#[cfg(test)]
#[path = "navigation_test.rs"]
mod navigation_test;

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;

use super::history::HistoryBackend;
use super::parser::{Location, Route, parse};
use crate::subscription::{Listeners, Subscription};

/// Snapshot of navigation state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavState {
    pub location: Location,
    pub route: Route,
    /// Bumped on every location change. The shell rebuilds the active screen
    /// whenever this changes.
    pub render_key: u64,
    pub drawer_open: bool,
}

impl NavState {
    #[must_use]
    pub fn new(location: Location) -> Self {
        let route = parse(&location);
        Self { location, route, render_key: 0, drawer_open: false }
    }

    fn apply_location(&mut self, location: Location) {
        self.route = parse(&location);
        self.location = location;
        self.render_key += 1;
    }
}

/// Owns navigation state and the history subscription.
///
/// Dropping the controller unsubscribes from the history backend.
pub struct NavigationController {
    history: Rc<dyn HistoryBackend>,
    state: Rc<RefCell<NavState>>,
    listeners: Listeners<NavState>,
    _history_sub: Subscription,
}

impl NavigationController {
    pub fn new(history: Rc<dyn HistoryBackend>) -> Self {
        let state = Rc::new(RefCell::new(NavState::new(history.current())));
        let listeners = Listeners::new();

        let history_sub = {
            let state = Rc::clone(&state);
            let listeners = listeners.clone();
            let weak_history = Rc::downgrade(&history);
            history.subscribe(Rc::new(move |location: &Location| {
                let snapshot = {
                    let mut s = state.borrow_mut();
                    s.apply_location(location.clone());
                    s.clone()
                };
                if let Some(history) = weak_history.upgrade() {
                    history.scroll_to_top();
                }
                log::debug!("route changed: {} -> {}", location, snapshot.route.view.tag());
                listeners.emit(&snapshot);
            }))
        };

        Self { history, state, listeners, _history_sub: history_sub }
    }

    #[must_use]
    pub fn state(&self) -> NavState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn route(&self) -> Route {
        self.state.borrow().route.clone()
    }

    /// Ask the history backend to move to `path` and close the drawer.
    pub fn navigate(&self, path: &str) {
        self.close_drawer();
        self.history.set(path);
    }

    pub fn toggle_drawer(&self) {
        let open = !self.state.borrow().drawer_open;
        self.set_drawer(open);
    }

    pub fn close_drawer(&self) {
        self.set_drawer(false);
    }

    fn set_drawer(&self, open: bool) {
        let snapshot = {
            let mut s = self.state.borrow_mut();
            if s.drawer_open == open {
                return;
            }
            s.drawer_open = open;
            s.clone()
        };
        self.listeners.emit(&snapshot);
    }

    pub fn subscribe(&self, listener: impl Fn(&NavState) + 'static) -> Subscription {
        self.listeners.subscribe(listener)
    }
}

/// Context handle for screens. Copy, so it can move into any closure.
#[derive(Clone, Copy)]
pub struct Navigator {
    state: RwSignal<NavState>,
    screen: Memo<(u64, Route)>,
    controller: StoredValue<NavigationController, LocalStorage>,
}

impl Navigator {
    /// Start a controller on `history` and tie its lifetime to the current
    /// reactive owner.
    pub fn install(history: Rc<dyn HistoryBackend>) -> Self {
        let controller = NavigationController::new(history);
        let state = RwSignal::new(controller.state());
        let mirror = controller.subscribe(move |snapshot| state.set(snapshot.clone()));

        let controller = StoredValue::new_local(controller);
        let mirror = StoredValue::new_local(mirror);
        on_cleanup(move || {
            mirror.dispose();
            controller.dispose();
        });

        let screen = Memo::new(move |_| state.with(|s| (s.render_key, s.route.clone())));

        Self { state, screen, controller }
    }

    pub fn navigate(&self, path: &str) {
        self.controller.with_value(|c| c.navigate(path));
    }

    pub fn toggle_drawer(&self) {
        self.controller.with_value(NavigationController::toggle_drawer);
    }

    pub fn close_drawer(&self) {
        self.controller.with_value(NavigationController::close_drawer);
    }

    /// `(render_key, route)`; changes only on location changes.
    #[must_use]
    pub fn screen(&self) -> Memo<(u64, Route)> {
        self.screen
    }

    #[must_use]
    pub fn drawer_open(&self) -> bool {
        self.state.with(|s| s.drawer_open)
    }
}

/// Fetch the `Navigator` provided by the app root.
pub fn use_navigator() -> Navigator {
    expect_context::<Navigator>()
}
