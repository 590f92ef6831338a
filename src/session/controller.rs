//! Connects an `AuthProvider` to the session gate.
//!
//! SYSTEM CONTEXT
//! ==============
//! The controller subscribes to provider changes as soon as it is built,
//! fetches the current session once (`resolve_initial`), and re-publishes
//! the gate state to its own listeners. `shutdown` drops the provider
//! subscription; nothing is delivered afterwards, including a still-pending
//! initial fetch.
//!
//! No timeout is applied to the initial fetch: a provider that never answers
//! leaves the gate in `Resolving`.
//!
//! While a session with an expiry is cached, the browser build keeps a
//! timer that refreshes it `SESSION_EXPIRY_LEEWAY_SECS` before it lapses.
//! The provider publishes the refreshed session like any other change, which
//! re-arms the timer for the new expiry.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;

use super::gate::{GateEffect, GateEvent, GateState, SessionGate};
use super::provider::{AuthProvider, SessionChange};
use crate::net::types::Session;
use crate::routing::navigation::Navigator;
use crate::subscription::{Listeners, Subscription};

/// Path opened after every sign-in.
pub const SIGNED_IN_PATH: &str = "/home";

/// Pause before retrying a refresh that failed without the token being
/// refused (offline, server error).
pub const REFRESH_RETRY_SECS: u64 = 30;

/// Result of one refresh attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Refreshed, refused (now signed out), or nothing to refresh.
    Done,
    /// The provider could not be reached; the cached session is unchanged.
    Retry,
}

/// Browser timers take a signed 32-bit millisecond delay.
#[cfg(any(test, feature = "csr"))]
fn timer_delay_ms(secs: i64) -> u32 {
    let ms = secs.max(0).saturating_mul(1000).min(i64::from(i32::MAX));
    u32::try_from(ms).unwrap_or(0)
}

struct Inner {
    gate: RefCell<SessionGate>,
    listeners: Listeners<GateState>,
    provider: Rc<dyn AuthProvider>,
    on_signed_in: Box<dyn Fn()>,
    change_sub: RefCell<Option<Subscription>>,
    closed: Cell<bool>,
}

impl Inner {
    fn apply(&self, event: GateEvent) {
        if self.closed.get() {
            return;
        }
        let (effect, snapshot) = {
            let mut gate = self.gate.borrow_mut();
            let effect = gate.apply(event);
            (effect, gate.state().clone())
        };
        if let GateEffect::LogResolveFailure(reason) = &effect {
            log::warn!("session resolution failed, continuing signed out: {reason}");
        }
        self.listeners.emit(&snapshot);
        if effect == GateEffect::NavigateHome {
            (self.on_signed_in)();
        }
    }
}

#[derive(Clone)]
pub struct SessionController {
    inner: Rc<Inner>,
}

impl SessionController {
    pub fn new(provider: Rc<dyn AuthProvider>, on_signed_in: impl Fn() + 'static) -> Self {
        let inner = Rc::new(Inner {
            gate: RefCell::new(SessionGate::new()),
            listeners: Listeners::new(),
            provider: Rc::clone(&provider),
            on_signed_in: Box::new(on_signed_in),
            change_sub: RefCell::new(None),
            closed: Cell::new(false),
        });

        let weak = Rc::downgrade(&inner);
        let sub = provider.on_session_change(Rc::new(move |change: &SessionChange| {
            if let Some(inner) = weak.upgrade() {
                inner.apply(GateEvent::Changed(change.clone()));
            }
        }));
        *inner.change_sub.borrow_mut() = Some(sub);

        Self { inner }
    }

    /// Fetch the current session once and apply the result.
    pub async fn resolve_initial(&self) {
        let result = self.inner.provider.current_session().await;
        self.inner.apply(GateEvent::Initial(result));
    }

    /// Exchange the cached session's tokens for fresh ones.
    pub async fn refresh(&self) -> RefreshOutcome {
        if self.inner.closed.get() {
            return RefreshOutcome::Done;
        }
        let Some(session) = self.inner.gate.borrow().state().session().cloned() else {
            return RefreshOutcome::Done;
        };
        match self.inner.provider.refresh_session(&session).await {
            Ok(_) => RefreshOutcome::Done,
            Err(e) => {
                log::warn!("session refresh failed: {e}");
                RefreshOutcome::Retry
            }
        }
    }

    /// Seconds until the cached session is due for a refresh.
    #[must_use]
    pub fn refresh_due_in(&self, now_secs: i64) -> Option<i64> {
        self.inner.gate.borrow().state().session().and_then(|s| s.refresh_in_secs(now_secs))
    }

    #[must_use]
    pub fn state(&self) -> GateState {
        self.inner.gate.borrow().state().clone()
    }

    pub fn subscribe(&self, listener: impl Fn(&GateState) + 'static) -> Subscription {
        self.inner.listeners.subscribe(listener)
    }

    /// Stop following the provider. Idempotent.
    pub fn shutdown(&self) {
        self.inner.closed.set(true);
        self.inner.change_sub.borrow_mut().take();
    }
}

/// Re-arm a refresh timer on every gate change; dropping the handle
/// cancels the pending timer.
#[cfg(feature = "csr")]
fn keep_fresh(controller: &SessionController) -> Subscription {
    use std::time::Duration;

    use gloo_timers::callback::Timeout;

    let pending: Rc<RefCell<Option<Timeout>>> = Rc::default();
    let weak = Rc::downgrade(&controller.inner);
    controller.subscribe(move |_| {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        let due = SessionController { inner }.refresh_due_in(crate::util::clock::now_secs());
        let timer = due.map(|secs| {
            let weak = weak.clone();
            Timeout::new(timer_delay_ms(secs), move || {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                let controller = SessionController { inner };
                leptos::task::spawn_local(async move {
                    while controller.refresh().await == RefreshOutcome::Retry {
                        gloo_timers::future::sleep(Duration::from_secs(REFRESH_RETRY_SECS)).await;
                    }
                });
            })
        });
        *pending.borrow_mut() = timer;
    })
}

/// Context handle exposing the gate state to the UI.
#[derive(Clone, Copy)]
pub struct SessionHandle {
    state: RwSignal<GateState>,
    controller: StoredValue<SessionController, LocalStorage>,
}

impl SessionHandle {
    /// Start a controller on `provider`, kick off the initial fetch, and tie
    /// the subscription to the current reactive owner.
    pub fn install(provider: Rc<dyn AuthProvider>, navigator: Navigator) -> Self {
        let controller = SessionController::new(provider, move || navigator.navigate(SIGNED_IN_PATH));
        let state = RwSignal::new(controller.state());
        let mirror = controller.subscribe(move |s| state.set(s.clone()));
        #[cfg(feature = "csr")]
        let refresher = StoredValue::new_local(keep_fresh(&controller));

        leptos::task::spawn_local({
            let controller = controller.clone();
            async move { controller.resolve_initial().await }
        });

        let controller = StoredValue::new_local(controller);
        let mirror = StoredValue::new_local(mirror);
        on_cleanup(move || {
            controller.with_value(SessionController::shutdown);
            #[cfg(feature = "csr")]
            refresher.dispose();
            mirror.dispose();
            controller.dispose();
        });

        Self { state, controller }
    }

    /// Refresh the tokens now, e.g. after the backend rejected them.
    pub fn refresh_now(&self) {
        let Some(controller) = self.controller.try_get_value() else {
            return;
        };
        leptos::task::spawn_local(async move {
            controller.refresh().await;
        });
    }

    #[must_use]
    pub fn state(&self) -> GateState {
        self.state.get()
    }

    /// Current session, tracked.
    #[must_use]
    pub fn session(&self) -> Option<Session> {
        self.state.with(|s| s.session().cloned())
    }

    /// Current session without subscribing the caller.
    #[must_use]
    pub fn session_untracked(&self) -> Option<Session> {
        self.state.with_untracked(|s| s.session().cloned())
    }
}

pub fn use_session() -> SessionHandle {
    expect_context::<SessionHandle>()
}
