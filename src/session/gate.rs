//! Session gate state machine.
//!
//! States: `Resolving` (initial) → `Authenticated` | `Unauthenticated`, and
//! back and forth on every provider notification afterwards.
//!
//! The cached session is only ever `None` or the latest value the provider
//! reported. Once any change notification has been applied, a late initial
//! fetch result is stale and ignored.

#[cfg(test)]
#[path = "gate_test.rs"]
mod gate_test;

use super::provider::{AuthEvent, SessionChange};
use crate::net::error::AuthError;
use crate::net::types::Session;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum GateState {
    #[default]
    Resolving,
    Authenticated(Session),
    Unauthenticated,
}

impl GateState {
    fn from_session(session: Option<Session>) -> Self {
        session.map_or(GateState::Unauthenticated, GateState::Authenticated)
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        match self {
            GateState::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    /// What the root renders for this state.
    #[must_use]
    pub fn view(&self) -> GateView {
        match self {
            GateState::Resolving => GateView::Loading,
            GateState::Authenticated(_) => GateView::Shell,
            GateState::Unauthenticated => GateView::Auth,
        }
    }
}

/// Rendering contract of the gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateView {
    Loading,
    Auth,
    Shell,
}

#[derive(Clone, Debug)]
pub enum GateEvent {
    /// Result of the one-shot start-up session fetch.
    Initial(Result<Option<Session>, AuthError>),
    /// Provider-pushed notification.
    Changed(SessionChange),
}

/// Side effect the owner of the gate must perform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateEffect {
    None,
    NavigateHome,
    LogResolveFailure(String),
}

#[derive(Clone, Debug, Default)]
pub struct SessionGate {
    state: GateState,
    saw_change: bool,
}

impl SessionGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &GateState {
        &self.state
    }

    pub fn apply(&mut self, event: GateEvent) -> GateEffect {
        match event {
            GateEvent::Initial(result) => {
                if self.saw_change {
                    return GateEffect::None;
                }
                match result {
                    Ok(session) => {
                        self.state = GateState::from_session(session);
                        GateEffect::None
                    }
                    Err(e) => {
                        self.state = GateState::Unauthenticated;
                        GateEffect::LogResolveFailure(e.to_string())
                    }
                }
            }
            GateEvent::Changed(change) => {
                self.saw_change = true;
                self.state = GateState::from_session(change.session);
                if change.event == AuthEvent::SignedIn {
                    GateEffect::NavigateHome
                } else {
                    GateEffect::None
                }
            }
        }
    }
}
