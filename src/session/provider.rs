//! Auth provider contract.

use std::rc::Rc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::net::error::AuthError;
use crate::net::types::Session;
use crate::subscription::Subscription;

/// Tag carried by a provider-pushed session notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthEvent {
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
    PasswordRecovery,
}

/// A pushed notification: the event plus the provider's new session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionChange {
    pub event: AuthEvent,
    pub session: Option<Session>,
}

/// Source of the authenticated session.
#[async_trait(?Send)]
pub trait AuthProvider {
    /// Ask for the current session. `Ok(None)` means signed out.
    async fn current_session(&self) -> Result<Option<Session>, AuthError>;

    /// Exchange `session`'s refresh token for new tokens. The outcome is
    /// also pushed to change listeners: `TokenRefreshed` with the new
    /// session, or `SignedOut` when the refresh token was refused.
    /// `Ok(None)` means the refresh was refused.
    async fn refresh_session(&self, session: &Session) -> Result<Option<Session>, AuthError>;

    /// Register for pushed session changes until the handle is dropped.
    fn on_session_change(&self, listener: Rc<dyn Fn(&SessionChange)>) -> Subscription;
}
