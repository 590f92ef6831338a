//! Email + password auth against the backend auth service.
//!
//! SYSTEM CONTEXT
//! ==============
//! Implements `AuthProvider` for the session gate. The session is persisted
//! in `localStorage` and re-validated on start-up; every sign-in, sign-out,
//! refresh and profile update is pushed to change listeners. Refreshes
//! while the app runs are scheduled by the session controller.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::rc::Rc;

use async_trait::async_trait;
use serde_json::json;

use super::error::{AuthError, BackendError};
use super::supabase::{ApiCall, HttpMethod, SupabaseClient, auth_url};
use super::types::{Session, TokenResponse, User};
use crate::session::provider::{AuthEvent, AuthProvider, SessionChange};
use crate::subscription::{Listeners, Subscription};
use crate::util::{clock, persistence};

/// Result of a sign-up request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignUpOutcome {
    /// The account is active and signed in.
    SignedIn(Session),
    /// The backend sent a confirmation email; no session yet.
    ConfirmationRequired,
}

pub struct SupabaseAuth {
    client: SupabaseClient,
    listeners: Listeners<SessionChange>,
}

impl SupabaseAuth {
    #[must_use]
    pub fn new(client: SupabaseClient) -> Self {
        Self { client, listeners: Listeners::new() }
    }

    /// # Errors
    ///
    /// Returns `InvalidCredentials` for a rejected email/password pair, or the
    /// underlying backend error.
    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let base = &self.client.config()?.supabase_url;
        let call = ApiCall::new(HttpMethod::Post, auth_url(base, "token"), "sign in")
            .query(vec![("grant_type".to_owned(), "password".to_owned())])
            .json(json!({ "email": email, "password": password }));
        let token: TokenResponse = self.client.send(call).await.map_err(classify_sign_in_error)?;
        let session = token.into_session(clock::now_secs());
        self.store_and_publish(AuthEvent::SignedIn, &session);
        Ok(session)
    }

    /// # Errors
    ///
    /// Returns the backend's rejection message or the underlying error.
    pub async fn sign_up(&self, email: &str, password: &str, full_name: &str) -> Result<SignUpOutcome, AuthError> {
        let base = &self.client.config()?.supabase_url;
        let call = ApiCall::new(HttpMethod::Post, auth_url(base, "signup"), "sign up").json(json!({
            "email": email,
            "password": password,
            "data": { "full_name": full_name },
        }));
        let body: serde_json::Value = self.client.send(call).await.map_err(classify_rejection)?;
        let outcome = interpret_sign_up(body, clock::now_secs())?;
        if let SignUpOutcome::SignedIn(session) = &outcome {
            self.store_and_publish(AuthEvent::SignedIn, session);
        }
        Ok(outcome)
    }

    /// Revoke the session server-side (best effort) and forget it locally.
    pub async fn sign_out(&self, session: Option<&Session>) {
        if let (Some(session), Ok(config)) = (session, self.client.config()) {
            let call = ApiCall::new(HttpMethod::Post, auth_url(&config.supabase_url, "logout"), "sign out")
                .token(Some(&session.access_token));
            if let Err(e) = self.client.send::<()>(call).await {
                log::warn!("server-side sign out failed: {e}");
            }
        }
        persistence::remove(persistence::SESSION_KEY);
        self.publish(AuthEvent::SignedOut, None);
    }

    /// Set the `full_name` metadata on the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns the underlying backend error.
    pub async fn update_display_name(&self, session: &Session, full_name: &str) -> Result<Session, AuthError> {
        let base = &self.client.config()?.supabase_url;
        let call = ApiCall::new(HttpMethod::Put, auth_url(base, "user"), "update user")
            .token(Some(&session.access_token))
            .json(json!({ "data": { "full_name": full_name } }));
        let user: User = self.client.send(call).await?;
        let updated = Session { user, ..session.clone() };
        self.store_and_publish(AuthEvent::UserUpdated, &updated);
        Ok(updated)
    }

    async fn refresh(&self, session: &Session) -> Result<Session, BackendError> {
        let base = &self.client.config()?.supabase_url;
        let call = ApiCall::new(HttpMethod::Post, auth_url(base, "token"), "refresh session")
            .query(vec![("grant_type".to_owned(), "refresh_token".to_owned())])
            .json(json!({ "refresh_token": session.refresh_token }));
        let token: TokenResponse = self.client.send(call).await?;
        Ok(token.into_session(clock::now_secs()))
    }

    async fn fetch_user(&self, access_token: &str) -> Result<User, BackendError> {
        let base = &self.client.config()?.supabase_url;
        let call = ApiCall::new(HttpMethod::Get, auth_url(base, "user"), "load user").token(Some(access_token));
        self.client.send(call).await
    }

    fn store_and_publish(&self, event: AuthEvent, session: &Session) {
        persistence::save_json(persistence::SESSION_KEY, session);
        self.publish(event, Some(session.clone()));
    }

    fn publish(&self, event: AuthEvent, session: Option<Session>) {
        self.listeners.emit(&SessionChange { event, session });
    }

}

fn forget_stored_session() {
    persistence::remove(persistence::SESSION_KEY);
}

#[async_trait(?Send)]
impl AuthProvider for SupabaseAuth {
    async fn current_session(&self) -> Result<Option<Session>, AuthError> {
        self.client.config()?;
        let Some(stored) = persistence::load_json::<Session>(persistence::SESSION_KEY) else {
            return Ok(None);
        };

        let session = if stored.is_expired(clock::now_secs()) {
            match self.refresh(&stored).await {
                Ok(fresh) => fresh,
                Err(e) if is_session_rejection(&e) => {
                    log::info!("stored session could not be refreshed: {e}");
                    forget_stored_session();
                    return Ok(None);
                }
                Err(e) => return Err(e.into()),
            }
        } else {
            stored
        };

        match self.fetch_user(&session.access_token).await {
            Ok(user) => {
                let session = Session { user, ..session };
                persistence::save_json(persistence::SESSION_KEY, &session);
                Ok(Some(session))
            }
            Err(e) if is_session_rejection(&e) => {
                forget_stored_session();
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn refresh_session(&self, session: &Session) -> Result<Option<Session>, AuthError> {
        match self.refresh(session).await {
            Ok(fresh) => {
                self.store_and_publish(AuthEvent::TokenRefreshed, &fresh);
                Ok(Some(fresh))
            }
            Err(e) if is_session_rejection(&e) => {
                log::info!("refresh token refused, signing out: {e}");
                forget_stored_session();
                self.publish(AuthEvent::SignedOut, None);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn on_session_change(&self, listener: Rc<dyn Fn(&SessionChange)>) -> Subscription {
        self.listeners.subscribe(move |change| listener(change))
    }
}

/// Whether the backend refused the stored tokens, as opposed to being
/// unreachable.
fn is_session_rejection(error: &BackendError) -> bool {
    matches!(error.status(), Some(400 | 401 | 403))
}

fn classify_sign_in_error(error: BackendError) -> AuthError {
    match error.status() {
        Some(400) => AuthError::InvalidCredentials,
        _ => classify_rejection(error),
    }
}

fn classify_rejection(error: BackendError) -> AuthError {
    match error {
        BackendError::Status { status: 400 | 422, message, .. } => AuthError::Rejected(message),
        other => AuthError::Backend(other),
    }
}

/// Sign-up answers with a token grant when the account is auto-confirmed,
/// or with the bare user when email confirmation is pending.
fn interpret_sign_up(body: serde_json::Value, now_secs: i64) -> Result<SignUpOutcome, AuthError> {
    if body.get("access_token").is_some() {
        let token: TokenResponse = serde_json::from_value(body).map_err(|e| {
            AuthError::Backend(BackendError::Decode { context: "sign up".to_owned(), message: e.to_string() })
        })?;
        return Ok(SignUpOutcome::SignedIn(token.into_session(now_secs)));
    }
    Ok(SignUpOutcome::ConfirmationRequired)
}
