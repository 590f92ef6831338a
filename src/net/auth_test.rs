use super::*;
use crate::config::{AppConfig, ConfigError, RawConfig};
use futures::executor::block_on;
use std::cell::RefCell;

fn status(status: u16, message: &str) -> BackendError {
    BackendError::Status { context: "ctx".to_owned(), status, message: message.to_owned() }
}

#[test]
fn bad_request_on_sign_in_means_invalid_credentials() {
    assert_eq!(classify_sign_in_error(status(400, "Invalid login credentials")), AuthError::InvalidCredentials);
}

#[test]
fn validation_failures_keep_backend_message() {
    assert_eq!(
        classify_rejection(status(422, "Password should be at least 6 characters")),
        AuthError::Rejected("Password should be at least 6 characters".to_owned())
    );
}

#[test]
fn server_errors_stay_backend_errors() {
    assert_eq!(classify_sign_in_error(status(500, "boom")), AuthError::Backend(status(500, "boom")));
    assert_eq!(
        classify_rejection(BackendError::Transport("offline".to_owned())),
        AuthError::Backend(BackendError::Transport("offline".to_owned()))
    );
}

#[test]
fn session_rejection_statuses() {
    assert!(is_session_rejection(&status(401, "")));
    assert!(is_session_rejection(&status(400, "")));
    assert!(!is_session_rejection(&status(503, "")));
    assert!(!is_session_rejection(&BackendError::Transport("x".to_owned())));
}

#[test]
fn sign_up_with_token_grant_signs_in() {
    let body = serde_json::json!({
        "access_token": "a",
        "refresh_token": "r",
        "expires_in": 60,
        "user": { "id": "u1", "email": "a@b.c" }
    });
    match interpret_sign_up(body, 10).expect("outcome") {
        SignUpOutcome::SignedIn(session) => {
            assert_eq!(session.user.id, "u1");
            assert_eq!(session.expires_at, Some(70));
        }
        SignUpOutcome::ConfirmationRequired => panic!("expected a session"),
    }
}

#[test]
fn sign_up_without_token_requires_confirmation() {
    let body = serde_json::json!({ "id": "u1", "email": "a@b.c", "confirmation_sent_at": "now" });
    assert_eq!(interpret_sign_up(body, 0).expect("outcome"), SignUpOutcome::ConfirmationRequired);
}

#[test]
fn malformed_token_grant_is_a_decode_error() {
    let body = serde_json::json!({ "access_token": "a" });
    assert!(matches!(interpret_sign_up(body, 0), Err(AuthError::Backend(BackendError::Decode { .. }))));
}

#[test]
fn unconfigured_provider_fails_session_lookup() {
    let auth = SupabaseAuth::new(SupabaseClient::unconfigured(ConfigError::Missing { var: "CANDLE_SUPABASE_URL" }));
    let result = block_on(auth.current_session());
    assert!(matches!(result, Err(AuthError::Backend(BackendError::NotConfigured(_)))));
}

#[cfg(not(feature = "csr"))]
#[test]
fn configured_provider_without_stored_session_is_signed_out() {
    let config = AppConfig::from_values(RawConfig {
        supabase_url: Some("https://p.supabase.co"),
        supabase_anon_key: Some("k"),
        ..RawConfig::default()
    })
    .expect("config");
    let auth = SupabaseAuth::new(SupabaseClient::new(config));
    assert_eq!(block_on(auth.current_session()), Ok(None));
}

#[test]
fn sign_out_publishes_signed_out() {
    let auth = SupabaseAuth::new(SupabaseClient::unconfigured(ConfigError::Missing { var: "x" }));
    let seen = Rc::new(RefCell::new(Vec::new()));
    let _sub = {
        let seen = Rc::clone(&seen);
        auth.on_session_change(Rc::new(move |change: &SessionChange| {
            seen.borrow_mut().push((change.event, change.session.is_some()));
        }))
    };

    block_on(auth.sign_out(None));

    assert_eq!(*seen.borrow(), vec![(AuthEvent::SignedOut, false)]);
}

#[test]
fn failed_refresh_keeps_the_session_and_publishes_nothing() {
    let auth = SupabaseAuth::new(SupabaseClient::unconfigured(ConfigError::Missing { var: "x" }));
    let seen = Rc::new(RefCell::new(0));
    let _sub = {
        let seen = Rc::clone(&seen);
        auth.on_session_change(Rc::new(move |_: &SessionChange| *seen.borrow_mut() += 1))
    };
    let session = Session {
        access_token: "a".to_owned(),
        refresh_token: "r".to_owned(),
        expires_at: Some(0),
        user: User { id: "u1".to_owned(), email: None, user_metadata: serde_json::Value::Null },
    };

    let result = block_on(auth.refresh_session(&session));

    assert!(matches!(result, Err(AuthError::Backend(BackendError::NotConfigured(_)))));
    assert_eq!(*seen.borrow(), 0);
}
