use super::*;

#[test]
fn sign_in_needs_email_and_password() {
    assert!(validate(AuthMode::SignIn, "a@b.co", "secret", "").is_ok());
    assert!(validate(AuthMode::SignIn, "a@b.co", "short", "").is_err());
}

#[test]
fn malformed_emails_are_rejected() {
    for email in ["", "plain", "@b.co", "a@b", "a@b."] {
        assert_eq!(
            validate(AuthMode::SignIn, email, "secret", ""),
            Err("Enter a valid email address.".to_owned()),
            "{email}"
        );
    }
}

#[test]
fn sign_up_also_needs_a_name() {
    assert_eq!(validate(AuthMode::SignUp, "a@b.co", "secret", "  "), Err("Enter your name.".to_owned()));
    assert!(validate(AuthMode::SignUp, "a@b.co", "secret", "Asha").is_ok());
}

#[test]
fn submit_reports_unconfigured_backend_for_both_modes() {
    use crate::config::ConfigError;
    use crate::net::{BackendError, SupabaseClient};

    let auth = SupabaseAuth::new(SupabaseClient::unconfigured(ConfigError::Missing { var: "x" }));
    for mode in [AuthMode::SignIn, AuthMode::SignUp] {
        let result = futures::executor::block_on(submit(&auth, mode, "a@b.co", "secret", "Ada"));
        assert!(matches!(result, Err(AuthError::Backend(BackendError::NotConfigured(_)))), "{mode:?}");
    }
}
