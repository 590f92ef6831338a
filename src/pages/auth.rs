//! Email + password sign-in and sign-up.
//!
//! Shown by the session gate whenever no session exists. A successful
//! sign-in is not handled here: the auth backend publishes `SIGNED_IN`, the
//! gate switches to the shell and navigates home.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;

use crate::app::use_services;
use crate::net::AuthError;
use crate::net::auth::{SignUpOutcome, SupabaseAuth};

const MIN_PASSWORD_CHARS: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AuthMode {
    SignIn,
    SignUp,
}

fn validate(mode: AuthMode, email: &str, password: &str, full_name: &str) -> Result<(), String> {
    let valid_email = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.') && !domain.ends_with('.'));
    if !valid_email {
        return Err("Enter a valid email address.".to_owned());
    }
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(format!("Password must be at least {MIN_PASSWORD_CHARS} characters."));
    }
    if mode == AuthMode::SignUp && full_name.trim().is_empty() {
        return Err("Enter your name.".to_owned());
    }
    Ok(())
}

/// Run the sign-in or sign-up call. `Ok(Some(message))` asks the user to
/// confirm their email before signing in.
async fn submit(
    auth: &SupabaseAuth,
    mode: AuthMode,
    email: &str,
    password: &str,
    full_name: &str,
) -> Result<Option<String>, AuthError> {
    match mode {
        AuthMode::SignIn => auth.sign_in_with_password(email, password).await.map(|_| None),
        AuthMode::SignUp => auth.sign_up(email, password, full_name).await.map(|outcome| match outcome {
            SignUpOutcome::SignedIn(_) => None,
            SignUpOutcome::ConfirmationRequired => Some("Check your inbox to confirm your email, then sign in.".to_owned()),
        }),
    }
}

#[component]
pub fn AuthPage() -> impl IntoView {
    let services = use_services();

    let mode = RwSignal::new(AuthMode::SignIn);
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let full_name = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let info = RwSignal::new(None::<String>);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let mode_value = mode.get_untracked();
        let email_value = email.get_untracked().trim().to_owned();
        let password_value = password.get_untracked();
        let name_value = full_name.get_untracked().trim().to_owned();
        if let Err(message) = validate(mode_value, &email_value, &password_value, &name_value) {
            error.set(Some(message));
            return;
        }

        busy.set(true);
        error.set(None);
        info.set(None);
        let auth = services.auth();
        leptos::task::spawn_local(async move {
            match submit(&auth, mode_value, &email_value, &password_value, &name_value).await {
                Ok(Some(message)) => {
                    let _ = info.try_set(Some(message));
                    let _ = mode.try_set(AuthMode::SignIn);
                }
                Ok(None) => {}
                Err(e) => {
                    log::warn!("{mode_value:?} failed: {e}");
                    let _ = error.try_set(Some(e.to_string()));
                }
            }
            let _ = busy.try_set(false);
        });
    };

    let toggle_mode = move |_| {
        mode.update(|m| {
            *m = match m {
                AuthMode::SignIn => AuthMode::SignUp,
                AuthMode::SignUp => AuthMode::SignIn,
            };
        });
        error.set(None);
    };

    let is_sign_up = Signal::derive(move || mode.get() == AuthMode::SignUp);

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Candle Academy"</h1>
                <p class="auth-card__subtitle">
                    {move || if is_sign_up.get() { "Create your account" } else { "Sign in to continue learning" }}
                </p>
                <form class="auth-form" on:submit=on_submit>
                    <CredentialFields is_sign_up=is_sign_up email=email password=password full_name=full_name/>
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        {move || match (busy.get(), is_sign_up.get()) {
                            (true, _) => "Please wait...",
                            (false, true) => "Sign up",
                            (false, false) => "Sign in",
                        }}
                    </button>
                </form>
                <Show when=move || error.get().is_some()>
                    <p class="auth-message auth-message--error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <Show when=move || info.get().is_some()>
                    <p class="auth-message">{move || info.get().unwrap_or_default()}</p>
                </Show>
                <button class="btn btn--link" on:click=toggle_mode>
                    {move || if is_sign_up.get() { "Already have an account? Sign in" } else { "New here? Create an account" }}
                </button>
            </div>
        </div>
    }
}

#[component]
fn CredentialFields(
    is_sign_up: Signal<bool>,
    email: RwSignal<String>,
    password: RwSignal<String>,
    full_name: RwSignal<String>,
) -> impl IntoView {
    view! {
        <Show when=move || is_sign_up.get()>
            <input
                class="auth-input"
                type="text"
                placeholder="Full name"
                autocomplete="name"
                prop:value=move || full_name.get()
                on:input=move |ev| full_name.set(event_target_value(&ev))
            />
        </Show>
        <input
            class="auth-input"
            type="email"
            placeholder="you@example.com"
            autocomplete="email"
            prop:value=move || email.get()
            on:input=move |ev| email.set(event_target_value(&ev))
        />
        <input
            class="auth-input"
            type="password"
            placeholder="Password"
            autocomplete=move || if is_sign_up.get() { "new-password" } else { "current-password" }
            prop:value=move || password.get()
            on:input=move |ev| password.set(event_target_value(&ev))
        />
    }
}
