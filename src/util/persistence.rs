//! Browser localStorage helpers for JSON values.
//!
//! SYSTEM CONTEXT
//! ==============
//! The stored auth session, the in-progress quiz draft and the last quiz
//! result all live in `localStorage`. These helpers keep the web-sys glue in
//! one place; outside the browser they read nothing and write nothing.

use serde::Serialize;
use serde::de::DeserializeOwned;

pub const SESSION_KEY: &str = "candle-academy.session";
pub const QUIZ_DRAFT_KEY: &str = "candle-academy.quiz-draft";
pub const QUIZ_RESULT_KEY: &str = "candle-academy.quiz-result";

#[cfg(feature = "csr")]
fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Load a JSON value from `localStorage` for `key`.
pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    #[cfg(feature = "csr")]
    {
        let raw = storage()?.get_item(key).ok().flatten()?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("discarding unreadable stored value {key}: {e}");
                remove(key);
                None
            }
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = key;
        None
    }
}

/// Save a JSON value to `localStorage` for `key`.
pub fn save_json<T: Serialize>(key: &str, value: &T) {
    #[cfg(feature = "csr")]
    {
        let Some(storage) = storage() else {
            return;
        };
        let Ok(raw) = serde_json::to_string(value) else {
            return;
        };
        if storage.set_item(key, &raw).is_err() {
            log::warn!("failed to persist {key}");
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (key, value);
    }
}

/// Remove `key` from `localStorage`.
pub fn remove(key: &str) {
    #[cfg(feature = "csr")]
    {
        if let Some(storage) = storage() {
            let _ = storage.remove_item(key);
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = key;
    }
}
