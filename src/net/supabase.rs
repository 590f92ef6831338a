//! Shared backend client and request plumbing.
//!
//! Client-side (`csr`): real HTTP calls via `gloo-net`.
//! Elsewhere: every call returns `BackendError::Unavailable`, so native
//! builds and tests never touch the network.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses become `BackendError::Status` carrying the backend's
//! own message when the body has one. A client built without valid config
//! fails every call with `NotConfigured` instead of panicking at start-up.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "supabase_test.rs"]
mod supabase_test;

use std::sync::Arc;

use serde::de::DeserializeOwned;

use super::error::BackendError;
use crate::config::{AppConfig, ConfigError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

/// One backend request, built up before sending.
#[derive(Clone, Debug)]
pub struct ApiCall<'a> {
    pub method: HttpMethod,
    pub url: String,
    /// Short label used in error messages (`"invoke generate-quiz"`).
    pub context: &'a str,
    pub token: Option<&'a str>,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<serde_json::Value>,
}

impl<'a> ApiCall<'a> {
    #[must_use]
    pub fn new(method: HttpMethod, url: String, context: &'a str) -> Self {
        Self { method, url, context, token: None, query: Vec::new(), headers: Vec::new(), body: None }
    }

    #[must_use]
    pub fn token(mut self, token: Option<&'a str>) -> Self {
        self.token = token;
        self
    }

    #[must_use]
    pub fn query(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    #[must_use]
    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    #[must_use]
    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Cheap-to-clone handle to the configured backend project.
#[derive(Clone, Debug)]
pub struct SupabaseClient {
    config: Result<Arc<AppConfig>, ConfigError>,
}

impl SupabaseClient {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self { config: Ok(Arc::new(config)) }
    }

    /// A client whose every call fails with `NotConfigured`.
    #[must_use]
    pub fn unconfigured(error: ConfigError) -> Self {
        Self { config: Err(error) }
    }

    /// # Errors
    ///
    /// Returns `NotConfigured` when the client was built without config.
    pub fn config(&self) -> Result<&AppConfig, BackendError> {
        self.config
            .as_deref()
            .map_err(|e| BackendError::NotConfigured(e.to_string()))
    }

    /// Headers every request carries: project key plus bearer token (the
    /// session token when signed in, otherwise the anon key).
    ///
    /// # Errors
    ///
    /// Returns `NotConfigured` when the client was built without config.
    pub fn base_headers(&self, token: Option<&str>) -> Result<Vec<(&'static str, String)>, BackendError> {
        let config = self.config()?;
        let bearer = token.unwrap_or(&config.supabase_anon_key);
        Ok(vec![
            ("apikey", config.supabase_anon_key.clone()),
            ("Authorization", format!("Bearer {bearer}")),
        ])
    }

    /// Send `call` and decode a JSON response body into `T`.
    ///
    /// # Errors
    ///
    /// Returns an error on missing config, transport failure, non-2xx status,
    /// or an undecodable body.
    pub async fn send<T: DeserializeOwned>(&self, call: ApiCall<'_>) -> Result<T, BackendError> {
        let headers = self.base_headers(call.token)?;
        #[cfg(feature = "csr")]
        {
            let builder = self::browser::builder(&call, &headers);
            let request = match &call.body {
                Some(body) => builder.json(body),
                None => builder.build(),
            }
            .map_err(|e| BackendError::Transport(e.to_string()))?;
            let (status, text) = self::browser::execute(request).await?;
            check_status(call.context, status, &text)?;
            decode_body(call.context, &text)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (call, headers);
            Err(BackendError::Unavailable)
        }
    }

    /// Send `call` with a raw byte body (file uploads).
    ///
    /// # Errors
    ///
    /// Returns an error on missing config, transport failure, or non-2xx status.
    pub async fn send_bytes(&self, call: ApiCall<'_>, bytes: &[u8], content_type: &str) -> Result<(), BackendError> {
        let headers = self.base_headers(call.token)?;
        #[cfg(feature = "csr")]
        {
            let body = js_sys::Uint8Array::from(bytes);
            let request = self::browser::builder(&call, &headers)
                .header("Content-Type", content_type)
                .body(body)
                .map_err(|e| BackendError::Transport(e.to_string()))?;
            let (status, text) = self::browser::execute(request).await?;
            check_status(call.context, status, &text)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (call, headers, bytes, content_type);
            Err(BackendError::Unavailable)
        }
    }
}

#[cfg(feature = "csr")]
mod browser {
    use gloo_net::http::{Request, RequestBuilder};

    use super::{ApiCall, HttpMethod};
    use crate::net::error::BackendError;

    pub(super) fn builder(call: &ApiCall<'_>, base_headers: &[(&'static str, String)]) -> RequestBuilder {
        let mut builder = match call.method {
            HttpMethod::Get => Request::get(&call.url),
            HttpMethod::Post => Request::post(&call.url),
            HttpMethod::Put => Request::put(&call.url),
            HttpMethod::Patch => Request::patch(&call.url),
            HttpMethod::Delete => Request::delete(&call.url),
        };
        for (name, value) in base_headers.iter().chain(call.headers.iter()) {
            builder = builder.header(name, value);
        }
        if !call.query.is_empty() {
            builder = builder.query(call.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        builder
    }

    pub(super) async fn execute(request: Request) -> Result<(u16, String), BackendError> {
        let resp = request
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        Ok((status, text))
    }
}

/// Map a non-2xx status to `BackendError::Status`.
///
/// # Errors
///
/// Returns `Status` when `status` is outside `200..300`.
pub fn check_status(context: &str, status: u16, body: &str) -> Result<(), BackendError> {
    if (200..300).contains(&status) {
        return Ok(());
    }
    Err(BackendError::Status { context: context.to_owned(), status, message: error_message(status, body) })
}

/// Pull a human-readable message out of an error body.
///
/// The backend services disagree on the field name, so the common ones are
/// tried in order before falling back to the raw text.
#[must_use]
pub fn error_message(status: u16, body: &str) -> String {
    const KEYS: [&str; 5] = ["error_description", "msg", "message", "error", "hint"];
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in KEYS {
            if let Some(text) = value.get(key).and_then(serde_json::Value::as_str) {
                if !text.trim().is_empty() {
                    return text.trim().to_owned();
                }
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() { format!("HTTP {status}") } else { trimmed.to_owned() }
}

/// Decode a response body; an empty body decodes as JSON `null`.
///
/// # Errors
///
/// Returns `Decode` if the body is not valid JSON for `T`.
pub fn decode_body<T: DeserializeOwned>(context: &str, body: &str) -> Result<T, BackendError> {
    let text = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(text).map_err(|e| BackendError::Decode { context: context.to_owned(), message: e.to_string() })
}

#[must_use]
pub fn auth_url(base: &str, path: &str) -> String {
    format!("{base}/auth/v1/{}", path.trim_start_matches('/'))
}

#[must_use]
pub fn rest_url(base: &str, table: &str) -> String {
    format!("{base}/rest/v1/{table}")
}

#[must_use]
pub fn function_url(base: &str, name: &str) -> String {
    format!("{base}/functions/v1/{name}")
}

#[must_use]
pub fn storage_object_url(base: &str, bucket: &str, path: &str) -> String {
    format!("{base}/storage/v1/object/{bucket}/{}", path.trim_start_matches('/'))
}

#[must_use]
pub fn storage_bucket_url(base: &str, bucket: &str) -> String {
    format!("{base}/storage/v1/object/{bucket}")
}

#[must_use]
pub fn public_object_url(base: &str, bucket: &str, path: &str) -> String {
    format!("{base}/storage/v1/object/public/{bucket}/{}", path.trim_start_matches('/'))
}

/// WebSocket endpoint for realtime channels.
#[must_use]
pub fn realtime_url(base: &str, anon_key: &str) -> String {
    let ws_base = if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        base.to_owned()
    };
    format!("{ws_base}/realtime/v1/websocket?apikey={anon_key}&vsn=1.0.0")
}
