use super::*;
use crate::config::RawConfig;

fn client() -> SupabaseClient {
    SupabaseClient::new(
        AppConfig::from_values(RawConfig {
            supabase_url: Some("https://proj.supabase.co"),
            supabase_anon_key: Some("anon-key"),
            ..RawConfig::default()
        })
        .expect("config"),
    )
}

// =============================================================
// Headers / config
// =============================================================

#[test]
fn base_headers_use_anon_key_without_session() {
    let headers = client().base_headers(None).expect("headers");
    assert_eq!(headers[0], ("apikey", "anon-key".to_owned()));
    assert_eq!(headers[1], ("Authorization", "Bearer anon-key".to_owned()));
}

#[test]
fn base_headers_use_session_token_when_present() {
    let headers = client().base_headers(Some("jwt")).expect("headers");
    assert_eq!(headers[1], ("Authorization", "Bearer jwt".to_owned()));
}

#[test]
fn unconfigured_client_fails_every_call() {
    let client = SupabaseClient::unconfigured(ConfigError::Missing { var: "CANDLE_SUPABASE_URL" });
    let err = client.base_headers(None).unwrap_err();
    assert!(matches!(err, BackendError::NotConfigured(_)));
    let sent = futures::executor::block_on(
        client.send::<serde_json::Value>(ApiCall::new(HttpMethod::Get, "x".to_owned(), "load")),
    );
    assert!(matches!(sent, Err(BackendError::NotConfigured(_))));
}

#[cfg(not(feature = "csr"))]
#[test]
fn configured_client_is_unavailable_outside_browser() {
    let sent = futures::executor::block_on(
        client().send::<serde_json::Value>(ApiCall::new(HttpMethod::Get, "x".to_owned(), "load")),
    );
    assert_eq!(sent, Err(BackendError::Unavailable));
}

// =============================================================
// Status / body handling
// =============================================================

#[test]
fn check_status_accepts_2xx() {
    assert!(check_status("ctx", 200, "").is_ok());
    assert!(check_status("ctx", 204, "").is_ok());
}

#[test]
fn check_status_wraps_backend_message() {
    let err = check_status("sign in", 400, r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#)
        .unwrap_err();
    assert_eq!(
        err,
        BackendError::Status {
            context: "sign in".to_owned(),
            status: 400,
            message: "Invalid login credentials".to_owned()
        }
    );
}

#[test]
fn error_message_falls_back_to_raw_text_then_status() {
    assert_eq!(error_message(502, "Bad gateway"), "Bad gateway");
    assert_eq!(error_message(500, "  "), "HTTP 500");
    assert_eq!(error_message(400, r#"{"message":"row violates policy"}"#), "row violates policy");
}

#[test]
fn decode_body_treats_empty_as_null() {
    decode_body::<()>("ctx", "").expect("unit");
    let none: Option<u32> = decode_body("ctx", "  ").expect("option");
    assert_eq!(none, None);
}

#[test]
fn decode_body_reports_context() {
    let err = decode_body::<u32>("load profile", "{").unwrap_err();
    assert!(matches!(err, BackendError::Decode { ref context, .. } if context == "load profile"));
}

// =============================================================
// URL builders
// =============================================================

#[test]
fn endpoint_urls() {
    let base = "https://proj.supabase.co";
    assert_eq!(auth_url(base, "/token"), "https://proj.supabase.co/auth/v1/token");
    assert_eq!(rest_url(base, "profiles"), "https://proj.supabase.co/rest/v1/profiles");
    assert_eq!(function_url(base, "generate-quiz"), "https://proj.supabase.co/functions/v1/generate-quiz");
    assert_eq!(
        storage_object_url(base, "avatars", "/u1/a.png"),
        "https://proj.supabase.co/storage/v1/object/avatars/u1/a.png"
    );
    assert_eq!(
        public_object_url(base, "avatars", "u1/a.png"),
        "https://proj.supabase.co/storage/v1/object/public/avatars/u1/a.png"
    );
    assert_eq!(storage_bucket_url(base, "avatars"), "https://proj.supabase.co/storage/v1/object/avatars");
}

#[test]
fn realtime_url_switches_scheme() {
    assert_eq!(
        realtime_url("https://proj.supabase.co", "k"),
        "wss://proj.supabase.co/realtime/v1/websocket?apikey=k&vsn=1.0.0"
    );
    assert_eq!(
        realtime_url("http://localhost:54321", "k"),
        "ws://localhost:54321/realtime/v1/websocket?apikey=k&vsn=1.0.0"
    );
}

#[test]
fn api_call_builder_accumulates() {
    let call = ApiCall::new(HttpMethod::Post, "u".to_owned(), "ctx")
        .token(Some("t"))
        .query(vec![("a".to_owned(), "1".to_owned())])
        .header("Prefer", "return=representation")
        .json(serde_json::json!({ "k": 1 }));
    assert_eq!(call.token, Some("t"));
    assert_eq!(call.query.len(), 1);
    assert_eq!(call.headers, vec![("Prefer", "return=representation".to_owned())]);
    assert!(call.body.is_some());
}
