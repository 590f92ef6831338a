use super::*;

fn raw<'a>() -> RawConfig<'a> {
    RawConfig {
        supabase_url: Some("https://abc.supabase.co/"),
        supabase_anon_key: Some("anon"),
        ..RawConfig::default()
    }
}

#[test]
fn minimal_config_applies_defaults() {
    let config = AppConfig::from_values(raw()).expect("valid config");
    assert_eq!(config.supabase_url, "https://abc.supabase.co");
    assert_eq!(config.supabase_anon_key, "anon");
    assert_eq!(config.payment_key_id, None);
    assert_eq!(config.avatar_bucket, DEFAULT_AVATAR_BUCKET);
    assert_eq!(config.realtime_heartbeat_secs, DEFAULT_REALTIME_HEARTBEAT_SECS);
}

#[test]
fn missing_url_is_reported() {
    let err = AppConfig::from_values(RawConfig { supabase_url: None, ..raw() }).unwrap_err();
    assert_eq!(err, ConfigError::Missing { var: "CANDLE_SUPABASE_URL" });
}

#[test]
fn blank_anon_key_counts_as_missing() {
    let err = AppConfig::from_values(RawConfig { supabase_anon_key: Some("   "), ..raw() }).unwrap_err();
    assert_eq!(err, ConfigError::Missing { var: "CANDLE_SUPABASE_ANON_KEY" });
}

#[test]
fn non_http_url_is_invalid() {
    let err = AppConfig::from_values(RawConfig { supabase_url: Some("ftp://x"), ..raw() }).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: "CANDLE_SUPABASE_URL", .. }));
}

#[test]
fn optional_values_are_read() {
    let config = AppConfig::from_values(RawConfig {
        payment_key_id: Some("rzp_test_1"),
        avatar_bucket: Some("profile-pics"),
        realtime_heartbeat_secs: Some("15"),
        ..raw()
    })
    .expect("valid config");
    assert_eq!(config.payment_key_id.as_deref(), Some("rzp_test_1"));
    assert_eq!(config.avatar_bucket, "profile-pics");
    assert_eq!(config.realtime_heartbeat_secs, 15);
}

#[test]
fn zero_heartbeat_is_invalid() {
    let err = AppConfig::from_values(RawConfig { realtime_heartbeat_secs: Some("0"), ..raw() }).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: "CANDLE_REALTIME_HEARTBEAT_SECS", .. }));
}
