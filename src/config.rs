//! Build-time application configuration.
//!
//! Values are baked in at compile time with `option_env!`, since a static
//! WASM bundle has no process environment at runtime:
//!
//! Required:
//! - `CANDLE_SUPABASE_URL`: backend project URL (`https://<ref>.supabase.co`)
//! - `CANDLE_SUPABASE_ANON_KEY`: public anon key
//!
//! Optional:
//! - `CANDLE_PAYMENT_KEY_ID`: checkout widget key id (pricing disabled when absent)
//! - `CANDLE_AVATAR_BUCKET`: storage bucket for avatars, default `avatars`
//! - `CANDLE_REALTIME_HEARTBEAT_SECS`: default 30

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_AVATAR_BUCKET: &str = "avatars";
pub const DEFAULT_REALTIME_HEARTBEAT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing configuration value: {var}")]
    Missing { var: &'static str },
    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub payment_key_id: Option<String>,
    pub avatar_bucket: String,
    pub realtime_heartbeat_secs: u64,
}

/// Raw, unvalidated configuration values.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawConfig<'a> {
    pub supabase_url: Option<&'a str>,
    pub supabase_anon_key: Option<&'a str>,
    pub payment_key_id: Option<&'a str>,
    pub avatar_bucket: Option<&'a str>,
    pub realtime_heartbeat_secs: Option<&'a str>,
}

impl AppConfig {
    /// Read the values compiled into this build.
    ///
    /// # Errors
    ///
    /// Returns an error if a required value is missing or malformed.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_values(RawConfig {
            supabase_url: option_env!("CANDLE_SUPABASE_URL"),
            supabase_anon_key: option_env!("CANDLE_SUPABASE_ANON_KEY"),
            payment_key_id: option_env!("CANDLE_PAYMENT_KEY_ID"),
            avatar_bucket: option_env!("CANDLE_AVATAR_BUCKET"),
            realtime_heartbeat_secs: option_env!("CANDLE_REALTIME_HEARTBEAT_SECS"),
        })
    }

    /// Validate raw values into a typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if a required value is missing or malformed.
    pub fn from_values(raw: RawConfig<'_>) -> Result<Self, ConfigError> {
        let supabase_url = parse_base_url(non_empty(raw.supabase_url).ok_or(ConfigError::Missing {
            var: "CANDLE_SUPABASE_URL",
        })?)?;
        let supabase_anon_key = non_empty(raw.supabase_anon_key)
            .ok_or(ConfigError::Missing { var: "CANDLE_SUPABASE_ANON_KEY" })?
            .to_owned();
        let payment_key_id = non_empty(raw.payment_key_id).map(str::to_owned);
        let avatar_bucket = non_empty(raw.avatar_bucket)
            .unwrap_or(DEFAULT_AVATAR_BUCKET)
            .to_owned();
        let realtime_heartbeat_secs = match non_empty(raw.realtime_heartbeat_secs) {
            None => DEFAULT_REALTIME_HEARTBEAT_SECS,
            Some(v) => parse_heartbeat(v)?,
        };

        Ok(Self { supabase_url, supabase_anon_key, payment_key_id, avatar_bucket, realtime_heartbeat_secs })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    if !(raw.starts_with("https://") || raw.starts_with("http://")) {
        return Err(ConfigError::Invalid {
            var: "CANDLE_SUPABASE_URL",
            reason: format!("expected an http(s) URL, got {raw:?}"),
        });
    }
    Ok(raw.trim_end_matches('/').to_owned())
}

fn parse_heartbeat(raw: &str) -> Result<u64, ConfigError> {
    match raw.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ConfigError::Invalid {
            var: "CANDLE_REALTIME_HEARTBEAT_SECS",
            reason: format!("expected a positive integer, got {raw:?}"),
        }),
    }
}
