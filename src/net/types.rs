//! Wire types shared by the backend modules.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Authenticated user as reported by the auth service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: serde_json::Value,
}

impl User {
    /// `full_name` metadata, falling back to the email local part.
    #[must_use]
    pub fn display_name(&self) -> String {
        if let Some(name) = self
            .user_metadata
            .get("full_name")
            .and_then(serde_json::Value::as_str)
            .map(str::trim)
            .filter(|n| !n.is_empty())
        {
            return name.to_owned();
        }
        self.email
            .as_deref()
            .and_then(|e| e.split('@').next())
            .filter(|local| !local.is_empty())
            .unwrap_or("Trader")
            .to_owned()
    }
}

/// Cached auth session. Replaced wholesale on every provider notification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Unix seconds.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: User,
}

/// Seconds before expiry at which a stored session is refreshed.
pub const SESSION_EXPIRY_LEEWAY_SECS: i64 = 60;

impl Session {
    #[must_use]
    pub fn is_expired(&self, now_secs: i64) -> bool {
        self.expires_at
            .is_some_and(|at| at - SESSION_EXPIRY_LEEWAY_SECS <= now_secs)
    }

    /// Seconds until the tokens should be refreshed, zero when already due.
    /// `None` for sessions without an expiry.
    #[must_use]
    pub fn refresh_in_secs(&self, now_secs: i64) -> Option<i64> {
        self.expires_at
            .map(|at| (at - SESSION_EXPIRY_LEEWAY_SECS - now_secs).max(0))
    }
}

/// Token grant response from the auth service.
#[derive(Clone, Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: User,
}

impl TokenResponse {
    #[must_use]
    pub fn into_session(self, now_secs: i64) -> Session {
        let expires_at = self
            .expires_at
            .or_else(|| self.expires_in.map(|secs| now_secs + secs));
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user,
        }
    }
}

/// Row of the `profiles` table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub plan_expires_at: Option<String>,
}

impl Profile {
    #[must_use]
    pub fn has_active_plan(&self) -> bool {
        self.plan.as_deref().is_some_and(|p| !p.is_empty() && p != "free")
    }
}

/// Who wrote a support message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageSender {
    User,
    Support,
}

/// Row of the `support_messages` table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportMessage {
    pub id: String,
    pub user_id: String,
    pub sender: MessageSender,
    pub body: String,
    /// RFC 3339 timestamp assigned by the database.
    pub created_at: String,
}

/// Insert payload for a new support message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewSupportMessage {
    pub user_id: String,
    pub sender: MessageSender,
    pub body: String,
}
