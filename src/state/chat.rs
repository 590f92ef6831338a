//! Support conversation state.
//!
//! Messages arrive from three places: the history load, the echo of our own
//! insert, and realtime notifications. The same row can come from more than
//! one of them, so merging dedupes by id and keeps `created_at` order.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use crate::net::types::{MessageSender, NewSupportMessage, SupportMessage};

pub const MAX_MESSAGE_CHARS: usize = 2000;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChatState {
    pub messages: Vec<SupportMessage>,
    pub loading: bool,
    pub sending: bool,
    pub error: Option<String>,
}

impl ChatState {
    /// Merge `incoming` rows; returns how many were new.
    pub fn merge(&mut self, incoming: impl IntoIterator<Item = SupportMessage>) -> usize {
        let mut added = 0;
        for message in incoming {
            if self.messages.iter().any(|m| m.id == message.id) {
                continue;
            }
            self.messages.push(message);
            added += 1;
        }
        if added > 0 {
            // RFC 3339 timestamps from one source sort lexically; stable sort
            // keeps arrival order for equal stamps.
            self.messages.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        }
        added
    }

    #[must_use]
    pub fn last_support_reply(&self) -> Option<&SupportMessage> {
        self.messages.iter().rev().find(|m| m.sender == MessageSender::Support)
    }
}

/// Validate a draft and build the insert payload.
///
/// # Errors
///
/// Returns a user-facing message for empty or overlong drafts.
pub fn outgoing_message(user_id: &str, draft: &str) -> Result<NewSupportMessage, String> {
    let body = draft.trim();
    if body.is_empty() {
        return Err("Type a message first.".to_owned());
    }
    if body.chars().count() > MAX_MESSAGE_CHARS {
        return Err(format!("Messages are limited to {MAX_MESSAGE_CHARS} characters."));
    }
    Ok(NewSupportMessage { user_id: user_id.to_owned(), sender: MessageSender::User, body: body.to_owned() })
}

/// `HH:MM` part of an RFC 3339 timestamp, or the input if it has none.
#[must_use]
pub fn short_time(created_at: &str) -> &str {
    created_at
        .split_once('T')
        .and_then(|(_, time)| time.get(..5))
        .unwrap_or(created_at)
}
