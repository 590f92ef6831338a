//! Realtime row-insert notifications over the Phoenix channel protocol.
//!
//! SYSTEM CONTEXT
//! ==============
//! The support chat listens for new `support_messages` rows. One channel is
//! joined per subscription with a `postgres_changes` INSERT filter; the
//! socket sends a heartbeat on a fixed interval and leaves the channel when
//! the returned `Subscription` is dropped.
//!
//! DESIGN
//! ======
//! Message encoding and decoding are plain functions over JSON text. Only
//! the socket loop itself is browser-gated.
//!
//! ERROR HANDLING
//! ==============
//! Socket failures are logged and retried with capped exponential backoff
//! until the subscription is dropped. Undecodable messages are skipped.

#[cfg(test)]
#[path = "realtime_test.rs"]
mod realtime_test;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::supabase::SupabaseClient;
use crate::subscription::Subscription;

#[cfg(any(test, feature = "csr"))]
const INITIAL_BACKOFF_MS: u32 = 1000;
#[cfg(any(test, feature = "csr"))]
const MAX_BACKOFF_MS: u32 = 10_000;

/// One frame of the Phoenix wire protocol (JSON text).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhoenixMessage {
    pub topic: String,
    pub event: String,
    #[serde(default)]
    pub payload: Value,
    #[serde(rename = "ref", default)]
    pub msg_ref: Option<String>,
}

impl PhoenixMessage {
    #[must_use]
    pub fn to_text(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Which inserted rows to be told about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InsertFilter {
    pub schema: String,
    pub table: String,
    /// `PostgREST`-style row filter, e.g. `user_id=eq.{id}`.
    pub filter: Option<String>,
}

impl InsertFilter {
    #[must_use]
    pub fn table(table: &str) -> Self {
        Self { schema: "public".to_owned(), table: table.to_owned(), filter: None }
    }

    #[must_use]
    pub fn column_eq(mut self, column: &str, value: &str) -> Self {
        self.filter = Some(format!("{column}=eq.{value}"));
        self
    }

    #[must_use]
    pub fn topic(&self) -> String {
        match &self.filter {
            Some(filter) => format!("realtime:{}:{}:{filter}", self.schema, self.table),
            None => format!("realtime:{}:{}", self.schema, self.table),
        }
    }
}

#[must_use]
pub fn join_message(filter: &InsertFilter, access_token: Option<&str>, msg_ref: u64) -> PhoenixMessage {
    let mut change = json!({ "event": "INSERT", "schema": filter.schema, "table": filter.table });
    if let Some(f) = &filter.filter {
        change["filter"] = Value::String(f.clone());
    }
    let mut payload = json!({
        "config": {
            "broadcast": { "self": false },
            "presence": { "key": "" },
            "postgres_changes": [change],
        }
    });
    if let Some(token) = access_token {
        payload["access_token"] = Value::String(token.to_owned());
    }
    PhoenixMessage { topic: filter.topic(), event: "phx_join".to_owned(), payload, msg_ref: Some(msg_ref.to_string()) }
}

#[must_use]
pub fn heartbeat_message(msg_ref: u64) -> PhoenixMessage {
    PhoenixMessage {
        topic: "phoenix".to_owned(),
        event: "heartbeat".to_owned(),
        payload: json!({}),
        msg_ref: Some(msg_ref.to_string()),
    }
}

#[must_use]
pub fn leave_message(topic: &str, msg_ref: u64) -> PhoenixMessage {
    PhoenixMessage {
        topic: topic.to_owned(),
        event: "phx_leave".to_owned(),
        payload: json!({}),
        msg_ref: Some(msg_ref.to_string()),
    }
}

/// What an incoming frame means for a subscriber.
#[derive(Clone, Debug, PartialEq)]
pub enum Incoming<T> {
    Insert(T),
    JoinFailed(String),
    Ignored,
}

/// Decode a socket frame addressed to `topic`.
///
/// Accepts the `postgres_changes` envelope (`payload.data.record`) and the
/// older bare `INSERT` event (`payload.record`).
#[must_use]
pub fn decode_incoming<T: DeserializeOwned>(text: &str, topic: &str) -> Incoming<T> {
    let Ok(msg) = serde_json::from_str::<PhoenixMessage>(text) else {
        return Incoming::Ignored;
    };
    if msg.topic != topic {
        return Incoming::Ignored;
    }
    match msg.event.as_str() {
        "postgres_changes" => {
            let data = &msg.payload["data"];
            if data["type"] != "INSERT" {
                return Incoming::Ignored;
            }
            record(&data["record"])
        }
        "INSERT" => record(&msg.payload["record"]),
        "phx_reply" if msg.payload["status"] == "error" => {
            let reason = msg.payload["response"]["reason"].as_str().unwrap_or("join rejected");
            Incoming::JoinFailed(reason.to_owned())
        }
        "phx_error" => Incoming::JoinFailed("channel error".to_owned()),
        _ => Incoming::Ignored,
    }
}

fn record<T: DeserializeOwned>(value: &Value) -> Incoming<T> {
    match T::deserialize(value) {
        Ok(row) => Incoming::Insert(row),
        Err(e) => {
            log::debug!("realtime record skipped: {e}");
            Incoming::Ignored
        }
    }
}

#[cfg(any(test, feature = "csr"))]
fn next_backoff(current_ms: u32) -> u32 {
    current_ms.saturating_mul(2).min(MAX_BACKOFF_MS)
}

/// Call `on_insert` for every row inserted into `filter`'s table until the
/// returned handle is dropped.
///
/// Outside the browser this only returns an inert handle.
pub fn subscribe_inserts<T>(
    client: &SupabaseClient,
    access_token: Option<String>,
    filter: InsertFilter,
    on_insert: impl Fn(T) + 'static,
) -> Subscription
where
    T: DeserializeOwned + 'static,
{
    let config = match client.config() {
        Ok(config) => config,
        Err(e) => {
            log::warn!("realtime unavailable: {e}");
            return Subscription::noop();
        }
    };

    #[cfg(feature = "csr")]
    {
        let (stop_tx, stop_rx) = futures::channel::mpsc::unbounded::<()>();
        let url = super::supabase::realtime_url(&config.supabase_url, &config.supabase_anon_key);
        let heartbeat_ms = u32::try_from(config.realtime_heartbeat_secs.saturating_mul(1000)).unwrap_or(u32::MAX);
        leptos::task::spawn_local(socket::run(url, filter, access_token, heartbeat_ms, on_insert, stop_rx));
        Subscription::new(move || stop_tx.close_channel())
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (config, access_token, filter, on_insert);
        Subscription::noop()
    }
}

#[cfg(feature = "csr")]
mod socket {
    use std::time::Duration;

    use futures::channel::mpsc::UnboundedReceiver;
    use futures::{FutureExt, SinkExt, StreamExt};
    use gloo_net::websocket::Message;
    use gloo_net::websocket::futures::WebSocket;
    use serde::de::DeserializeOwned;

    use super::{INITIAL_BACKOFF_MS, Incoming, InsertFilter, decode_incoming, heartbeat_message, join_message, leave_message, next_backoff};

    enum Ended {
        Stopped,
        Closed,
    }

    pub(super) async fn run<T: DeserializeOwned>(
        url: String,
        filter: InsertFilter,
        access_token: Option<String>,
        heartbeat_ms: u32,
        on_insert: impl Fn(T),
        mut stop_rx: UnboundedReceiver<()>,
    ) {
        let topic = filter.topic();
        let mut backoff_ms = INITIAL_BACKOFF_MS;
        loop {
            match connect_and_run(&url, &filter, access_token.as_deref(), heartbeat_ms, &on_insert, &mut stop_rx).await {
                Ok(Ended::Stopped) => {
                    log::info!("realtime channel {topic} left");
                    return;
                }
                Ok(Ended::Closed) => {
                    log::info!("realtime channel {topic} disconnected");
                    backoff_ms = INITIAL_BACKOFF_MS;
                }
                Err(e) => log::warn!("realtime channel {topic} failed: {e}"),
            }

            let sleep = gloo_timers::future::sleep(Duration::from_millis(u64::from(backoff_ms))).fuse();
            futures::pin_mut!(sleep);
            futures::select! {
                () = sleep => {}
                _ = stop_rx.next() => return,
            }
            backoff_ms = next_backoff(backoff_ms);
        }
    }

    async fn connect_and_run<T: DeserializeOwned>(
        url: &str,
        filter: &InsertFilter,
        access_token: Option<&str>,
        heartbeat_ms: u32,
        on_insert: &impl Fn(T),
        stop_rx: &mut UnboundedReceiver<()>,
    ) -> Result<Ended, String> {
        let topic = filter.topic();
        let ws = WebSocket::open(url).map_err(|e| e.to_string())?;
        let (mut write, read) = ws.split();
        let mut read = read.fuse();
        let mut msg_ref: u64 = 1;

        write
            .send(Message::Text(join_message(filter, access_token, msg_ref).to_text()))
            .await
            .map_err(|e| e.to_string())?;
        log::info!("realtime channel {topic} joined");

        let mut ticker = gloo_timers::future::IntervalStream::new(heartbeat_ms).fuse();
        loop {
            futures::select! {
                msg = read.next() => match msg {
                    Some(Ok(Message::Text(text))) => match decode_incoming::<T>(&text, &topic) {
                        Incoming::Insert(row) => on_insert(row),
                        Incoming::JoinFailed(reason) => return Err(reason),
                        Incoming::Ignored => {}
                    },
                    Some(Ok(Message::Bytes(_))) => {}
                    Some(Err(e)) => return Err(e.to_string()),
                    None => return Ok(Ended::Closed),
                },
                _ = ticker.next() => {
                    msg_ref += 1;
                    write
                        .send(Message::Text(heartbeat_message(msg_ref).to_text()))
                        .await
                        .map_err(|e| e.to_string())?;
                }
                _ = stop_rx.next() => {
                    msg_ref += 1;
                    let _ = write.send(Message::Text(leave_message(&topic, msg_ref).to_text())).await;
                    let _ = write.close().await;
                    return Ok(Ended::Stopped);
                }
            }
        }
    }
}
