use super::*;
use crate::net::types::{MessageSender, SupportMessage};

fn chat_filter() -> InsertFilter {
    InsertFilter::table("support_messages").column_eq("user_id", "u1")
}

// =============================================================
// Encoding
// =============================================================

#[test]
fn topic_includes_filter() {
    assert_eq!(InsertFilter::table("t").topic(), "realtime:public:t");
    assert_eq!(chat_filter().topic(), "realtime:public:support_messages:user_id=eq.u1");
}

#[test]
fn join_requests_insert_changes_with_filter_and_token() {
    let msg = join_message(&chat_filter(), Some("jwt"), 1);
    assert_eq!(msg.event, "phx_join");
    assert_eq!(msg.msg_ref.as_deref(), Some("1"));
    let change = &msg.payload["config"]["postgres_changes"][0];
    assert_eq!(change["event"], "INSERT");
    assert_eq!(change["schema"], "public");
    assert_eq!(change["table"], "support_messages");
    assert_eq!(change["filter"], "user_id=eq.u1");
    assert_eq!(msg.payload["access_token"], "jwt");
}

#[test]
fn join_without_token_or_filter_omits_them() {
    let msg = join_message(&InsertFilter::table("t"), None, 1);
    assert!(msg.payload.get("access_token").is_none());
    assert!(msg.payload["config"]["postgres_changes"][0].get("filter").is_none());
}

#[test]
fn heartbeat_and_leave_wire_shape() {
    let beat: Value = serde_json::from_str(&heartbeat_message(7).to_text()).expect("json");
    assert_eq!(beat, json!({ "topic": "phoenix", "event": "heartbeat", "payload": {}, "ref": "7" }));
    let leave = leave_message("realtime:public:t", 8);
    assert_eq!(leave.event, "phx_leave");
    assert_eq!(leave.topic, "realtime:public:t");
}

// =============================================================
// Decoding
// =============================================================

fn record_json() -> Value {
    json!({
        "id": "m1",
        "user_id": "u1",
        "sender": "support",
        "body": "hello",
        "created_at": "2024-01-01T00:00:00Z"
    })
}

#[test]
fn postgres_changes_insert_decodes_record() {
    let topic = chat_filter().topic();
    let text = json!({
        "topic": topic,
        "event": "postgres_changes",
        "payload": { "data": { "type": "INSERT", "record": record_json() } },
        "ref": null
    })
    .to_string();
    match decode_incoming::<SupportMessage>(&text, &topic) {
        Incoming::Insert(msg) => {
            assert_eq!(msg.id, "m1");
            assert_eq!(msg.sender, MessageSender::Support);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn legacy_insert_event_decodes_record() {
    let topic = "realtime:public:support_messages";
    let text = json!({ "topic": topic, "event": "INSERT", "payload": { "record": record_json() } }).to_string();
    assert!(matches!(decode_incoming::<SupportMessage>(&text, topic), Incoming::Insert(_)));
}

#[test]
fn other_topics_and_change_types_are_ignored() {
    let topic = chat_filter().topic();
    let wrong_topic = json!({ "topic": "realtime:x", "event": "INSERT", "payload": { "record": record_json() } }).to_string();
    let update = json!({
        "topic": topic,
        "event": "postgres_changes",
        "payload": { "data": { "type": "UPDATE", "record": record_json() } }
    })
    .to_string();
    assert_eq!(decode_incoming::<SupportMessage>(&wrong_topic, &topic), Incoming::Ignored);
    assert_eq!(decode_incoming::<SupportMessage>(&update, &topic), Incoming::Ignored);
    assert_eq!(decode_incoming::<SupportMessage>("not json", &topic), Incoming::Ignored);
}

#[test]
fn malformed_record_is_ignored() {
    let topic = "realtime:public:t";
    let text = json!({ "topic": topic, "event": "INSERT", "payload": { "record": { "id": 5 } } }).to_string();
    assert_eq!(decode_incoming::<SupportMessage>(&text, topic), Incoming::Ignored);
}

#[test]
fn join_error_reply_reports_reason() {
    let topic = "realtime:public:t";
    let text = json!({
        "topic": topic,
        "event": "phx_reply",
        "payload": { "status": "error", "response": { "reason": "unauthorized" } },
        "ref": "1"
    })
    .to_string();
    assert_eq!(decode_incoming::<SupportMessage>(&text, topic), Incoming::JoinFailed("unauthorized".to_owned()));
}

#[test]
fn ok_reply_is_ignored() {
    let topic = "realtime:public:t";
    let text = json!({ "topic": topic, "event": "phx_reply", "payload": { "status": "ok" }, "ref": "1" }).to_string();
    assert_eq!(decode_incoming::<SupportMessage>(&text, topic), Incoming::Ignored);
}

#[test]
fn backoff_doubles_up_to_cap() {
    assert_eq!(next_backoff(1000), 2000);
    assert_eq!(next_backoff(8000), MAX_BACKOFF_MS);
    assert_eq!(next_backoff(MAX_BACKOFF_MS), MAX_BACKOFF_MS);
}

#[test]
fn unconfigured_client_returns_inert_handle() {
    let client = SupabaseClient::unconfigured(crate::config::ConfigError::Missing { var: "x" });
    let sub = subscribe_inserts::<SupportMessage>(&client, None, chat_filter(), |_| {});
    sub.cancel();
}
