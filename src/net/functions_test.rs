use super::*;
use crate::config::ConfigError;
use futures::executor::block_on;

// =============================================================
// Request bodies
// =============================================================

#[test]
fn quiz_body_names_topic_and_count() {
    assert_eq!(quiz_request_body("candlesticks", 5), json!({ "topic": "candlesticks", "numQuestions": 5 }));
}

#[test]
fn order_body_carries_plan_price() {
    let plan = crate::content::plans::find("pro-monthly").expect("plan");
    let body = order_request_body(plan);
    assert_eq!(body["planId"], "pro-monthly");
    assert_eq!(body["amount"], plan.price_minor);
    assert_eq!(body["currency"], plan.currency);
}

#[test]
fn verify_body_is_the_checkout_payload_verbatim() {
    let payload = json!({
        "razorpay_payment_id": "pay_1",
        "razorpay_order_id": "order_1",
        "razorpay_signature": "sig",
    });
    assert_eq!(verify_request_body(&payload), payload);
}

#[test]
fn verify_body_keeps_non_object_payload_untouched() {
    assert_eq!(verify_request_body(&json!("opaque")), json!("opaque"));
    assert_eq!(verify_request_body(&Value::Null), Value::Null);
}

// =============================================================
// Responses
// =============================================================

#[test]
fn payment_order_accepts_gateway_and_camel_case_ids() {
    let gateway: PaymentOrder =
        serde_json::from_value(json!({ "id": "order_9", "amount": 49_900, "currency": "INR" })).expect("order");
    let camel: PaymentOrder =
        serde_json::from_value(json!({ "orderId": "order_9", "amount": 49_900, "currency": "INR" })).expect("order");
    assert_eq!(gateway, camel);
}

#[test]
fn verdict_defaults_to_failure() {
    let verdict: PaymentVerdict = serde_json::from_value(json!({})).expect("verdict");
    assert!(!verdict.success);
    assert_eq!(verdict.message, None);
}

#[test]
fn invoke_without_config_is_not_configured() {
    let client = SupabaseClient::unconfigured(ConfigError::Missing { var: "CANDLE_SUPABASE_URL" });
    let result = block_on(generate_quiz(&client, None, "risk"));
    assert!(matches!(result, Err(BackendError::NotConfigured(_))));
}
