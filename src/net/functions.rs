//! Edge-function calls: quiz generation and the payment order flow.
//!
//! Every function is a `POST /functions/v1/{name}` with a JSON body, sent
//! with the caller's access token so the function sees the signed-in user.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "functions_test.rs"]
mod functions_test;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use super::error::BackendError;
use super::supabase::{ApiCall, HttpMethod, SupabaseClient, function_url};
use crate::content::plans::Plan;
use crate::state::quiz::QuizQuestion;

pub const GENERATE_QUIZ: &str = "generate-quiz";
pub const CREATE_PAYMENT_ORDER: &str = "create-payment-order";
pub const VERIFY_PAYMENT: &str = "verify-payment";

/// Questions requested per quiz round.
pub const QUIZ_QUESTION_COUNT: u32 = 5;

/// Invoke the edge function `name` with a JSON `body`.
///
/// # Errors
///
/// Returns any transport, status, or decode failure.
pub async fn invoke<T: DeserializeOwned>(
    client: &SupabaseClient,
    token: Option<&str>,
    name: &str,
    body: Value,
) -> Result<T, BackendError> {
    let base = &client.config()?.supabase_url;
    let context = format!("invoke {name}");
    let call = ApiCall::new(HttpMethod::Post, function_url(base, name), &context)
        .token(token)
        .json(body);
    client.send(call).await
}

#[derive(Debug, Deserialize)]
struct GeneratedQuiz {
    #[serde(default)]
    questions: Vec<QuizQuestion>,
}

fn quiz_request_body(topic: &str, count: u32) -> Value {
    json!({ "topic": topic, "numQuestions": count })
}

/// Ask the backend to generate a quiz round for `topic`.
///
/// # Errors
///
/// Returns the invoke failure, or `Decode` if no usable question came back.
pub async fn generate_quiz(client: &SupabaseClient, token: Option<&str>, topic: &str) -> Result<Vec<QuizQuestion>, BackendError> {
    let quiz: GeneratedQuiz = invoke(client, token, GENERATE_QUIZ, quiz_request_body(topic, QUIZ_QUESTION_COUNT)).await?;
    let questions = crate::state::quiz::sanitize_questions(quiz.questions);
    if questions.is_empty() {
        return Err(BackendError::Decode {
            context: format!("invoke {GENERATE_QUIZ}"),
            message: "no usable questions returned".to_owned(),
        });
    }
    Ok(questions)
}

/// Payment order created server-side for one plan purchase.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct PaymentOrder {
    #[serde(alias = "order_id", alias = "orderId")]
    pub id: String,
    /// Minor currency units.
    pub amount: u64,
    pub currency: String,
}

fn order_request_body(plan: &Plan) -> Value {
    json!({ "planId": plan.id, "amount": plan.price_minor, "currency": plan.currency })
}

/// # Errors
///
/// Returns any invoke failure.
pub async fn create_payment_order(client: &SupabaseClient, token: Option<&str>, plan: &Plan) -> Result<PaymentOrder, BackendError> {
    invoke(client, token, CREATE_PAYMENT_ORDER, order_request_body(plan)).await
}

/// Verification verdict for a completed checkout.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct PaymentVerdict {
    #[serde(default, alias = "verified")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// The checkout payload is the request body unchanged. The plan is already
/// bound to the order created by [`create_payment_order`].
fn verify_request_body(checkout_payload: &Value) -> Value {
    checkout_payload.clone()
}

/// # Errors
///
/// Returns any invoke failure. A decoded verdict with `success == false`
/// is returned as `Ok` for the caller to report.
pub async fn verify_payment(client: &SupabaseClient, token: Option<&str>, checkout_payload: &Value) -> Result<PaymentVerdict, BackendError> {
    invoke(client, token, VERIFY_PAYMENT, verify_request_body(checkout_payload)).await
}
