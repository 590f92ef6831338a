//! Checkout widget bridge and the plan purchase flow.
//!
//! ARCHITECTURE
//! ============
//! A purchase is three steps: the backend creates an order for the plan,
//! the hosted checkout widget collects payment for that order, and the
//! widget's success payload goes back to the backend for signature
//! verification. Only the widget step touches the page.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "payment_test.rs"]
mod payment_test;

use futures::channel::oneshot;
use serde::Serialize;
use serde_json::Value;

use super::error::PaymentError;
use super::functions::{self, PaymentOrder, PaymentVerdict};
use super::supabase::SupabaseClient;
use super::types::Session;
use crate::content::plans::Plan;

const MERCHANT_NAME: &str = "Candle Academy";
const THEME_COLOR: &str = "#16a34a";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CheckoutPrefill {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CheckoutTheme {
    pub color: String,
}

/// Options handed to the checkout widget constructor. Handler callbacks are
/// attached separately.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CheckoutOptions {
    pub key: String,
    pub amount: u64,
    pub currency: String,
    pub name: String,
    pub description: String,
    pub order_id: String,
    pub prefill: CheckoutPrefill,
    pub theme: CheckoutTheme,
}

impl CheckoutOptions {
    #[must_use]
    pub fn for_order(key: &str, order: &PaymentOrder, plan: &Plan, session: &Session) -> Self {
        Self {
            key: key.to_owned(),
            amount: order.amount,
            currency: order.currency.clone(),
            name: MERCHANT_NAME.to_owned(),
            description: plan.name.to_owned(),
            order_id: order.id.clone(),
            prefill: CheckoutPrefill { email: session.user.email.clone(), name: Some(session.user.display_name()) },
            theme: CheckoutTheme { color: THEME_COLOR.to_owned() },
        }
    }
}

/// Outcome reported by the widget.
pub type CheckoutResult = Result<Value, PaymentError>;

/// Callback the widget fires.
#[derive(Clone, Debug, PartialEq)]
pub enum WidgetEvent {
    Succeeded(Value),
    Failed(String),
    Dismissed,
}

/// Folds widget events into the single checkout result.
///
/// A failed attempt leaves the modal open for another try, so only success
/// or dismissal settle checkout. Dismissing after a failure reports that
/// failure. Events after settling are ignored.
#[derive(Debug, Default)]
pub struct CheckoutTracker {
    last_failure: Option<String>,
    settled: bool,
}

impl CheckoutTracker {
    pub fn observe(&mut self, event: WidgetEvent) -> Option<CheckoutResult> {
        if self.settled {
            return None;
        }
        match event {
            WidgetEvent::Failed(reason) => {
                self.last_failure = Some(reason);
                None
            }
            WidgetEvent::Succeeded(payload) => {
                self.settled = true;
                Some(Ok(payload))
            }
            WidgetEvent::Dismissed => {
                self.settled = true;
                Some(Err(self.last_failure.take().map_or(PaymentError::Dismissed, PaymentError::Failed)))
            }
        }
    }
}

/// Open the checkout widget; `on_result` fires once with the success
/// payload or the reason checkout ended.
///
/// # Errors
///
/// Returns `Unavailable` when the widget script is not loaded or outside
/// the browser. `on_result` is not called in that case.
pub fn open_checkout(options: &CheckoutOptions, on_result: impl FnOnce(CheckoutResult) + 'static) -> Result<(), PaymentError> {
    #[cfg(feature = "csr")]
    {
        widget::open(options, on_result)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (options, on_result);
        Err(PaymentError::Unavailable("checkout requires a browser".to_owned()))
    }
}

/// Interpret the backend's verification verdict.
///
/// # Errors
///
/// Returns `VerificationRejected` with the backend's reason when it did not
/// accept the payment.
pub fn accept_verdict(verdict: PaymentVerdict) -> Result<PaymentVerdict, PaymentError> {
    if verdict.success {
        Ok(verdict)
    } else {
        Err(PaymentError::VerificationRejected(
            verdict.message.unwrap_or_else(|| "signature mismatch".to_owned()),
        ))
    }
}

/// Buy `plan` for the signed-in user: order, checkout, verification.
///
/// # Errors
///
/// Returns the first failing step's error.
pub async fn purchase_plan(client: &SupabaseClient, session: &Session, plan: &Plan) -> Result<PaymentVerdict, PaymentError> {
    let key = client
        .config()?
        .payment_key_id
        .clone()
        .ok_or_else(|| PaymentError::Unavailable("payment key not configured".to_owned()))?;
    let token = Some(session.access_token.as_str());

    let order = functions::create_payment_order(client, token, plan).await?;
    log::info!("payment order {} created for plan {}", order.id, plan.id);

    let (tx, rx) = oneshot::channel::<CheckoutResult>();
    open_checkout(&CheckoutOptions::for_order(&key, &order, plan, session), move |result| {
        let _ = tx.send(result);
    })?;
    let payload = rx.await.map_err(|_| PaymentError::Dismissed)??;

    log::info!("verifying payment for order {} (plan {})", order.id, plan.id);
    let verdict = functions::verify_payment(client, token, &payload).await?;
    accept_verdict(verdict)
}

#[cfg(feature = "csr")]
mod widget {
    use std::cell::RefCell;
    use std::rc::Rc;

    use js_sys::{Array, Function, JSON, Reflect};
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    use super::{CheckoutOptions, CheckoutResult, CheckoutTracker, WidgetEvent};
    use crate::net::error::PaymentError;

    const WIDGET_GLOBAL: &str = "Razorpay";

    struct Pending {
        tracker: CheckoutTracker,
        on_result: Option<Box<dyn FnOnce(CheckoutResult)>>,
    }

    type Shared = Rc<RefCell<Pending>>;

    fn unavailable(what: &str) -> PaymentError {
        PaymentError::Unavailable(what.to_owned())
    }

    fn report(pending: &Shared, event: WidgetEvent) {
        let settled = {
            let mut p = pending.borrow_mut();
            p.tracker.observe(event).and_then(|result| p.on_result.take().map(|cb| (cb, result)))
        };
        if let Some((cb, result)) = settled {
            cb(result);
        }
    }

    fn js_to_json(value: &JsValue) -> serde_json::Value {
        JSON::stringify(value)
            .ok()
            .and_then(|s| s.as_string())
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or(serde_json::Value::Null)
    }

    pub(super) fn open(options: &CheckoutOptions, on_result: impl FnOnce(CheckoutResult) + 'static) -> Result<(), PaymentError> {
        let window = web_sys::window().ok_or_else(|| unavailable("no window"))?;
        let ctor: Function = Reflect::get(&window, &JsValue::from_str(WIDGET_GLOBAL))
            .ok()
            .and_then(|v| v.dyn_into().ok())
            .ok_or_else(|| unavailable("checkout script not loaded"))?;

        let text = serde_json::to_string(options).map_err(|e| unavailable(&e.to_string()))?;
        let js_options = JSON::parse(&text).map_err(|_| unavailable("bad checkout options"))?;

        let pending: Shared =
            Rc::new(RefCell::new(Pending { tracker: CheckoutTracker::default(), on_result: Some(Box::new(on_result)) }));

        let on_success = {
            let pending = Rc::clone(&pending);
            Closure::<dyn FnMut(JsValue)>::new(move |response: JsValue| {
                report(&pending, WidgetEvent::Succeeded(js_to_json(&response)));
            })
        };
        let on_dismiss = {
            let pending = Rc::clone(&pending);
            Closure::<dyn FnMut()>::new(move || report(&pending, WidgetEvent::Dismissed))
        };
        let on_failed = {
            let pending = Rc::clone(&pending);
            Closure::<dyn FnMut(JsValue)>::new(move |response: JsValue| {
                let detail = js_to_json(&response);
                let reason = detail["error"]["description"].as_str().unwrap_or("payment failed").to_owned();
                log::warn!("checkout attempt failed: {reason}");
                report(&pending, WidgetEvent::Failed(reason));
            })
        };

        let modal: JsValue = js_sys::Object::new().into();
        let set = |target: &JsValue, key: &str, value: &JsValue| {
            Reflect::set(target, &JsValue::from_str(key), value).map_err(|_| unavailable("could not set checkout option"))
        };
        set(&modal, "ondismiss", on_dismiss.as_ref())?;
        set(&js_options, "modal", &modal)?;
        set(&js_options, "handler", on_success.as_ref())?;

        let instance = Reflect::construct(&ctor, &Array::of1(&js_options)).map_err(|_| unavailable("checkout failed to start"))?;
        if let Ok(on) = Reflect::get(&instance, &JsValue::from_str("on")).and_then(JsValue::dyn_into::<Function>) {
            let _ = on.call2(&instance, &JsValue::from_str("payment.failed"), on_failed.as_ref());
        }
        let open: Function = Reflect::get(&instance, &JsValue::from_str("open"))
            .ok()
            .and_then(|v| v.dyn_into().ok())
            .ok_or_else(|| unavailable("checkout has no open()"))?;
        open.call0(&instance).map_err(|_| unavailable("checkout failed to open"))?;

        // The widget holds these for its lifetime.
        on_success.forget();
        on_dismiss.forget();
        on_failed.forget();
        Ok(())
    }
}
