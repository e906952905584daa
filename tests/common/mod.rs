#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use billing_hooks::AppState;
use billing_hooks::adapters::stripe::signature::signature_header;
use billing_hooks::domain::billing::{Price, Product};
use billing_hooks::domain::error::WebhookError;
use billing_hooks::domain::records::{BillingRecords, RecordFuture};
use std::sync::{Arc, Mutex};
use stripe::{CustomerId, SubscriptionId};
use tower::ServiceExt;

pub const SECRET: &str = "whsec_test_secret";
pub const WEBHOOK_PATH: &str = "/stripe/webhook";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    UpsertProduct(String),
    DeleteProduct(String),
    UpsertPrice(String),
    DeletePrice(String),
    SubscriptionChange {
        subscription_id: String,
        customer_id: String,
        is_new: bool,
    },
}

/// Records every call; optionally fails each one with a fixed message.
#[derive(Default)]
pub struct RecordingRecords {
    calls: Mutex<Vec<Call>>,
    fail_with: Option<String>,
}

impl RecordingRecords {
    pub fn failing(message: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_with: Some(message.to_string()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> RecordFuture<'_> {
        self.calls.lock().unwrap().push(call);
        let result = match &self.fail_with {
            Some(msg) => Err(WebhookError::Record(msg.clone())),
            None => Ok(()),
        };
        Box::pin(async move { result })
    }
}

impl BillingRecords for RecordingRecords {
    fn upsert_product<'a>(&'a self, product: &'a Product) -> RecordFuture<'a> {
        self.record(Call::UpsertProduct(product.id.to_string()))
    }

    fn delete_product<'a>(&'a self, product: &'a Product) -> RecordFuture<'a> {
        self.record(Call::DeleteProduct(product.id.to_string()))
    }

    fn upsert_price<'a>(&'a self, price: &'a Price) -> RecordFuture<'a> {
        self.record(Call::UpsertPrice(price.id.to_string()))
    }

    fn delete_price<'a>(&'a self, price: &'a Price) -> RecordFuture<'a> {
        self.record(Call::DeletePrice(price.id.to_string()))
    }

    fn manage_subscription_status_change<'a>(
        &'a self,
        subscription_id: &'a SubscriptionId,
        customer_id: &'a CustomerId,
        is_new: bool,
    ) -> RecordFuture<'a> {
        self.record(Call::SubscriptionChange {
            subscription_id: subscription_id.to_string(),
            customer_id: customer_id.to_string(),
            is_new,
        })
    }
}

pub fn app_with(records: Arc<dyn BillingRecords>, secret: &str, tolerance_secs: i64) -> Router {
    let state = AppState {
        records,
        stripe_webhook_secret: secret.into(),
        tolerance_secs,
    };
    billing_hooks::router(state, WEBHOOK_PATH)
}

pub fn app(records: Arc<RecordingRecords>) -> Router {
    app_with(records, SECRET, 300)
}

pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Envelope the way Stripe sends it.
pub fn event(event_type: &str, object: serde_json::Value) -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({
        "id": "evt_test_1",
        "object": "event",
        "api_version": "2024-06-20",
        "created": 1_700_000_000,
        "livemode": false,
        "pending_webhooks": 1,
        "type": event_type,
        "data": { "object": object },
    }))
    .unwrap()
}

pub fn product_object(id: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "object": "product",
        "active": true,
        "name": "Pro plan",
        "description": "Everything",
        "images": [],
        "metadata": {},
    })
}

pub fn price_object(id: &str, product: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "object": "price",
        "active": true,
        "currency": "usd",
        "product": product,
        "type": "recurring",
        "unit_amount": 1500,
        "recurring": { "interval": "month", "interval_count": 1, "trial_period_days": null },
        "metadata": {},
    })
}

pub fn subscription_object(id: &str, customer: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "object": "subscription",
        "customer": customer,
        "status": "active",
        "metadata": {},
    })
}

pub fn checkout_session_object(mode: &str) -> serde_json::Value {
    let (customer, subscription) = if mode == "subscription" {
        (serde_json::json!("cus_123"), serde_json::json!("sub_123"))
    } else {
        (serde_json::Value::Null, serde_json::Value::Null)
    };
    serde_json::json!({
        "id": "cs_test_123",
        "object": "checkout.session",
        "mode": mode,
        "customer": customer,
        "subscription": subscription,
    })
}

pub fn signed_request(body: Vec<u8>, secret: &str, timestamp: i64) -> Request<Body> {
    let header = signature_header(&body, secret, timestamp).unwrap();
    Request::post(WEBHOOK_PATH)
        .header("stripe-signature", header)
        .body(Body::from(body))
        .unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

/// Sign with the shared secret at the current time and send.
pub async fn deliver(app: Router, body: Vec<u8>) -> (StatusCode, String) {
    send(app, signed_request(body, SECRET, now())).await
}
