pub mod adapters;
pub mod config;
pub mod domain;
pub mod infra;
pub mod services;

use {
    axum::{
        Router,
        extract::DefaultBodyLimit,
        http::StatusCode,
        routing::{get, post},
    },
    domain::records::BillingRecords,
    std::{sync::Arc, time::Duration},
    tower_http::timeout::TimeoutLayer,
};

const BODY_LIMIT: usize = 64 * 1024; // Stripe events are typically <20 KB
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct AppState {
    pub records: Arc<dyn BillingRecords>,
    pub stripe_webhook_secret: Arc<str>,
    pub tolerance_secs: i64,
}

pub fn router(state: AppState, webhook_path: &str) -> Router {
    Router::new()
        .route("/", get(|| async { "ok" }))
        .route(
            webhook_path,
            post(adapters::stripe::webhook::wh_handler),
        )
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            REQUEST_TIMEOUT,
        ))
        .with_state(state)
}
