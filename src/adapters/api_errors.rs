use crate::domain::error::WebhookError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Newtype over the domain error so it can become an axum response.
pub struct ApiError(pub WebhookError);

impl From<WebhookError> for ApiError {
    fn from(err: WebhookError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Plain-text body sent back to the provider.
    pub fn body(&self) -> String {
        match &self.0 {
            WebhookError::MissingSecret | WebhookError::UnsupportedEventType(_) => {
                self.0.to_string()
            }
            err => format!("Webhook Error: {err}"),
        }
    }
}

// Every failure is a 400 so the provider redelivers; nothing maps to 5xx.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = self.body();
        match &self.0 {
            WebhookError::MissingSecret => tracing::warn!("webhook secret or signature missing"),
            WebhookError::Signature(msg) => tracing::warn!(error = %msg, "signature rejected"),
            WebhookError::UnsupportedEventType(t) => {
                tracing::warn!(event_type = %t, "unsupported event type")
            }
            err => tracing::error!(error = %err, "webhook processing failed"),
        }

        (StatusCode::BAD_REQUEST, body).into_response()
    }
}
