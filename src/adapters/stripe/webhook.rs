use {
    super::signature::{SIGNATURE_HEADER, verify_signature},
    crate::{
        AppState,
        adapters::api_errors::ApiError,
        domain::{
            error::WebhookError,
            event::{EventKind, StripeEvent},
        },
        services::dispatch::{DispatchResult, dispatch_event},
    },
    axum::{Json, body::Bytes, extract::State, http::HeaderMap},
    chrono::Utc,
};

#[tracing::instrument(
    name = "webhook",
    skip_all,
    fields(event_id = tracing::field::Empty, event_type = tracing::field::Empty)
)]
pub async fn wh_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<serde_json::Value>, ApiError> {
    let sig = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let secret = &*state.stripe_webhook_secret;
    if sig.is_empty() || secret.is_empty() {
        return Err(WebhookError::MissingSecret.into());
    }

    verify_signature(
        &body,
        sig,
        secret,
        state.tolerance_secs,
        Utc::now().timestamp(),
    )?;

    let event: StripeEvent = serde_json::from_slice(&body).map_err(WebhookError::from)?;

    tracing::Span::current()
        .record("event_id", tracing::field::display(&event.id))
        .record("event_type", tracing::field::display(&event.event_type));
    tracing::info!(livemode = event.livemode, created = event.created, "webhook received");

    let kind = EventKind::try_from(event.event_type.as_str())?;

    match dispatch_event(&*state.records, kind, event.data.object).await? {
        DispatchResult::Applied => tracing::info!("records updated"),
        DispatchResult::Ignored => tracing::info!("relevant event, no record change"),
    }

    Ok(Json(serde_json::json!({"received": true})))
}
