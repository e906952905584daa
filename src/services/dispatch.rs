use {
    crate::domain::{
        billing::{CheckoutSession, Price, Product, Subscription},
        error::WebhookError,
        event::EventKind,
        records::BillingRecords,
    },
    serde::de::DeserializeOwned,
};

#[derive(Debug, PartialEq, Eq)]
pub enum DispatchResult {
    /// A record-mutation call was made and succeeded.
    Applied,
    /// Relevant event that needs no record change (non-subscription checkout).
    Ignored,
}

/// Decode `object` as the payload `kind` carries. An `object` tag naming a
/// different resource means the allow-list and the routing table disagree.
fn decode<T: DeserializeOwned>(
    kind: EventKind,
    object: serde_json::Value,
) -> Result<T, WebhookError> {
    let expected = kind.object_name();
    if let Some(tag) = object.get("object").and_then(|v| v.as_str()) {
        if tag != expected {
            tracing::error!(
                event_type = %kind,
                object = tag,
                expected,
                "relevant event has no handler for its object"
            );
            return Err(WebhookError::UnhandledRelevantEvent(kind));
        }
    }
    Ok(serde_json::from_value(object)?)
}

/// Route `object` to the record call for `kind`.
pub async fn dispatch_event(
    records: &dyn BillingRecords,
    kind: EventKind,
    object: serde_json::Value,
) -> Result<DispatchResult, WebhookError> {
    use EventKind::*;

    match kind {
        ProductCreated | ProductUpdated => {
            let product: Product = decode(kind, object)?;
            records.upsert_product(&product).await?;
        }
        PriceCreated | PriceUpdated => {
            let price: Price = decode(kind, object)?;
            records.upsert_price(&price).await?;
        }
        PriceDeleted => {
            let price: Price = decode(kind, object)?;
            records.delete_price(&price).await?;
        }
        ProductDeleted => {
            let product: Product = decode(kind, object)?;
            records.delete_product(&product).await?;
        }
        SubscriptionCreated | SubscriptionUpdated | SubscriptionDeleted => {
            let subscription: Subscription = decode(kind, object)?;
            let customer_id = subscription.customer_id();
            records
                .manage_subscription_status_change(
                    &subscription.id,
                    &customer_id,
                    kind == SubscriptionCreated,
                )
                .await?;
        }
        CheckoutSessionCompleted => {
            let session: CheckoutSession = decode(kind, object)?;
            if !session.is_subscription() {
                tracing::debug!(session_id = %session.id, "checkout session is not a subscription");
                return Ok(DispatchResult::Ignored);
            }
            let subscription_id = session
                .subscription_id()
                .ok_or(WebhookError::MissingField("subscription"))?;
            let customer_id = session
                .customer_id()
                .ok_or(WebhookError::MissingField("customer"))?;
            records
                .manage_subscription_status_change(&subscription_id, &customer_id, true)
                .await?;
        }
    }

    Ok(DispatchResult::Applied)
}
