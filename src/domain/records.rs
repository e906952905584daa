use {
    super::billing::{Price, Product},
    super::error::WebhookError,
    std::{future::Future, pin::Pin},
    stripe::{CustomerId, SubscriptionId},
};

pub type RecordFuture<'a> = Pin<Box<dyn Future<Output = Result<(), WebhookError>> + Send + 'a>>;

/// Record-mutation side of the webhook. Implementations own storage; the
/// handler only decides which call to make. Failures should be reported as
/// `WebhookError::Record`, whose message is returned to the provider.
pub trait BillingRecords: Send + Sync {
    fn upsert_product<'a>(&'a self, product: &'a Product) -> RecordFuture<'a>;

    fn delete_product<'a>(&'a self, product: &'a Product) -> RecordFuture<'a>;

    fn upsert_price<'a>(&'a self, price: &'a Price) -> RecordFuture<'a>;

    fn delete_price<'a>(&'a self, price: &'a Price) -> RecordFuture<'a>;

    /// `is_new` is true when the subscription was just created, either by
    /// `customer.subscription.created` or a completed subscription checkout.
    fn manage_subscription_status_change<'a>(
        &'a self,
        subscription_id: &'a SubscriptionId,
        customer_id: &'a CustomerId,
        is_new: bool,
    ) -> RecordFuture<'a>;
}
