use {
    crate::domain::{
        billing::{Price, Product},
        error::WebhookError,
        records::{BillingRecords, RecordFuture},
    },
    std::collections::HashMap,
    stripe::{CustomerId, SubscriptionId},
    tokio::sync::RwLock,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionLink {
    pub customer_id: CustomerId,
    /// Set once any event reported the subscription as newly created.
    pub created_via_event: bool,
    /// Status changes seen after the first one.
    pub updates: u32,
}

/// Process-local `BillingRecords`. Keeps the latest copy of every product
/// and price and which customer owns each subscription. Contents are lost
/// on restart.
#[derive(Debug, Default)]
pub struct InMemoryRecords {
    products: RwLock<HashMap<String, Product>>,
    prices: RwLock<HashMap<String, Price>>,
    subscriptions: RwLock<HashMap<String, SubscriptionLink>>,
}

impl InMemoryRecords {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn product(&self, id: &str) -> Option<Product> {
        self.products.read().await.get(id).cloned()
    }

    pub async fn price(&self, id: &str) -> Option<Price> {
        self.prices.read().await.get(id).cloned()
    }

    pub async fn subscription(&self, id: &str) -> Option<SubscriptionLink> {
        self.subscriptions.read().await.get(id).cloned()
    }

    pub async fn product_count(&self) -> usize {
        self.products.read().await.len()
    }

    pub async fn price_count(&self) -> usize {
        self.prices.read().await.len()
    }

    pub async fn subscription_count(&self) -> usize {
        self.subscriptions.read().await.len()
    }

    async fn apply_subscription_change(
        &self,
        subscription_id: &SubscriptionId,
        customer_id: &CustomerId,
        is_new: bool,
    ) -> Result<(), WebhookError> {
        let mut subscriptions = self.subscriptions.write().await;

        match subscriptions.get_mut(subscription_id.as_str()) {
            None => {
                subscriptions.insert(
                    subscription_id.to_string(),
                    SubscriptionLink {
                        customer_id: customer_id.clone(),
                        created_via_event: is_new,
                        updates: 0,
                    },
                );
            }
            Some(link) if link.customer_id != *customer_id => {
                return Err(WebhookError::Record(format!(
                    "subscription {subscription_id} belongs to customer {}, not {customer_id}",
                    link.customer_id
                )));
            }
            Some(link) => {
                link.created_via_event |= is_new;
                link.updates += 1;
            }
        }

        tracing::info!(
            subscription_id = %subscription_id,
            customer_id = %customer_id,
            is_new,
            "subscription status change recorded"
        );
        Ok(())
    }
}

impl BillingRecords for InMemoryRecords {
    fn upsert_product<'a>(&'a self, product: &'a Product) -> RecordFuture<'a> {
        Box::pin(async move {
            self.products
                .write()
                .await
                .insert(product.id.to_string(), product.clone());
            tracing::info!(product_id = %product.id, "product upserted");
            Ok(())
        })
    }

    fn delete_product<'a>(&'a self, product: &'a Product) -> RecordFuture<'a> {
        Box::pin(async move {
            let removed = self
                .products
                .write()
                .await
                .remove(product.id.as_str())
                .is_some();
            tracing::info!(product_id = %product.id, removed, "product deleted");
            Ok(())
        })
    }

    fn upsert_price<'a>(&'a self, price: &'a Price) -> RecordFuture<'a> {
        Box::pin(async move {
            // Prices may arrive before their product; store them regardless.
            self.prices
                .write()
                .await
                .insert(price.id.to_string(), price.clone());
            tracing::info!(price_id = %price.id, product_id = %price.product_id(), "price upserted");
            Ok(())
        })
    }

    fn delete_price<'a>(&'a self, price: &'a Price) -> RecordFuture<'a> {
        Box::pin(async move {
            let removed = self
                .prices
                .write()
                .await
                .remove(price.id.as_str())
                .is_some();
            tracing::info!(price_id = %price.id, removed, "price deleted");
            Ok(())
        })
    }

    fn manage_subscription_status_change<'a>(
        &'a self,
        subscription_id: &'a SubscriptionId,
        customer_id: &'a CustomerId,
        is_new: bool,
    ) -> RecordFuture<'a> {
        Box::pin(self.apply_subscription_change(subscription_id, customer_id, is_new))
    }
}
