use {
    serde::{Deserialize, Deserializer, Serialize},
    std::collections::HashMap,
    stripe::{CheckoutSessionMode, CustomerId, Expandable, PriceId, ProductId, SubscriptionId},
};

pub type Metadata = HashMap<String, String>;

/// Product as carried in `product.*` events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub metadata: Metadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recurring {
    pub interval: String,
    #[serde(default)]
    pub interval_count: Option<u64>,
    #[serde(default)]
    pub trial_period_days: Option<u32>,
}

/// Price as carried in `price.*` events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Price {
    pub id: PriceId,
    pub product: Expandable<stripe::Product>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub unit_amount: Option<i64>,
    #[serde(rename = "type", default)]
    pub price_type: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub recurring: Option<Recurring>,
    #[serde(default)]
    pub metadata: Metadata,
}

impl Price {
    pub fn product_id(&self) -> ProductId {
        match &self.product {
            Expandable::Id(id) => id.clone(),
            Expandable::Object(product) => product.id.clone(),
        }
    }
}

/// Subscription as carried in `customer.subscription.*` events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub customer: Expandable<stripe::Customer>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub metadata: Metadata,
}

impl Subscription {
    pub fn customer_id(&self) -> CustomerId {
        customer_id(&self.customer)
    }
}

/// Checkout session as carried in `checkout.session.completed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    /// `None` when absent or not a mode this crate knows.
    #[serde(default, deserialize_with = "lenient_mode")]
    pub mode: Option<CheckoutSessionMode>,
    #[serde(default)]
    pub customer: Option<Expandable<stripe::Customer>>,
    #[serde(default)]
    pub subscription: Option<Expandable<stripe::Subscription>>,
}

impl CheckoutSession {
    pub fn is_subscription(&self) -> bool {
        self.mode == Some(CheckoutSessionMode::Subscription)
    }

    pub fn customer_id(&self) -> Option<CustomerId> {
        self.customer.as_ref().map(customer_id)
    }

    pub fn subscription_id(&self) -> Option<SubscriptionId> {
        self.subscription.as_ref().map(|e| match e {
            Expandable::Id(id) => id.clone(),
            Expandable::Object(sub) => sub.id.clone(),
        })
    }
}

fn lenient_mode<'de, D>(deserializer: D) -> Result<Option<CheckoutSessionMode>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| serde_json::from_value(v).ok()))
}

fn customer_id(customer: &Expandable<stripe::Customer>) -> CustomerId {
    match customer {
        Expandable::Id(id) => id.clone(),
        Expandable::Object(c) => c.id.clone(),
    }
}
