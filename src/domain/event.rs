use {
    super::error::WebhookError,
    super::id::EventId,
    serde::Deserialize,
    std::fmt,
};

/// Verified event envelope. `data.object` stays as JSON until the event
/// kind is known to be relevant.
#[derive(Debug, Deserialize)]
pub struct StripeEvent {
    pub id: EventId,
    #[serde(rename = "type")]
    pub event_type: String,
    pub created: i64,
    #[serde(default)]
    pub livemode: bool,
    pub data: StripeEventData,
}

#[derive(Debug, Deserialize)]
pub struct StripeEventData {
    pub object: serde_json::Value,
}

/// The event types this service acts on. Anything that does not map to a
/// variant is rejected before dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    ProductCreated,
    ProductUpdated,
    ProductDeleted,
    PriceCreated,
    PriceUpdated,
    PriceDeleted,
    CheckoutSessionCompleted,
    SubscriptionCreated,
    SubscriptionUpdated,
    SubscriptionDeleted,
}

impl EventKind {
    pub const ALL: [EventKind; 10] = [
        Self::ProductCreated,
        Self::ProductUpdated,
        Self::ProductDeleted,
        Self::PriceCreated,
        Self::PriceUpdated,
        Self::PriceDeleted,
        Self::CheckoutSessionCompleted,
        Self::SubscriptionCreated,
        Self::SubscriptionUpdated,
        Self::SubscriptionDeleted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProductCreated => "product.created",
            Self::ProductUpdated => "product.updated",
            Self::ProductDeleted => "product.deleted",
            Self::PriceCreated => "price.created",
            Self::PriceUpdated => "price.updated",
            Self::PriceDeleted => "price.deleted",
            Self::CheckoutSessionCompleted => "checkout.session.completed",
            Self::SubscriptionCreated => "customer.subscription.created",
            Self::SubscriptionUpdated => "customer.subscription.updated",
            Self::SubscriptionDeleted => "customer.subscription.deleted",
        }
    }

    /// The `object` value of the payload this kind carries.
    pub fn object_name(&self) -> &'static str {
        match self {
            Self::ProductCreated | Self::ProductUpdated | Self::ProductDeleted => "product",
            Self::PriceCreated | Self::PriceUpdated | Self::PriceDeleted => "price",
            Self::CheckoutSessionCompleted => "checkout.session",
            Self::SubscriptionCreated | Self::SubscriptionUpdated | Self::SubscriptionDeleted => {
                "subscription"
            }
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for EventKind {
    type Error = WebhookError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "product.created" => Ok(Self::ProductCreated),
            "product.updated" => Ok(Self::ProductUpdated),
            "product.deleted" => Ok(Self::ProductDeleted),
            "price.created" => Ok(Self::PriceCreated),
            "price.updated" => Ok(Self::PriceUpdated),
            "price.deleted" => Ok(Self::PriceDeleted),
            "checkout.session.completed" => Ok(Self::CheckoutSessionCompleted),
            "customer.subscription.created" => Ok(Self::SubscriptionCreated),
            "customer.subscription.updated" => Ok(Self::SubscriptionUpdated),
            "customer.subscription.deleted" => Ok(Self::SubscriptionDeleted),
            other => Err(WebhookError::UnsupportedEventType(other.to_string())),
        }
    }
}
