use {super::event::EventKind, thiserror::Error};

#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("Webhook secret not found.")]
    MissingSecret,

    #[error("{0}")]
    Signature(String),

    #[error("{0}")]
    Payload(#[from] serde_json::Error),

    #[error("Unsupported event type: {0}")]
    UnsupportedEventType(String),

    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("Unhandled relevant event: {0}")]
    UnhandledRelevantEvent(EventKind),

    /// Failure reported by a `BillingRecords` implementation.
    #[error("{0}")]
    Record(String),
}
