use derive_more::Display;
use serde::Deserialize;

/// Stripe event identifier (`evt_xxx`). Carried for log correlation only;
/// the handler does not deduplicate on it.
#[derive(Debug, Clone, PartialEq, Eq, Display, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);
