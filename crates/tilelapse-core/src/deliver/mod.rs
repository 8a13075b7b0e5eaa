//! Hand-off of a finished video to a messaging endpoint.

mod telegram;

use std::fmt;
use std::path::Path;

pub use telegram::{TelegramCredentials, TelegramDelivery};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered,
    /// Nothing was attempted, e.g. credentials are not configured.
    Skipped(String),
    Failed(String),
}

impl fmt::Display for DeliveryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delivered => write!(f, "delivered"),
            Self::Skipped(reason) => write!(f, "skipped ({reason})"),
            Self::Failed(reason) => write!(f, "failed ({reason})"),
        }
    }
}

/// Receives a finished video and a caption. Never fails the run: problems
/// are reported through the returned outcome.
pub trait DeliveryAdapter: Send + Sync {
    fn deliver(&self, video: &Path, caption: &str) -> DeliveryOutcome;
}

/// Delivery switched off.
pub struct NoDelivery;

impl DeliveryAdapter for NoDelivery {
    fn deliver(&self, _video: &Path, _caption: &str) -> DeliveryOutcome {
        DeliveryOutcome::Skipped("delivery disabled".into())
    }
}
