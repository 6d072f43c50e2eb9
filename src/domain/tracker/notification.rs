//! Notification decisions - what to announce after a tracking cycle

use crate::shared::types::{TrackedProduct, Verbosity};

/// One message derived from diffing the two latest samples
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// First-ever observation of a product
    Configured { price: String },
    PriceChange { old: String, new: String },
    AvailabilityChange { old: String, new: String, price: String },
    /// Routine no-change update, emitted only at the higher verbosity level
    GeneralUpdate { price: String },
}

impl Notification {
    /// Message body as rendered into the embed description
    pub fn body(&self) -> String {
        match self {
            Self::Configured { price } => format!("(Configured) `{price}`"),
            Self::PriceChange { old, new } => format!("Price Change! `{old}` => `{new}`"),
            Self::AvailabilityChange { old, new, price } => {
                format!("(`{price}`) Availability Change! `{old}` => `{new}`")
            }
            Self::GeneralUpdate { price } => format!("General Update... `{price}`"),
        }
    }

    /// Whether the message broadcasts to all channel subscribers
    pub fn mention_everyone(&self) -> bool {
        matches!(self, Self::PriceChange { .. } | Self::AvailabilityChange { .. })
    }
}

/// Decide which notifications a freshly appended sample warrants.
///
/// Price and availability changes are independent; both fire together when
/// both fields changed.
pub fn decide(product: &TrackedProduct, verbosity: Verbosity) -> Vec<Notification> {
    let Some(latest) = product.latest() else {
        return Vec::new();
    };
    if product.history.len() == 1 {
        return vec![Notification::Configured {
            price: latest.price.clone(),
        }];
    }
    let Some(previous) = product.previous() else {
        return Vec::new();
    };

    let mut decisions = Vec::new();
    if latest.price != previous.price {
        decisions.push(Notification::PriceChange {
            old: previous.price.clone(),
            new: latest.price.clone(),
        });
    }
    if latest.availability != previous.availability {
        decisions.push(Notification::AvailabilityChange {
            old: previous.availability.clone(),
            new: latest.availability.clone(),
            price: latest.price.clone(),
        });
    }
    if decisions.is_empty() && verbosity == Verbosity::Everything {
        decisions.push(Notification::GeneralUpdate {
            price: latest.price.clone(),
        });
    }
    decisions
}

/// Render availability as a code block. Case-insensitive, first match wins:
/// "left in stock" > "in stock" > "unavailable".
pub fn format_availability(availability: &str) -> Option<String> {
    let lower = availability.to_lowercase();
    if lower.contains("left in stock") {
        Some(format!("```arm\n{}```", availability.replace(' ', "_")))
    } else if lower.contains("in stock") {
        Some(format!("```diff\n+{availability}```"))
    } else if lower.contains("unavailable") {
        Some(format!("```diff\n-{}```", availability.trim_end_matches('.')))
    } else {
        None
    }
}
