//! Common types used across the application

use serde::{Deserialize, Serialize};

use crate::shared::errors::ConfigError;

/// Price shown when the page has no price element
pub const PRICE_UNAVAILABLE: &str = "Unavailable";

/// Availability shown when the page has no availability element
pub const AVAILABILITY_UNKNOWN: &str = "Unknown";

/// One observation of a product's price and availability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSample {
    pub price: String,
    pub availability: String,
    /// Unix seconds at observation time
    pub observed_at: i64,
}

/// Durable record for one tracked product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedProduct {
    pub key: String,
    pub title: String,
    #[serde(default)]
    pub thumbnail_url: String,
    /// 6-hex-digit accent color, fixed at first successful fetch
    pub accent_color: String,
    /// Append-only, observation time ascending
    pub history: Vec<PriceSample>,
}

impl TrackedProduct {
    pub fn latest(&self) -> Option<&PriceSample> {
        self.history.last()
    }

    pub fn previous(&self) -> Option<&PriceSample> {
        self.history.len().checked_sub(2).and_then(|i| self.history.get(i))
    }
}

/// Raw fields extracted from a product page. Title is mandatory,
/// the rest default to sentinels downstream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSnapshot {
    pub title: String,
    pub price: Option<String>,
    pub availability: Option<String>,
    pub thumbnail_url: Option<String>,
}

/// How chatty the notifier is on cycles with no changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Level 1: only configuration and change messages
    ChangesOnly,
    /// Level 2: a routine update message on every quiet cycle too
    Everything,
}

impl TryFrom<u8> for Verbosity {
    type Error = ConfigError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(Self::ChangesOnly),
            2 => Ok(Self::Everything),
            other => Err(ConfigError::InvalidVerbosity(other)),
        }
    }
}

/// Canonical product key: the URL with its query string stripped
pub fn canonical_key(url: &str) -> String {
    url.split('?').next().unwrap_or(url).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_key_strips_query() {
        assert_eq!(
            canonical_key("https://www.amazon.in/dp/B0TEST?ref=sr_1_1&keywords=x"),
            "https://www.amazon.in/dp/B0TEST"
        );
    }

    #[test]
    fn test_canonical_key_without_query_is_identity() {
        assert_eq!(
            canonical_key("https://www.amazon.in/dp/B0TEST"),
            "https://www.amazon.in/dp/B0TEST"
        );
    }

    #[test]
    fn test_canonical_key_trims_blanks() {
        assert_eq!(canonical_key("   "), "");
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(Verbosity::try_from(1).unwrap(), Verbosity::ChangesOnly);
        assert_eq!(Verbosity::try_from(2).unwrap(), Verbosity::Everything);
        assert!(Verbosity::try_from(0).is_err());
        assert!(Verbosity::try_from(3).is_err());
    }

    #[test]
    fn test_previous_sample() {
        let mut product = TrackedProduct {
            key: "k".to_string(),
            title: "t".to_string(),
            thumbnail_url: String::new(),
            accent_color: "aabbcc".to_string(),
            history: vec![PriceSample {
                price: "$10".to_string(),
                availability: "In Stock".to_string(),
                observed_at: 100,
            }],
        };
        assert!(product.previous().is_none());
        product.history.push(PriceSample {
            price: "$12".to_string(),
            availability: "In Stock".to_string(),
            observed_at: 200,
        });
        assert_eq!(product.previous().unwrap().price, "$10");
        assert_eq!(product.latest().unwrap().price, "$12");
    }
}
