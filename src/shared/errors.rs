//! Error handling for the application

use thiserror::Error;

/// Configuration errors - fatal, raised at startup
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid cron expression {expr:?}: {reason}")]
    InvalidCron { expr: String, reason: String },

    #[error("Invalid verbosity level {0} (expected 1 or 2)")]
    InvalidVerbosity(u8),
}

/// Page fetch errors - per-product, non-fatal
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid product {0:?}: page has no title")]
    InvalidProduct(String),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Thumbnail decode failed: {0}")]
    Thumbnail(String),
}

/// Persistence errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Notification delivery errors - swallowed at the tracker boundary
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Webhook request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Webhook returned status {0}")]
    Status(reqwest::StatusCode),
}

/// General application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),
}
