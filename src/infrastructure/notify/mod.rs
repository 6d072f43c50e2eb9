//! Notification delivery - webhook embeds

mod discord;

pub use discord::DiscordNotifier;

use async_trait::async_trait;

use crate::shared::errors::NotifyError;

/// One product-update embed plus its broadcast flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedMessage {
    pub title: String,
    pub description: String,
    pub url: String,
    pub thumbnail_url: String,
    /// 6-hex-digit accent color
    pub color: String,
    /// Unix seconds of the observation the message describes
    pub timestamp: i64,
    pub mention_everyone: bool,
}

/// Delivers formatted messages. Failures must never crash the tracking loop.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a product update embed
    async fn send(&self, message: &EmbedMessage) -> Result<(), NotifyError>;

    /// Deliver an error report embed
    async fn send_error(
        &self,
        url: &str,
        title: &str,
        detail: &str,
        color: &str,
    ) -> Result<(), NotifyError>;
}
