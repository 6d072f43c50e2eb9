//! Discord webhook notifier

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use super::{EmbedMessage, Notifier};
use crate::shared::errors::NotifyError;

/// Posts embed payloads to a Discord webhook URL
pub struct DiscordNotifier {
    client: reqwest::Client,
    webhook_url: String,
}

impl DiscordNotifier {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook_url: webhook_url.into(),
        }
    }

    async fn execute(&self, payload: serde_json::Value) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(&payload)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Status(status));
        }
        debug!(%status, "webhook delivered");
        Ok(())
    }
}

/// Discord wants embed colors as integers and timestamps as ISO-8601
fn embed_color(hex: &str) -> u32 {
    u32::from_str_radix(hex, 16).unwrap_or(0) & 0xFF_FFFF
}

fn embed_timestamp(unix_seconds: i64) -> String {
    chrono::DateTime::from_timestamp(unix_seconds, 0)
        .map(|time| time.to_rfc3339())
        .unwrap_or_default()
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn send(&self, message: &EmbedMessage) -> Result<(), NotifyError> {
        let content = if message.mention_everyone {
            "@everyone"
        } else {
            ""
        };
        let payload = json!({
            "content": content,
            "embeds": [{
                "title": message.title,
                "url": message.url,
                "description": message.description,
                "thumbnail": { "url": message.thumbnail_url },
                "color": embed_color(&message.color),
                "timestamp": embed_timestamp(message.timestamp),
            }],
        });
        self.execute(payload).await
    }

    async fn send_error(
        &self,
        url: &str,
        title: &str,
        detail: &str,
        color: &str,
    ) -> Result<(), NotifyError> {
        let payload = json!({
            "embeds": [{
                "title": title,
                "description": detail,
                "url": url,
                "color": embed_color(color),
            }],
        });
        self.execute(payload).await
    }
}
