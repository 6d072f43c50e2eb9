//! Product tracker - one product's fetch, diff, persist, notify cycle

use std::sync::Arc;

use chrono::{Local, Utc};
use tracing::{error, info, warn};

use super::notification::{self, Notification};
use crate::infrastructure::fetch::{accent, PageFetcher};
use crate::infrastructure::notify::{EmbedMessage, Notifier};
use crate::infrastructure::store::ProductStore;
use crate::shared::errors::AppError;
use crate::shared::types::{
    PageSnapshot, PriceSample, TrackedProduct, Verbosity, AVAILABILITY_UNKNOWN, PRICE_UNAVAILABLE,
};
use crate::shared::utils::format_cycle_time;

/// Embed color for error reports
const ERROR_COLOR: &str = "CC5500";

/// Tracks a single product across polling cycles.
///
/// Owns no long-lived state beyond its key and a cached thumbnail URL; the
/// durable record lives in the store.
pub struct ProductTracker {
    key: String,
    verbosity: Verbosity,
    thumbnail_url: String,
    fetcher: Arc<dyn PageFetcher>,
    store: Arc<dyn ProductStore>,
    notifier: Arc<dyn Notifier>,
}

impl ProductTracker {
    pub fn new(
        key: String,
        verbosity: Verbosity,
        fetcher: Arc<dyn PageFetcher>,
        store: Arc<dyn ProductStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            key,
            verbosity,
            thumbnail_url: String::new(),
            fetcher,
            store,
            notifier,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Run one tracking cycle. Never propagates a failure: errors are logged
    /// and reported as an error embed so the pass continues with the next
    /// product.
    pub async fn update(&mut self) {
        if let Err(err) = self.run_cycle().await {
            error!(product = %self.key, error = %err, "tracking cycle failed");
            let detail = error_chain(&err);
            if let Err(notify_err) = self
                .notifier
                .send_error(&self.key, "An Exception Occurred :(", &detail, ERROR_COLOR)
                .await
            {
                warn!(product = %self.key, error = %notify_err, "failed to deliver error report");
            }
        }
    }

    async fn run_cycle(&mut self) -> Result<(), AppError> {
        let page = self.fetcher.fetch(&self.key).await?;
        if self.thumbnail_url.is_empty() {
            if let Some(url) = &page.thumbnail_url {
                self.thumbnail_url = url.clone();
            }
        }

        let product = match self.store.get(&self.key).await? {
            None => self.configure(&page).await?,
            Some(existing) => self.observe(existing, &page),
        };

        self.notify(&product).await;

        self.store.set(&self.key, &product).await?;
        self.store.flush().await?;

        if let Some(latest) = product.latest() {
            info!(
                "{} => {} :: {} @ {}",
                product.title,
                latest.price,
                latest.availability,
                format_cycle_time(Local::now())
            );
        }
        Ok(())
    }

    /// First successful fetch: build the durable record. The accent color is
    /// fixed here for the product's lifetime.
    async fn configure(&self, page: &PageSnapshot) -> Result<TrackedProduct, AppError> {
        let accent_color = if self.thumbnail_url.is_empty() {
            accent::random_color()
        } else {
            self.fetcher.accent_color(&self.thumbnail_url).await?
        };
        Ok(TrackedProduct {
            key: self.key.clone(),
            title: page.title.clone(),
            thumbnail_url: self.thumbnail_url.clone(),
            accent_color,
            history: vec![sample_from(page)],
        })
    }

    /// Subsequent fetch: refresh the title and append exactly one sample.
    fn observe(&self, mut product: TrackedProduct, page: &PageSnapshot) -> TrackedProduct {
        product.title = page.title.clone();
        if product.thumbnail_url.is_empty() {
            product.thumbnail_url = self.thumbnail_url.clone();
        }
        product.history.push(sample_from(page));
        product
    }

    /// Send whatever the decision machine produced. Delivery failures are
    /// swallowed; the data update already happened.
    async fn notify(&self, product: &TrackedProduct) {
        let Some(latest) = product.latest() else {
            return;
        };
        for decision in notification::decide(product, self.verbosity) {
            let message = self.render(product, latest, &decision);
            if let Err(err) = self.notifier.send(&message).await {
                warn!(product = %self.key, error = %err, "failed to deliver notification");
            }
        }
    }

    fn render(
        &self,
        product: &TrackedProduct,
        latest: &PriceSample,
        decision: &Notification,
    ) -> EmbedMessage {
        let availability_block =
            notification::format_availability(&latest.availability).unwrap_or_default();
        EmbedMessage {
            title: product.title.clone(),
            description: format!(
                "{} - <t:{}:R> \n {}",
                decision.body(),
                latest.observed_at,
                availability_block
            ),
            url: self.key.clone(),
            thumbnail_url: product.thumbnail_url.clone(),
            color: product.accent_color.clone(),
            timestamp: latest.observed_at,
            mention_everyone: decision.mention_everyone(),
        }
    }
}

fn sample_from(page: &PageSnapshot) -> PriceSample {
    PriceSample {
        price: page
            .price
            .clone()
            .unwrap_or_else(|| PRICE_UNAVAILABLE.to_string()),
        availability: page
            .availability
            .clone()
            .unwrap_or_else(|| AVAILABILITY_UNKNOWN.to_string()),
        observed_at: Utc::now().timestamp(),
    }
}

fn error_chain(err: &AppError) -> String {
    let mut out = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        out.push_str("\nCaused by: ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}
