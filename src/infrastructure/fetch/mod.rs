//! Product page fetching

pub mod accent;

mod amazon;

pub use amazon::AmazonPageFetcher;

use async_trait::async_trait;

use crate::shared::errors::FetchError;
use crate::shared::types::PageSnapshot;

/// Extracts structured fields from a product page
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch and parse the page behind `key`. Fails if the page has no
    /// title, which marks an invalid product.
    async fn fetch(&self, key: &str) -> Result<PageSnapshot, FetchError>;

    /// Dominant color of the thumbnail image, as 6 hex digits
    async fn accent_color(&self, thumbnail_url: &str) -> Result<String, FetchError>;
}
