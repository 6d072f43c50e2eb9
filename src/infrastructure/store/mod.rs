//! Product persistence

mod json_store;

pub use json_store::JsonFileStore;

use async_trait::async_trait;

use crate::shared::errors::StoreError;
use crate::shared::types::TrackedProduct;

/// Durable mapping from product key to tracked state.
///
/// No multi-key transactional guarantees; each product is written
/// independently.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<TrackedProduct>, StoreError>;

    async fn set(&self, key: &str, product: &TrackedProduct) -> Result<(), StoreError>;

    /// Durably persist all pending writes
    async fn flush(&self) -> Result<(), StoreError>;
}
