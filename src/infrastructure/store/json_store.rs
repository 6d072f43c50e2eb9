//! JSON-file-backed product store

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::ProductStore;
use crate::shared::errors::StoreError;
use crate::shared::types::TrackedProduct;

/// Keeps every record in memory and flushes the whole map as one JSON
/// document. Flush is write-to-temp-then-rename, so a crash mid-flush leaves
/// the previous snapshot intact.
pub struct JsonFileStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, TrackedProduct>>,
}

impl JsonFileStore {
    /// Open the store, loading any previously flushed entries. A missing
    /// file is an empty store.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }
}

#[async_trait]
impl ProductStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<TrackedProduct>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, product: &TrackedProduct) -> Result<(), StoreError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), product.clone());
        Ok(())
    }

    async fn flush(&self) -> Result<(), StoreError> {
        let bytes = {
            let entries = self.entries.read().await;
            serde_json::to_vec_pretty(&*entries)?
        };
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        debug!(path = %self.path.display(), "store flushed");
        Ok(())
    }
}
