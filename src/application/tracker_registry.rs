//! Tracker registry - drives the polling loop across all products

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::domain::schedule::CronSchedule;
use crate::domain::tracker::ProductTracker;
use crate::infrastructure::fetch::PageFetcher;
use crate::infrastructure::notify::Notifier;
use crate::infrastructure::store::ProductStore;
use crate::shared::types::{canonical_key, Verbosity};
use crate::shared::utils::format_schedule_time;

/// Shared collaborators injected into every tracker
#[derive(Clone)]
pub struct TrackerDeps {
    pub fetcher: Arc<dyn PageFetcher>,
    pub store: Arc<dyn ProductStore>,
    pub notifier: Arc<dyn Notifier>,
}

/// Ordered set of product trackers plus the loop that drives them.
///
/// Registration order is config order; one product's failure never blocks
/// the rest of a pass.
pub struct TrackerRegistry {
    trackers: Vec<ProductTracker>,
    keys: HashSet<String>,
    verbosity: Verbosity,
    deps: TrackerDeps,
}

impl TrackerRegistry {
    pub fn new(verbosity: Verbosity, deps: TrackerDeps) -> Self {
        Self {
            trackers: Vec::new(),
            keys: HashSet::new(),
            verbosity,
            deps,
        }
    }

    /// Register one product URL. Blank and duplicate entries are dropped
    /// silently.
    pub fn register(&mut self, url: &str) {
        let key = canonical_key(url);
        if key.is_empty() || !self.keys.insert(key.clone()) {
            return;
        }
        self.trackers.push(ProductTracker::new(
            key,
            self.verbosity,
            Arc::clone(&self.deps.fetcher),
            Arc::clone(&self.deps.store),
            Arc::clone(&self.deps.notifier),
        ));
    }

    pub fn register_many<I, S>(&mut self, urls: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for url in urls {
            self.register(url.as_ref());
        }
    }

    pub fn len(&self) -> usize {
        self.trackers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trackers.is_empty()
    }

    /// One pass: update every tracker in sequence
    pub async fn update_all(&mut self) {
        let started = Instant::now();
        info!(products = self.trackers.len(), "starting update pass");
        for tracker in &mut self.trackers {
            tracker.update().await;
        }
        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "update pass complete"
        );
    }

    /// Poll on `poll_interval` until the token fires, running a pass at
    /// every cron boundary crossing.
    pub async fn run_forever(
        &mut self,
        mut schedule: CronSchedule,
        poll_interval: Duration,
        shutdown: CancellationToken,
    ) {
        info!(
            "Next execution scheduled at {}",
            format_schedule_time(schedule.next_execution_time())
        );
        let mut ticker = tokio::time::interval(poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("shutdown requested, stopping polling loop");
                    break;
                }
                _ = ticker.tick() => {
                    if schedule.is_time_for_execution() {
                        self.update_all().await;
                        info!(
                            "Next execution scheduled at {}",
                            format_schedule_time(schedule.next_execution_time())
                        );
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::notify::EmbedMessage;
    use crate::shared::errors::{FetchError, NotifyError, StoreError};
    use crate::shared::types::{PageSnapshot, TrackedProduct};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use tokio::sync::{Mutex, RwLock};

    /// Succeeds for every key except the ones it is told to reject
    struct KeyedFetcher {
        failing: HashSet<String>,
    }

    #[async_trait]
    impl PageFetcher for KeyedFetcher {
        async fn fetch(&self, key: &str) -> Result<PageSnapshot, FetchError> {
            if self.failing.contains(key) {
                return Err(FetchError::InvalidProduct(key.to_string()));
            }
            Ok(PageSnapshot {
                title: format!("Product {key}"),
                price: Some("$10".to_string()),
                availability: Some("In Stock".to_string()),
                thumbnail_url: None,
            })
        }

        async fn accent_color(&self, _thumbnail_url: &str) -> Result<String, FetchError> {
            Ok("336699".to_string())
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        entries: RwLock<HashMap<String, TrackedProduct>>,
    }

    #[async_trait]
    impl ProductStore for MemoryStore {
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
            Ok(())
        }
    }

    #[derive(Default)]
    struct SilentNotifier {
        error_count: Mutex<usize>,
    }

    #[async_trait]
    impl Notifier for SilentNotifier {
        async fn send(&self, _message: &EmbedMessage) -> Result<(), NotifyError> {
            Ok(())
        }

        async fn send_error(
            &self,
            _url: &str,
            _title: &str,
            _detail: &str,
            _color: &str,
        ) -> Result<(), NotifyError> {
            *self.error_count.lock().await += 1;
            Ok(())
        }
    }

    fn registry_with(
        failing: &[&str],
    ) -> (TrackerRegistry, Arc<MemoryStore>, Arc<SilentNotifier>) {
        let store = Arc::new(MemoryStore::default());
        let notifier = Arc::new(SilentNotifier::default());
        let deps = TrackerDeps {
            fetcher: Arc::new(KeyedFetcher {
                failing: failing.iter().map(|k| k.to_string()).collect(),
            }),
            store: store.clone(),
            notifier: notifier.clone(),
        };
        (
            TrackerRegistry::new(Verbosity::ChangesOnly, deps),
            store,
            notifier,
        )
    }

    #[test]
    fn test_register_drops_blanks_and_duplicates() {
        let (mut registry, _, _) = registry_with(&[]);
        registry.register_many([
            "https://shop.example/a?ref=1",
            "https://shop.example/a?ref=2",
            "",
            "   ",
            "https://shop.example/b",
        ]);
        assert_eq!(registry.len(), 2);
    }

    #[tokio::test]
    async fn test_one_failure_never_aborts_the_pass() {
        let (mut registry, store, notifier) = registry_with(&["https://shop.example/b"]);
        registry.register_many([
            "https://shop.example/a",
            "https://shop.example/b",
            "https://shop.example/c",
        ]);

        registry.update_all().await;

        let entries = store.entries.read().await;
        assert!(entries.contains_key("https://shop.example/a"));
        assert!(!entries.contains_key("https://shop.example/b"));
        assert!(entries.contains_key("https://shop.example/c"));
        assert_eq!(*notifier.error_count.lock().await, 1);
    }

    #[tokio::test]
    async fn test_every_pass_appends_across_all_products() {
        let (mut registry, store, _) = registry_with(&[]);
        registry.register_many(["https://shop.example/a", "https://shop.example/c"]);

        registry.update_all().await;
        registry.update_all().await;

        let entries = store.entries.read().await;
        for key in ["https://shop.example/a", "https://shop.example/c"] {
            assert_eq!(entries[key].history.len(), 2);
        }
    }

    #[tokio::test]
    async fn test_run_forever_stops_on_cancellation() {
        let (mut registry, _, _) = registry_with(&[]);
        let schedule = CronSchedule::new("* * * * *").unwrap();
        let shutdown = CancellationToken::new();
        shutdown.cancel();

        // returns promptly instead of looping forever
        tokio::time::timeout(
            Duration::from_secs(1),
            registry.run_forever(schedule, Duration::from_millis(10), shutdown),
        )
        .await
        .unwrap();
    }
}
