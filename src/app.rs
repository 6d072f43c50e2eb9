// src/app.rs
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::application::{TrackerDeps, TrackerRegistry};
use crate::config::Config;
use crate::domain::schedule::CronSchedule;
use crate::infrastructure::fetch::AmazonPageFetcher;
use crate::infrastructure::notify::DiscordNotifier;
use crate::infrastructure::store::JsonFileStore;
use crate::shared::types::Verbosity;

#[derive(Debug, Clone)]
pub struct AppCfg {
    pub cron_expr: String,
    pub poll_interval_secs: u64,
    pub webhook_url: String,
    pub verbosity: u8,
    pub initial_update: bool,
    pub store_path: String,
    pub products: Vec<String>,
}

impl AppCfg {
    /// Build from a config file. `invert_initial` flips the configured
    /// initial-update flag (the `-o` CLI override).
    pub fn from_config(cfg: Config, invert_initial: bool) -> Self {
        let initial_update = if invert_initial {
            !cfg.tracker.initial_update
        } else {
            cfg.tracker.initial_update
        };
        Self {
            cron_expr: cfg.schedule.cron,
            poll_interval_secs: cfg.schedule.poll_interval_secs,
            webhook_url: cfg.notify.webhook_url,
            verbosity: cfg.tracker.verbosity,
            initial_update,
            store_path: cfg.store.path,
            products: cfg.products,
        }
    }
}

pub async fn run(app_cfg: AppCfg) -> Result<()> {
    info!("Starting product tracking engine");

    // Fail fast on anything malformed before the first cycle runs
    let verbosity = Verbosity::try_from(app_cfg.verbosity)?;
    let schedule = CronSchedule::new(&app_cfg.cron_expr)?;

    info!("Validating product URLs...");
    let mut urls = Vec::new();
    for raw in &app_cfg.products {
        if raw.trim().is_empty() {
            continue;
        }
        match url::Url::parse(raw) {
            Ok(_) => urls.push(raw.as_str()),
            Err(err) => warn!(url = %raw, error = %err, "skipping invalid product URL"),
        }
    }

    let store = Arc::new(JsonFileStore::open(&app_cfg.store_path).await?);
    let fetcher = Arc::new(AmazonPageFetcher::new()?);
    let notifier = Arc::new(DiscordNotifier::new(&app_cfg.webhook_url));

    let mut registry = TrackerRegistry::new(
        verbosity,
        TrackerDeps {
            fetcher,
            store,
            notifier,
        },
    );
    registry.register_many(urls);
    info!(products = registry.len(), "registry ready");

    let shutdown = CancellationToken::new();
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                shutdown.cancel();
            }
        });
    }

    if app_cfg.initial_update {
        registry.update_all().await;
    }

    registry
        .run_forever(
            schedule,
            Duration::from_secs(app_cfg.poll_interval_secs),
            shutdown,
        )
        .await;
    Ok(())
}
