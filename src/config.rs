use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleCfg {
    /// Standard 5-field cron expression
    pub cron: String,
    /// Seconds between liveness checks of the polling loop
    pub poll_interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotifyCfg {
    pub webhook_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackerCfg {
    /// 1 = change messages only, 2 = a routine message every cycle
    pub verbosity: u8,
    /// Run one full pass immediately on startup
    pub initial_update: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreCfg {
    pub path: String,
}

impl Default for StoreCfg {
    fn default() -> Self {
        Self {
            path: "products.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub schedule: ScheduleCfg,
    pub notify: NotifyCfg,
    pub tracker: TrackerCfg,
    #[serde(default)]
    pub store: StoreCfg,
    pub products: Vec<String>,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = fs::read_to_string(path.as_ref())
            .with_context(|| format!("read config file {}", path.as_ref().display()))?;
        let cfg: Self = toml::from_str(&s).context("parse config file")?;
        Ok(cfg)
    }
}
