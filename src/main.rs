use anyhow::Result;
use clap::Parser;

use pricewatch::app::{self, AppCfg};
use pricewatch::config::Config;

#[derive(Parser, Debug)]
#[command(version, about = "Amazon price tracker with cron scheduling and Discord notifications")]
struct Args {
    /// Path to config file
    #[arg(long, default_value = "config.toml")]
    config: String,

    /// Invert the configured "run initial update on startup" flag
    #[arg(short = 'o', long)]
    override_initial_update: bool,

    /// Webhook URL (overrides config)
    #[arg(long)]
    webhook_url: Option<String>,

    /// Cron expression (overrides config)
    #[arg(long)]
    cron: Option<String>,

    /// Poll interval in seconds (overrides config)
    #[arg(long)]
    poll_interval_secs: Option<u64>,

    /// Verbosity level, 1 or 2 (overrides config)
    #[arg(long)]
    verbosity: Option<u8>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let cfg = Config::from_file(&args.config)?;
    let mut app_cfg = AppCfg::from_config(cfg, args.override_initial_update);

    // CLI args take priority over the config file
    if let Some(webhook_url) = args.webhook_url {
        app_cfg.webhook_url = webhook_url;
    }
    if let Some(cron) = args.cron {
        app_cfg.cron_expr = cron;
    }
    if let Some(poll_interval_secs) = args.poll_interval_secs {
        app_cfg.poll_interval_secs = poll_interval_secs;
    }
    if let Some(verbosity) = args.verbosity {
        app_cfg.verbosity = verbosity;
    }

    app::run(app_cfg).await
}
