//! txboard main entry point

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use txboard_api::start_server;
use txboard_client::ApiClient;
use txboard_config::{Config, ConfigError};
use txboard_core::SourceRef;

#[derive(Parser, Debug)]
#[command(name = "txboard")]
#[command(version)]
#[command(about = "A lightweight transactions dashboard with search and pagination", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Print the default configuration and exit
    #[arg(long)]
    init: bool,
}

fn load_config(path: &Path) -> anyhow::Result<(Config, Option<String>)> {
    let (mut config, notice) = match Config::load(path) {
        Ok(config) => (config, None),
        Err(ConfigError::FileNotFound { path }) => (
            Config::default(),
            Some(format!("Config file {} not found, using defaults", path)),
        ),
        Err(e) => anyhow::bail!("{}", e.to_details()),
    };

    config
        .apply_env_overrides()
        .map_err(|e| anyhow::anyhow!("{}", e.to_details()))?;

    Ok((config, notice))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.init {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let (config, notice) = load_config(&args.config)?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    if let Some(notice) = notice {
        log::warn!("{}", notice);
    }
    log::info!(
        "Config loaded: api={}, page size={}, debounce={}ms",
        config.api.base_url,
        config.pagination.records_per_page,
        config.search.debounce_ms
    );
    if config.api.current_user.trim().is_empty() {
        log::warn!("api.current_user is empty; transactions will not be classified as incoming/outgoing");
    }

    let client = ApiClient::from_config(&config.api).context("Failed to build API client")?;
    let source: SourceRef = Arc::new(client);

    let rt = tokio::runtime::Runtime::new().context("Failed to start runtime")?;
    rt.block_on(start_server(config, source))
        .context("Server error")?;

    Ok(())
}
