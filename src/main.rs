use anyhow::{Context, Result};
use clap::Parser;
use jobseek::app_log;
use jobseek::cli::{handle_command, JobseekCli};
use jobseek::core::ConfigManager;
use std::fs::OpenOptions;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "jobseek=info,rocket::server=off";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = JobseekCli::parse();

    let config = ConfigManager::load()?;
    config.ensure_directories().await?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // Initialize logging before anything else talks
    match &config.environment.log_path {
        Some(log_path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_path)
                .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(file)
                        .with_current_span(false)
                        .with_span_list(false),
                )
                .with(filter)
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(false))
                .with(filter)
                .init();
        }
    }

    app_log!(info, "Environment: {}", ConfigManager::environment_name());
    app_log!(
        info,
        "Database: {}",
        config.environment.database_path.display()
    );
    app_log!(info, "Store: {}", config.environment.store_path.display());

    handle_command(cli, config).await
}
