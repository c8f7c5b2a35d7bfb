use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use citycast::config::LoggingConfig;
use citycast::{AppConfig, AppState, OpenMeteoClient, web};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// City weather lookup service backed by Open-Meteo
#[derive(Parser, Debug)]
#[command(name = "citycast", version, about)]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, env = "CITYCAST_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on, overrides the config file
    #[arg(short, long)]
    port: Option<u16>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_from_path(cli.config)?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    config.validate()?;

    init_tracing(&config.logging);
    tracing::info!("Starting citycast {}", citycast::VERSION);

    let client = Arc::new(OpenMeteoClient::new(&config.upstream)?);
    let state = AppState::new(client.clone(), client);

    web::run(&config, state).await
}
