//! Paged record relay (v1)
//!
//! One process serves one tier of the chain.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client        ┌──────────────┐      ┌──────────────┐      ┌──────────────┐
//!   ─────────────▶│   business   │─────▶│  management  │─────▶│     data     │──▶ RecordStore
//!   ◀─────────────│     tier     │◀─────│     tier     │◀─────│     tier     │◀──
//!                 └──────────────┘      └──────────────┘      └──────────────┘
//!
//!   Each tier:  validate → build canonical URL → forward once → relay status + body
//!   Data tier:  validate → fetch page from store → render JSON page
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use paging_relay::config::{load_config, validate_config, ConfigError, RelayConfig, TierRole};
use paging_relay::observability::{logging, metrics};
use paging_relay::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "paging-relay")]
#[command(about = "Serve one tier of the paged record relay", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured tier role.
    #[arg(short, long)]
    role: Option<TierRole>,

    /// Override the configured bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => RelayConfig::default(),
    };
    if let Some(role) = args.role {
        config.tier.role = role;
    }
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init(&config.observability.log_level);

    tracing::info!("paging-relay v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        tier = %config.tier.role,
        bind_address = %config.listener.bind_address,
        episodes_url = %config.downstream.episodes_url,
        profiles_url = %config.downstream.profiles_url,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let server = HttpServer::new(config)?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(shutdown.trigger_on_ctrl_c());

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
