//! Scoring API server entrypoint.
//!
//! Wires configuration, logging, the cache backend and the axum listener
//! together. Redis connection failure at startup degrades gracefully to
//! the in-memory backend; the service never fails to start over cache
//! issues.

use anyhow::Context;
use clap::Parser;
use scoring_core::config::{load_config, ServiceConfig};
use scoring_core::logging::init_structured_logging;
use scoring_core::store::{MemoryCacheService, RedisCacheService, RemoteCache, ResilientStore};
use scoring_core::web::{serve, AppState};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "scoring-server", about = "Scoring API service")]
struct Cli {
    /// Listener port, overriding the configured bind address.
    #[arg(short, long)]
    port: Option<u16>,

    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON log file; console logging stays on either way.
    #[arg(short, long)]
    log: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref()).context("configuration failed to load")?;

    let log_file = cli
        .log
        .clone()
        .or_else(|| config.logging.file.as_ref().map(PathBuf::from));
    init_structured_logging(log_file.as_deref());

    let mut bind: SocketAddr = config
        .web
        .bind_address
        .parse()
        .context("invalid bind address")?;
    if let Some(port) = cli.port {
        bind.set_port(port);
    }

    let cancel = CancellationToken::new();
    let remote = build_remote(&config).await;
    info!(provider = remote.provider_name(), "cache backend selected");

    let store = ResilientStore::from_config(remote, &config.store, cancel.clone());

    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    info!(address = %bind, "scoring API listening");

    serve(listener, AppState::new(store), cancel)
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

/// Construct the remote cache from configuration, degrading to the
/// in-memory backend when Redis is unreachable or the backend is unknown.
async fn build_remote(config: &ServiceConfig) -> Arc<dyn RemoteCache> {
    match config.store.backend.as_str() {
        "redis" => {
            match RedisCacheService::connect(
                &config.store.redis_url,
                config.store.operation_timeout(),
            )
            .await
            {
                Ok(service) => Arc::new(service),
                Err(error) => {
                    warn!(error = %error, "Redis unreachable, falling back to in-memory cache");
                    Arc::new(MemoryCacheService::new())
                }
            }
        }
        "memory" => Arc::new(MemoryCacheService::new()),
        other => {
            warn!(backend = other, "unknown cache backend, falling back to in-memory cache");
            Arc::new(MemoryCacheService::new())
        }
    }
}
