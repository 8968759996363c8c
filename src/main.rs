//! Bang search router.
//!
//! Serves `GET /search?q=...` and redirects to the destination the compiled
//! bang table resolves the query to.
//!
//! The config file is taken from `--config <path>`, then the
//! `BANG_ROUTER_CONFIG` environment variable, then `bang-router.toml`.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use bang_router::config::{load_or_default, watcher::ConfigWatcher};
use bang_router::http::HttpServer;
use bang_router::lifecycle::{reload_on_hangup, wait_for_signal, Shutdown};
use bang_router::observability::{init_logging, metrics};

#[derive(Parser)]
#[command(name = "bang-router", version, about = "Bang search redirect service")]
struct Args {
    /// Config file (TOML).
    #[arg(long, env = "BANG_ROUTER_CONFIG", default_value = "bang-router.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = Args::parse().config;

    let logging = init_logging("info");
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "bang-router starting");

    let config = load_or_default(&config_path);
    if let Err(e) = logging.set_level(&config.observability.log_level) {
        tracing::warn!(error = %e, "Keeping default log level");
    }

    tracing::info!(
        path = ?config_path,
        bind_address = %config.listener.bind_address,
        vendor_bangs = config.search.use_vendor_bangs,
        overrides = config.search.bang_overrides.len(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(config)?;
    let shutdown = Shutdown::new();

    let (watcher, config_updates) = ConfigWatcher::new(&config_path);
    reload_on_hangup(config_path.clone(), watcher.sender(), shutdown.subscribe());
    let _watcher = match watcher.run() {
        Ok(handle) => Some(handle),
        Err(e) => {
            tracing::warn!(path = ?config_path, error = %e, "Config watcher not started");
            None
        }
    };

    let server_shutdown = shutdown.subscribe();
    let server_task = tokio::spawn(server.run(listener, config_updates, server_shutdown));

    wait_for_signal().await;
    shutdown.trigger();

    server_task.await??;
    tracing::info!("Shutdown complete");
    Ok(())
}
