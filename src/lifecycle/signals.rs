//! OS signal handling.
//!
//! - SIGINT (Ctrl+C) and SIGTERM resolve [`wait_for_signal`]
//! - SIGHUP reloads the config file, never shuts down

use std::path::PathBuf;

use tokio::sync::{broadcast, mpsc};

use crate::config::watcher::reload;
use crate::config::RouterConfig;

/// Resolve on the first Ctrl+C or SIGTERM.
pub async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C"),
        _ = terminate => tracing::info!("Received SIGTERM"),
    }
}

/// Spawn a task that reloads `path` on every SIGHUP until shutdown.
#[cfg(unix)]
pub fn reload_on_hangup(
    path: PathBuf,
    tx: mpsc::UnboundedSender<RouterConfig>,
    mut shutdown: broadcast::Receiver<()>,
) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let mut hangup = match signal(SignalKind::hangup()) {
            Ok(stream) => stream,
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGHUP handler");
                return;
            }
        };

        loop {
            tokio::select! {
                _ = hangup.recv() => {
                    tracing::info!(path = ?path, "SIGHUP received, reloading config");
                    reload(&path, &tx);
                }
                _ = shutdown.recv() => break,
            }
        }
    });
}

#[cfg(not(unix))]
pub fn reload_on_hangup(
    _path: PathBuf,
    _tx: mpsc::UnboundedSender<RouterConfig>,
    _shutdown: broadcast::Receiver<()>,
) {
}
