//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the global `tracing` subscriber
//! - Honor `RUST_LOG` over the configured level
//! - Swap in the configured level once the config is loaded

use thiserror::Error;
use tracing_subscriber::{
    filter::ParseError, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter,
    Registry,
};

#[derive(Debug, Error)]
pub enum LogLevelError {
    #[error("Invalid log filter {filter:?}: {source}")]
    Parse {
        filter: String,
        #[source]
        source: ParseError,
    },

    #[error("Failed to update log filter: {0}")]
    Reload(#[from] reload::Error),
}

/// Handle to the filter of the installed subscriber.
#[derive(Debug, Clone)]
pub struct LogHandle {
    filter: reload::Handle<EnvFilter, Registry>,
    from_env: bool,
}

impl LogHandle {
    /// Replace the active filter with `level`. A filter taken from
    /// `RUST_LOG` stays in place; `level` is still checked.
    pub fn set_level(&self, level: &str) -> Result<(), LogLevelError> {
        let filter = EnvFilter::try_new(level).map_err(|source| LogLevelError::Parse {
            filter: level.to_string(),
            source,
        })?;

        if self.from_env {
            tracing::debug!(level, "RUST_LOG is set, configured log level ignored");
            return Ok(());
        }

        self.filter.reload(filter)?;
        Ok(())
    }
}

/// Install the fmt subscriber, writing to stderr.
///
/// `level` is used as the default directive (e.g. `"info"` or
/// `"bang_router=debug,tower_http=info"`). Calling this twice is harmless;
/// the second subscriber is ignored.
pub fn init_logging(level: &str) -> LogHandle {
    let env_filter = EnvFilter::try_from_default_env();
    let from_env = env_filter.is_ok();
    let filter = env_filter
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let (filter, handle) = reload::Layer::new(filter);
    let result = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();

    if result.is_err() {
        tracing::debug!("Global subscriber already set");
    }

    LogHandle {
        filter: handle,
        from_env,
    }
}
