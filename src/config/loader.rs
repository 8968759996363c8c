//! Configuration loading from disk.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::config::validation::{normalize_search, validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
///
/// Search document problems are repaired and logged rather than returned.
pub fn parse_config(content: &str) -> Result<RouterConfig, ConfigError> {
    let mut config: RouterConfig = toml::from_str(content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    for issue in normalize_search(&mut config.search) {
        tracing::warn!(%issue, "Search config repaired");
    }

    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RouterConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}

/// Load configuration, substituting the defaults when the file is missing
/// or unusable.
pub fn load_or_default(path: &Path) -> RouterConfig {
    match load_config(path) {
        Ok(config) => {
            tracing::info!(path = ?path, "Configuration loaded");
            config
        }
        Err(ConfigError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
            tracing::info!(path = ?path, "No configuration file, using defaults");
            RouterConfig::default()
        }
        Err(e) => {
            tracing::error!(path = ?path, error = %e, "Failed to load configuration, using defaults");
            RouterConfig::default()
        }
    }
}
