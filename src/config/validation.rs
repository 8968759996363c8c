//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation of service settings (serde handles syntactic)
//! - Repair the search document before it reaches the compiler
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Service settings that cannot work (bad bind address) are hard errors
//! - Search document problems are never fatal: the offending entry is
//!   dropped or defaulted and the problem reported as a warning, so a
//!   broken override never blocks searching

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::bangs::vendor::origin_of;
use crate::compiler::table::QUERY_PLACEHOLDER;
use crate::config::schema::{RouterConfig, SearchConfig, SEARCH_CONFIG_VERSION};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid {field} '{value}': {reason}")]
    InvalidAddress {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("admin endpoint is enabled without an api_key")]
    MissingAdminKey,

    #[error("http.request_timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("unsupported search config version '{0}'")]
    UnknownVersion(String),

    #[error("bang override #{index} has an empty bang")]
    EmptyBang { index: usize },

    #[error("bang override '{bang}' contains whitespace")]
    WhitespaceInBang { bang: String },

    #[error("bang override '!{bang}' has no {{query}} placeholder in its url")]
    MissingPlaceholder { bang: String },

    #[error("bang override '!{bang}' is defined more than once; the last one wins")]
    DuplicateBang { bang: String },
}

/// Validate service settings.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(
        "listener.bind_address",
        &config.listener.bind_address,
        &mut errors,
    );

    if config.observability.metrics_enabled {
        check_address(
            "observability.metrics_address",
            &config.observability.metrics_address,
            &mut errors,
        );
    }

    if config.admin.enabled && config.admin.api_key.trim().is_empty() {
        errors.push(ValidationError::MissingAdminKey);
    }

    if config.http.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    if let Err(e) = value.parse::<SocketAddr>() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
            reason: e.to_string(),
        });
    }
}

/// Default-fill and repair the search document in place.
///
/// Bangs are trimmed of surrounding `!` and lower-cased; overrides that can
/// never match or never produce a search are dropped; an empty `lone_url`
/// becomes the origin of the override's url. Returns every problem found.
pub fn normalize_search(search: &mut SearchConfig) -> Vec<ValidationError> {
    let mut issues = Vec::new();

    if search.version != SEARCH_CONFIG_VERSION {
        issues.push(ValidationError::UnknownVersion(search.version.clone()));
    }

    let overrides = std::mem::take(&mut search.bang_overrides);
    let mut seen = HashSet::new();

    for (index, mut entry) in overrides.into_iter().enumerate() {
        let bang = entry.bang.trim().trim_matches('!').to_lowercase();
        if bang.is_empty() {
            issues.push(ValidationError::EmptyBang { index });
            continue;
        }
        if bang.chars().any(char::is_whitespace) {
            issues.push(ValidationError::WhitespaceInBang { bang });
            continue;
        }

        entry.url = entry.url.trim().to_string();
        if !entry.url.contains(QUERY_PLACEHOLDER) {
            issues.push(ValidationError::MissingPlaceholder { bang });
            continue;
        }

        entry.lone_url = entry.lone_url.trim().to_string();
        if entry.lone_url.is_empty() {
            entry.lone_url = origin_of(&entry.url).unwrap_or_default();
        }

        if !seen.insert(bang.clone()) {
            issues.push(ValidationError::DuplicateBang { bang: bang.clone() });
        }

        entry.bang = bang;
        search.bang_overrides.push(entry);
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::BangOverride;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&RouterConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = RouterConfig::default();
        config.listener.bind_address = "not-an-address".to_string();
        config.admin.enabled = true;
        config.http.request_timeout_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(matches!(errors[0], ValidationError::InvalidAddress { .. }));
        assert!(errors.contains(&ValidationError::MissingAdminKey));
        assert!(errors.contains(&ValidationError::ZeroTimeout));
    }

    #[test]
    fn test_metrics_address_only_checked_when_enabled() {
        let mut config = RouterConfig::default();
        config.observability.metrics_address = "nope".to_string();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_normalize_repairs_overrides() {
        let mut search = SearchConfig {
            bang_overrides: vec![
                BangOverride::new(" !GH ", " https://github.com/search?q={query} "),
                BangOverride::new("", "https://x.example/{query}"),
                BangOverride::new("nope", "https://x.example/"),
                BangOverride::new("a b", "https://x.example/{query}"),
            ],
            ..SearchConfig::default()
        };

        let issues = normalize_search(&mut search);

        assert_eq!(search.bang_overrides.len(), 1);
        let gh = &search.bang_overrides[0];
        assert_eq!(gh.bang, "gh");
        assert_eq!(gh.url, "https://github.com/search?q={query}");
        assert_eq!(gh.lone_url, "https://github.com");

        assert_eq!(
            issues,
            vec![
                ValidationError::EmptyBang { index: 1 },
                ValidationError::MissingPlaceholder {
                    bang: "nope".to_string()
                },
                ValidationError::WhitespaceInBang {
                    bang: "a b".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_normalize_keeps_explicit_lone_url() {
        let mut entry = BangOverride::new("w", "https://en.wikipedia.org/?search={query}");
        entry.lone_url = "https://en.wikipedia.org/wiki/Main_Page".to_string();
        let mut search = SearchConfig {
            bang_overrides: vec![entry],
            ..SearchConfig::default()
        };

        assert!(normalize_search(&mut search).is_empty());
        assert_eq!(
            search.bang_overrides[0].lone_url,
            "https://en.wikipedia.org/wiki/Main_Page"
        );
    }

    #[test]
    fn test_normalize_reports_duplicates_and_version() {
        let mut search = SearchConfig {
            version: "0.9".to_string(),
            bang_overrides: vec![
                BangOverride::new("x", "https://one.example/{query}"),
                BangOverride::new("X", "https://two.example/{query}"),
            ],
            ..SearchConfig::default()
        };

        let issues = normalize_search(&mut search);
        assert_eq!(search.bang_overrides.len(), 2);
        assert!(issues.contains(&ValidationError::UnknownVersion("0.9".to_string())));
        assert!(issues.contains(&ValidationError::DuplicateBang {
            bang: "x".to_string()
        }));
    }
}
