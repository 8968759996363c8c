//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::engines::EngineReference;

/// Current version of the `[search]` document.
pub const SEARCH_CONFIG_VERSION: &str = "1.0";

/// Root configuration for the bang router.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct RouterConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Redirect and request handling.
    pub http: HttpConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Admin endpoint settings.
    pub admin: AdminConfig,

    /// Compiled table persistence.
    pub store: StoreConfig,

    /// Vendor bang catalog source.
    pub catalog: CatalogConfig,

    /// The user's search preferences.
    pub search: SearchConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

/// HTTP status used for search redirects.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RedirectStatus {
    /// 302
    Found,
    /// 303
    #[default]
    SeeOther,
    /// 307
    Temporary,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds.
    pub request_timeout_secs: u64,

    pub redirect_status: RedirectStatus,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 10,
            redirect_status: RedirectStatus::default(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

/// Admin endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct AdminConfig {
    /// Expose `/admin/table`.
    pub enabled: bool,

    /// API key for authentication (Bearer token).
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    /// File the compiled table is persisted to. In-memory only when unset.
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Vendor catalogs in compile order. Every bundled catalog is used when
    /// empty.
    pub sources: Vec<CatalogSource>,
}

/// One `[[catalog.sources]]` entry.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct CatalogSource {
    /// Key for `[search.vendor_catalogs]`; also picks the bundled catalog
    /// used when `path` is unset or unreadable.
    pub name: String,

    /// Catalog JSON file.
    #[serde(default)]
    pub path: Option<String>,
}

/// The configuration document the compiler consumes.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    pub version: String,

    /// Include vendor catalogs at all.
    pub use_vendor_bangs: bool,

    /// Per-catalog switches (e.g. `ddg = true`, `kagi = false`). A catalog
    /// without an entry is enabled.
    pub vendor_catalogs: BTreeMap<String, bool>,

    /// Engine used when no bang matches.
    pub fallback_engine: EngineReference,

    pub instant_redirect: InstantRedirectConfig,

    /// Per-engine adjustments of the fallback template.
    pub settings: SearchSettings,

    /// User-authored bangs. Always win over vendor bangs.
    pub bang_overrides: Vec<BangOverride>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            version: SEARCH_CONFIG_VERSION.to_string(),
            use_vendor_bangs: true,
            vendor_catalogs: BTreeMap::new(),
            fallback_engine: EngineReference::default(),
            instant_redirect: InstantRedirectConfig::default(),
            settings: SearchSettings::default(),
            bang_overrides: Vec::new(),
        }
    }
}

impl SearchConfig {
    /// Whether the catalog called `name` takes part in compilation.
    pub fn catalog_enabled(&self, name: &str) -> bool {
        self.use_vendor_bangs && self.vendor_catalogs.get(name).copied().unwrap_or(true)
    }
}

/// Empty-bang (`!`) shortcut to an engine's first result.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct InstantRedirectConfig {
    pub enabled: bool,
    pub engine: EngineReference,
}

impl Default for InstantRedirectConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            engine: EngineReference::named("DuckDuckGo"),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SearchSettings {
    /// Append `udm=14` to Google searches.
    pub google_udm14: bool,

    /// Ask Bing for its script-free result page.
    pub bing_no_js: bool,

    /// Use DuckDuckGo's HTML frontend.
    pub duck_no_js: bool,

    /// Strict DuckDuckGo safe search.
    pub duck_safe_search: bool,
}

/// A user-authored bang.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct BangOverride {
    /// Trigger, without `!`. Case-insensitive.
    pub bang: String,

    /// Template containing `{query}`.
    pub url: String,

    /// Destination when the bang is typed alone.
    #[serde(default)]
    pub lone_url: String,

    #[serde(default = "default_true")]
    pub url_encode_placeholder: bool,

    #[serde(default = "default_true")]
    pub url_encode_space_to_plus: bool,
}

fn default_true() -> bool {
    true
}

impl BangOverride {
    /// An override with both encoding flags on and no lone destination.
    pub fn new(bang: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            bang: bang.into(),
            url: url.into(),
            lone_url: String::new(),
            url_encode_placeholder: true,
            url_encode_space_to_plus: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config() {
        let config: RouterConfig = toml::from_str("").unwrap();
        assert_eq!(config, RouterConfig::default());
        assert!(config.search.use_vendor_bangs);
        assert_eq!(config.search.fallback_engine.name, "Google");
        assert_eq!(config.search.instant_redirect.engine.name, "DuckDuckGo");
    }

    #[test]
    fn test_full_search_document() {
        let config: RouterConfig = toml::from_str(
            r#"
            [listener]
            bind_address = "0.0.0.0:9000"

            [http]
            redirect_status = "found"

            [search]
            use_vendor_bangs = false
            fallback_engine = { name = "Custom", url = "https://s.example/?q={query}" }
            instant_redirect = { enabled = true, engine = { name = "DuckDuckGo" } }

            [search.settings]
            google_udm14 = true

            [[search.bang_overrides]]
            bang = "gh"
            url = "https://github.com/search?q={query}"
            lone_url = "https://github.com"
            url_encode_space_to_plus = false
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "0.0.0.0:9000");
        assert_eq!(config.http.redirect_status, RedirectStatus::Found);
        assert!(!config.search.use_vendor_bangs);
        assert_eq!(
            config.search.fallback_engine.url.as_deref(),
            Some("https://s.example/?q={query}")
        );
        assert!(config.search.instant_redirect.enabled);
        assert!(config.search.settings.google_udm14);

        let gh = &config.search.bang_overrides[0];
        assert!(gh.url_encode_placeholder);
        assert!(!gh.url_encode_space_to_plus);
        assert_eq!(gh.lone_url, "https://github.com");
    }

    #[test]
    fn test_catalog_sources_and_switches() {
        let config: RouterConfig = toml::from_str(
            r#"
            [[catalog.sources]]
            name = "kagi"

            [[catalog.sources]]
            name = "ddg"
            path = "/etc/bangs/ddg.json"

            [search.vendor_catalogs]
            kagi = false

            [search.settings]
            bing_no_js = true
            "#,
        )
        .unwrap();

        assert_eq!(config.catalog.sources.len(), 2);
        assert_eq!(config.catalog.sources[0].name, "kagi");
        assert_eq!(config.catalog.sources[0].path, None);
        assert_eq!(config.catalog.sources[1].path.as_deref(), Some("/etc/bangs/ddg.json"));

        assert!(!config.search.catalog_enabled("kagi"));
        assert!(config.search.catalog_enabled("ddg"));
        assert!(config.search.catalog_enabled("unlisted"));
        assert!(config.search.settings.bing_no_js);

        let mut search = config.search.clone();
        search.use_vendor_bangs = false;
        assert!(!search.catalog_enabled("ddg"));
    }
}
