//! Built-in search engines and sparse engine references.

use serde::{Deserialize, Serialize};

use crate::compiler::table::QUERY_PLACEHOLDER;

/// Name of the synthetic engine whose template is supplied by the user.
pub const CUSTOM_ENGINE: &str = "Custom";

/// A catalog entry compiled into the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinEngine {
    pub name: &'static str,
    pub url: &'static str,
    /// "Jump to first result" template, for engines that have one.
    pub first_result: Option<&'static str>,
}

/// The closed catalog. Order matters: the first entry is the fallback.
pub const BUILTIN_ENGINES: &[BuiltinEngine] = &[
    BuiltinEngine {
        name: "Google",
        url: "https://www.google.com/search?q={query}",
        first_result: None,
    },
    BuiltinEngine {
        name: "Bing",
        url: "https://www.bing.com/search?q={query}",
        first_result: None,
    },
    BuiltinEngine {
        name: "DuckDuckGo",
        url: "https://duckduckgo.com/?q={query}",
        // A leading backslash is DuckDuckGo's "feeling ducky" operator.
        first_result: Some("https://duckduckgo.com/?q=%5C{query}"),
    },
];

/// A fully resolved search engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEngine {
    pub name: String,
    /// Search template containing `{query}`.
    pub url: String,
    /// Template used by the instant-redirect shortcut, if supported.
    pub first_result: Option<String>,
}

impl SearchEngine {
    pub fn can_instant_redirect(&self) -> bool {
        self.first_result.is_some()
    }

    pub fn is_custom(&self) -> bool {
        self.name == CUSTOM_ENGINE
    }

    /// A user-defined engine. Its instant redirect reuses its own template.
    pub fn custom(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            name: CUSTOM_ENGINE.to_string(),
            first_result: Some(url.clone()),
            url,
        }
    }

    /// First catalog entry.
    pub fn default_engine() -> Self {
        Self::from(&BUILTIN_ENGINES[0])
    }
}

impl From<&BuiltinEngine> for SearchEngine {
    fn from(engine: &BuiltinEngine) -> Self {
        Self {
            name: engine.name.to_string(),
            url: engine.url.to_string(),
            first_result: engine.first_result.map(str::to_string),
        }
    }
}

/// Sparse pointer to a [`SearchEngine`].
///
/// Only the `Custom` variant carries a `url`; every other name is looked up
/// in [`BUILTIN_ENGINES`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineReference {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Default for EngineReference {
    fn default() -> Self {
        Self::named(BUILTIN_ENGINES[0].name)
    }
}

impl EngineReference {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: None,
        }
    }

    pub fn custom(url: impl Into<String>) -> Self {
        Self {
            name: CUSTOM_ENGINE.to_string(),
            url: Some(url.into()),
        }
    }

    /// Resolve to a concrete engine.
    ///
    /// Unknown names, and a `Custom` reference without a usable template,
    /// resolve to the first built-in engine.
    pub fn resolve(&self) -> SearchEngine {
        if self.name.eq_ignore_ascii_case(CUSTOM_ENGINE) {
            return match self.url.as_deref().map(str::trim) {
                Some(url) if url.contains(QUERY_PLACEHOLDER) => SearchEngine::custom(url),
                _ => {
                    tracing::warn!("Custom engine has no usable template, using default engine");
                    SearchEngine::default_engine()
                }
            };
        }

        match BUILTIN_ENGINES
            .iter()
            .find(|engine| engine.name.eq_ignore_ascii_case(&self.name))
        {
            Some(engine) => SearchEngine::from(engine),
            None => {
                tracing::warn!(engine = %self.name, "Unknown engine, using default engine");
                SearchEngine::default_engine()
            }
        }
    }

    /// Resolve for the instant-redirect shortcut.
    ///
    /// Engines without a first-result shape are replaced by the first
    /// built-in engine that has one.
    pub fn resolve_instant(&self) -> SearchEngine {
        let engine = self.resolve();
        if engine.can_instant_redirect() {
            return engine;
        }

        match BUILTIN_ENGINES.iter().find(|e| e.first_result.is_some()) {
            Some(capable) => {
                tracing::warn!(
                    engine = %engine.name,
                    replacement = capable.name,
                    "Engine cannot instant redirect"
                );
                SearchEngine::from(capable)
            }
            None => engine,
        }
    }
}
