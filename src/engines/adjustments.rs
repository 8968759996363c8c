//! Per-engine template adjustments.
//!
//! # Responsibilities
//! - Map (engine, setting) pairs to template transforms
//! - Apply every enabled transform to the fallback engine's template
//!
//! # Design Decisions
//! - Declarative table, no engine-specific branches in the compiler
//! - Transforms apply in table order; a host swap runs before any
//!   parameter is appended to the swapped template
//! - Custom engines are never adjusted

use crate::config::schema::SearchSettings;
use crate::engines::catalog::SearchEngine;

/// A user-facing toggle that may adjust an engine's template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineSetting {
    /// Google "web" results only, without AI overviews.
    GoogleUdm14,
    /// Bing without its script-heavy result page.
    BingNoJs,
    /// DuckDuckGo's script-free HTML frontend.
    DuckNoJs,
    /// DuckDuckGo strict safe search.
    DuckSafeSearch,
}

impl EngineSetting {
    pub fn is_enabled(self, settings: &SearchSettings) -> bool {
        match self {
            EngineSetting::GoogleUdm14 => settings.google_udm14,
            EngineSetting::BingNoJs => settings.bing_no_js,
            EngineSetting::DuckNoJs => settings.duck_no_js,
            EngineSetting::DuckSafeSearch => settings.duck_safe_search,
        }
    }
}

/// A rewrite of a search template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Append a `key=value` pair to the query string.
    AppendParam(&'static str),
    /// Swap a leading prefix (scheme, host and path) for another.
    ReplacePrefix {
        from: &'static str,
        to: &'static str,
    },
}

impl Transform {
    pub fn apply(&self, template: &str) -> String {
        match self {
            Transform::AppendParam(param) => {
                let separator = if template.contains('?') { '&' } else { '?' };
                format!("{template}{separator}{param}")
            }
            Transform::ReplacePrefix { from, to } => match template.strip_prefix(from) {
                Some(rest) => format!("{to}{rest}"),
                None => template.to_string(),
            },
        }
    }
}

/// One row of the adjustment table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineAdjustment {
    pub engine: &'static str,
    pub setting: EngineSetting,
    pub transform: Transform,
}

pub const ENGINE_ADJUSTMENTS: &[EngineAdjustment] = &[
    EngineAdjustment {
        engine: "Google",
        setting: EngineSetting::GoogleUdm14,
        transform: Transform::AppendParam("udm=14"),
    },
    EngineAdjustment {
        engine: "Bing",
        setting: EngineSetting::BingNoJs,
        transform: Transform::AppendParam("nojs=1"),
    },
    EngineAdjustment {
        engine: "DuckDuckGo",
        setting: EngineSetting::DuckNoJs,
        transform: Transform::ReplacePrefix {
            from: "https://duckduckgo.com/",
            to: "https://html.duckduckgo.com/html/",
        },
    },
    EngineAdjustment {
        engine: "DuckDuckGo",
        setting: EngineSetting::DuckSafeSearch,
        transform: Transform::AppendParam("kp=1"),
    },
];

/// The engine's template with every enabled adjustment applied.
pub fn adjusted_template(engine: &SearchEngine, settings: &SearchSettings) -> String {
    ENGINE_ADJUSTMENTS
        .iter()
        .filter(|adj| adj.engine == engine.name && adj.setting.is_enabled(settings))
        .fold(engine.url.clone(), |template, adj| adj.transform.apply(&template))
}
