//! Resolution of a query against a compiled table.

use std::borrow::Cow;

use crate::compiler::table::{bang_key, lone_key, substitute, BangEntry, ENGINE_KEY};
use crate::resolver::encode::encode;
use crate::resolver::token::find_bang;
use crate::store::Lookup;

/// Used when the table has no `_e` entry.
pub const DEFAULT_ENGINE_TEMPLATE: &str = "https://www.google.com/search?q={query}";

/// Which path produced a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A lone bang's fixed destination.
    Lone,
    /// A bang template filled with the remaining query.
    Bang,
    /// The fallback engine.
    Fallback,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Lone => "lone",
            Outcome::Bang => "bang",
            Outcome::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub url: String,
    pub outcome: Outcome,
    /// Normalized bang key when a bang entry was used.
    pub bang: Option<String>,
}

/// Destination URL for `query`.
pub fn resolve<L: Lookup + ?Sized>(query: &str, lookup: &L) -> String {
    resolve_detailed(query, lookup).url
}

/// Like [`resolve`], also reporting which path was taken.
pub fn resolve_detailed<L: Lookup + ?Sized>(query: &str, lookup: &L) -> Resolution {
    if let Some(token) = find_bang(query) {
        let bang = token.key();
        let remainder = token.remainder(query);

        if remainder.is_empty() {
            if let Some(url) = non_empty(lookup.lookup(&lone_key(&bang))) {
                return Resolution {
                    url: url.into_owned(),
                    outcome: Outcome::Lone,
                    bang: Some(bang),
                };
            }
        } else if let Some(value) = lookup.lookup(&bang_key(&bang)) {
            match BangEntry::decode(&value) {
                Some(entry) => {
                    return Resolution {
                        url: entry.expand(&remainder),
                        outcome: Outcome::Bang,
                        bang: Some(bang),
                    };
                }
                None => tracing::debug!(bang = %bang, "Malformed bang entry, using fallback"),
            }
        }
    }

    Resolution {
        url: fallback(query, lookup),
        outcome: Outcome::Fallback,
        bang: None,
    }
}

fn fallback<L: Lookup + ?Sized>(query: &str, lookup: &L) -> String {
    let encoded = encode(query.trim(), true, true);
    let template = non_empty(lookup.lookup(ENGINE_KEY));
    let url = substitute(template.as_deref().unwrap_or(DEFAULT_ENGINE_TEMPLATE), &encoded);

    if url.is_empty() {
        substitute(DEFAULT_ENGINE_TEMPLATE, &encoded)
    } else {
        url
    }
}

fn non_empty(value: Option<Cow<'_, str>>) -> Option<Cow<'_, str>> {
    value.filter(|v| !v.is_empty())
}
