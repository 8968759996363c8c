//! The compiled lookup table and its wire format.
//!
//! # Key Families
//! - `_e` → fallback engine template
//! - `_b_<bang>` → format digit followed by a template
//! - `_l_<bang>` → literal destination for a lone bang
//!
//! `_b_` (the empty bang) is the instant-redirect shortcut.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::bangs::BangFormat;

/// Placeholder replaced by the (encoded) query.
pub const QUERY_PLACEHOLDER: &str = "{query}";

/// Placeholder replaced by the fallback engine template in vendor bangs.
pub const ENGINE_PLACEHOLDER: &str = "{engine}";

pub const ENGINE_KEY: &str = "_e";
pub const BANG_PREFIX: &str = "_b_";
pub const LONE_PREFIX: &str = "_l_";

/// Bang name of the instant-redirect shortcut.
pub const INSTANT_BANG: &str = "";

pub fn bang_key(bang: &str) -> String {
    format!("{BANG_PREFIX}{bang}")
}

pub fn lone_key(bang: &str) -> String {
    format!("{LONE_PREFIX}{bang}")
}

/// Replace the first `{query}` in `template` with `value`.
pub fn substitute(template: &str, value: &str) -> String {
    template.replacen(QUERY_PLACEHOLDER, value, 1)
}

/// A decoded `_b_` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BangEntry<'a> {
    pub format: BangFormat,
    pub template: &'a str,
}

impl<'a> BangEntry<'a> {
    pub fn new(format: BangFormat, template: &'a str) -> Self {
        Self { format, template }
    }

    /// Split a stored value into its format digit and template.
    ///
    /// Returns `None` for an empty value or a leading character that is not
    /// a format digit.
    pub fn decode(value: &'a str) -> Option<Self> {
        let digit = value.chars().next()?;
        let format = BangFormat::from_digit(digit)?;
        Some(Self {
            format,
            template: &value[digit.len_utf8()..],
        })
    }

    pub fn to_wire(&self) -> String {
        let mut value = String::with_capacity(self.template.len() + 1);
        value.push(self.format.digit());
        value.push_str(self.template);
        value
    }

    /// The template with `query` encoded and substituted.
    pub fn expand(&self, query: &str) -> String {
        substitute(self.template, &self.format.apply(query))
    }
}

/// Flat string-to-string table produced by the compiler.
///
/// Backed by an ordered map so serialization is byte-for-byte
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompiledTable {
    entries: BTreeMap<String, String>,
}

impl CompiledTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert, replacing any earlier value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn set_engine(&mut self, template: impl Into<String>) {
        self.insert(ENGINE_KEY, template);
    }

    pub fn set_bang(&mut self, bang: &str, entry: BangEntry<'_>) {
        self.insert(bang_key(bang), entry.to_wire());
    }

    pub fn set_lone(&mut self, bang: &str, url: impl Into<String>) {
        self.insert(lone_key(bang), url);
    }

    pub fn engine_template(&self) -> Option<&str> {
        self.get(ENGINE_KEY)
    }
}

impl FromIterator<(String, String)> for CompiledTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys() {
        assert_eq!(bang_key("gh"), "_b_gh");
        assert_eq!(lone_key("gh"), "_l_gh");
        assert_eq!(bang_key(INSTANT_BANG), "_b_");
    }

    #[test]
    fn test_entry_wire_format() {
        let entry = BangEntry::new(BangFormat::new(true, false), "https://x.example/?q={query}");
        assert_eq!(entry.to_wire(), "1https://x.example/?q={query}");

        let decoded = BangEntry::decode("1https://x.example/?q={query}").unwrap();
        assert_eq!(decoded, entry);
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert_eq!(BangEntry::decode(""), None);
        assert_eq!(BangEntry::decode("https://x.example/{query}"), None);
        assert_eq!(BangEntry::decode("9https://x.example/{query}"), None);
    }

    #[test]
    fn test_expand_replaces_first_placeholder_only() {
        let entry = BangEntry::new(BangFormat::FULL, "https://x.example/{query}/{query}");
        assert_eq!(entry.expand("a b"), "https://x.example/a+b/{query}");
    }

    #[test]
    fn test_serializes_as_flat_object() {
        let mut table = CompiledTable::new();
        table.set_engine("https://e.example/?q={query}");
        table.set_lone("gh", "https://github.com");
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(
            json,
            r#"{"_e":"https://e.example/?q={query}","_l_gh":"https://github.com"}"#
        );
    }
}
