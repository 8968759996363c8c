//! Vendor-supplied bang catalog.
//!
//! # Responsibilities
//! - Parse catalog JSON into [`VendorBangDefinition`]s
//! - Ship bundled catalogs (`ddg`, `kagi`) so the service works without
//!   external data
//! - Keep several named catalogs in a fixed order ([`VendorCatalogs`])
//! - Derive the final template and lone destination for one definition
//!
//! # Design Decisions
//! - Catalogs are read-only input; the compiler never edits them
//! - A later catalog's definition replaces an earlier one's for the same bang
//! - A catalog file that fails to load is replaced by the bundled catalog
//!   of the same name, or by nothing

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::{Origin, Url};

use crate::bangs::BangFormat;
use crate::compiler::table::{ENGINE_PLACEHOLDER, QUERY_PLACEHOLDER};
use crate::config::schema::{CatalogConfig, CatalogSource};

pub const DDG_CATALOG: &str = "ddg";
pub const KAGI_CATALOG: &str = "kagi";

/// Bundled catalogs in compile order.
const BUNDLED_CATALOGS: &[(&str, &str)] = &[
    (DDG_CATALOG, include_str!("../../data/ddg_bangs.json")),
    (KAGI_CATALOG, include_str!("../../data/kagi_bangs.json")),
];

/// Errors that can occur while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One entry of a vendor catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorBangDefinition {
    /// Trigger, without `!`.
    pub bang: String,

    /// Display name.
    pub name: String,

    /// Host (and optional path) opened by the lone form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    /// Template; may embed `{engine}` and `{query}`.
    pub url: String,

    #[serde(default = "full_format")]
    pub format: BangFormat,

    /// Query text appended after the user's query.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub suffix: String,
}

fn full_format() -> BangFormat {
    BangFormat::FULL
}

impl VendorBangDefinition {
    /// The `_b_` template for this definition.
    ///
    /// `{engine}` becomes `engine_template`; the suffix, encoded with this
    /// definition's format, is placed right after `{query}`.
    pub fn template(&self, engine_template: &str) -> String {
        let template = self.url.replace(ENGINE_PLACEHOLDER, engine_template);
        if self.suffix.is_empty() {
            return template;
        }

        let suffix = self.format.apply(&self.suffix);
        template.replacen(
            QUERY_PLACEHOLDER,
            &format!("{QUERY_PLACEHOLDER}{suffix}"),
            1,
        )
    }

    /// Destination of the lone form: the domain when one is given, else the
    /// origin of `template`.
    pub fn lone_url(&self, template: &str) -> Option<String> {
        match self.domain.as_deref().map(str::trim) {
            Some(domain) if !domain.is_empty() => Some(format!("https://{domain}")),
            _ => origin_of(template),
        }
    }
}

/// `scheme://host[:port]` of a URL template, if it has one.
pub fn origin_of(template: &str) -> Option<String> {
    let url = Url::parse(template).ok()?;
    match url.origin() {
        origin @ Origin::Tuple(..) => Some(origin.ascii_serialization()),
        Origin::Opaque(_) => None,
    }
}

/// An ordered list of vendor bang definitions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VendorCatalog {
    definitions: Vec<VendorBangDefinition>,
}

impl VendorCatalog {
    pub fn new(definitions: Vec<VendorBangDefinition>) -> Self {
        Self { definitions }
    }

    /// The bundled catalog called `name`, if there is one.
    pub fn bundled(name: &str) -> Option<Self> {
        let (_, json) = BUNDLED_CATALOGS.iter().find(|(n, _)| *n == name)?;
        match Self::from_json(json) {
            Ok(catalog) => Some(catalog),
            Err(e) => {
                tracing::error!(catalog = name, error = %e, "Bundled bang catalog is invalid");
                Some(Self::default())
            }
        }
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VendorBangDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl<'a> IntoIterator for &'a VendorCatalog {
    type Item = &'a VendorBangDefinition;
    type IntoIter = std::slice::Iter<'a, VendorBangDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A catalog with the name its enable flag is keyed by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedCatalog {
    pub name: String,
    pub catalog: VendorCatalog,
}

/// Named catalogs in compile order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VendorCatalogs {
    catalogs: Vec<NamedCatalog>,
}

impl VendorCatalogs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every bundled catalog, `ddg` first.
    pub fn bundled() -> Self {
        let mut catalogs = Self::new();
        for (name, _) in BUNDLED_CATALOGS {
            if let Some(catalog) = VendorCatalog::bundled(name) {
                catalogs.push(*name, catalog);
            }
        }
        catalogs
    }

    /// Append `catalog`. A catalog already registered under `name` is
    /// replaced in place and keeps its position.
    pub fn push(&mut self, name: impl Into<String>, catalog: VendorCatalog) {
        let name = name.into();
        match self.catalogs.iter_mut().find(|c| c.name == name) {
            Some(existing) => existing.catalog = catalog,
            None => self.catalogs.push(NamedCatalog { name, catalog }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&VendorCatalog> {
        self.catalogs
            .iter()
            .find(|c| c.name == name)
            .map(|c| &c.catalog)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NamedCatalog> {
        self.catalogs.iter()
    }

    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }
}

impl From<VendorCatalog> for VendorCatalogs {
    /// A set holding only `catalog`, named `ddg`.
    fn from(catalog: VendorCatalog) -> Self {
        let mut catalogs = Self::new();
        catalogs.push(DDG_CATALOG, catalog);
        catalogs
    }
}

impl<'a> IntoIterator for &'a VendorCatalogs {
    type Item = &'a NamedCatalog;
    type IntoIter = std::slice::Iter<'a, NamedCatalog>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Load the catalog `name` from `path`. Without a path, or when the file
/// cannot be loaded, the bundled catalog of that name is used; an unknown
/// name then yields an empty catalog.
pub fn load_catalog_or_bundled(name: &str, path: Option<&Path>) -> VendorCatalog {
    if let Some(path) = path {
        match VendorCatalog::from_path(path) {
            Ok(catalog) => {
                tracing::info!(catalog = name, path = ?path, bangs = catalog.len(), "Loaded bang catalog");
                return catalog;
            }
            Err(e) => {
                tracing::warn!(catalog = name, path = ?path, error = %e, "Failed to load bang catalog, using bundled catalog");
            }
        }
    }

    VendorCatalog::bundled(name).unwrap_or_else(|| {
        tracing::warn!(catalog = name, "No bundled catalog with this name");
        VendorCatalog::default()
    })
}

/// Load every configured catalog in order; all bundled catalogs when
/// none are configured.
pub fn load_catalogs(config: &CatalogConfig) -> VendorCatalogs {
    if config.sources.is_empty() {
        return VendorCatalogs::bundled();
    }

    let mut catalogs = VendorCatalogs::new();
    for CatalogSource { name, path } in &config.sources {
        catalogs.push(name.as_str(), load_catalog_or_bundled(name, path.as_deref().map(Path::new)));
    }
    catalogs
}
