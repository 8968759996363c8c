//! Bang definitions.
//!
//! # Data Flow
//! ```text
//! vendor catalogs (bundled `ddg`/`kagi` JSON, or files)
//!     → vendor.rs (parse into VendorBangDefinition[], keep named + ordered)
//!     → compiler (phase 2, enabled catalogs in order)
//!
//! user overrides (config [[search.bang_overrides]])
//!     → format.rs (encoding flags → BangFormat)
//!     → compiler (phase 4)
//! ```

pub mod format;
pub mod vendor;

pub use format::BangFormat;
pub use vendor::{
    load_catalog_or_bundled, load_catalogs, CatalogError, NamedCatalog, VendorBangDefinition,
    VendorCatalog, VendorCatalogs, DDG_CATALOG, KAGI_CATALOG,
};
