//! Config compilation subsystem.
//!
//! # Data Flow
//! ```text
//! SearchConfig + VendorCatalogs
//!     → compile.rs
//!         1. fallback engine (+ adjustments)   → "_e"
//!         2. vendor bangs, catalog by catalog  → "_b_<bang>", "_l_<bang>"
//!         3. instant redirect                  → "_b_"
//!         4. user overrides                    → "_b_<bang>", "_l_<bang>"
//!     → CompiledTable (flat, immutable)
//!     → store (atomic swap)
//! ```
//!
//! # Design Decisions
//! - Phases write into one ordered map; a later phase overwrites an earlier
//!   phase's key, which is the whole precedence policy
//! - Compilation is pure and total; it is rerun from scratch on every edit
//! - All lookup cost is paid here, never on the query path

pub mod compile;
pub mod table;

pub use compile::compile;
pub use table::{BangEntry, CompiledTable};
