//! Search engine subsystem.
//!
//! # Data Flow
//! ```text
//! EngineReference (from config)
//!     → catalog.rs (resolve name against built-ins, or Custom url)
//!     → adjustments.rs (apply enabled per-engine transforms)
//!     → final fallback template (contains "{query}")
//! ```
//!
//! # Design Decisions
//! - The built-in catalog is closed and ordered; the first entry is the
//!   fallback for anything that does not resolve
//! - Resolution never fails
//! - Adjustments are declarative table rows, applied in table order

pub mod adjustments;
pub mod catalog;

pub use adjustments::{adjusted_template, EngineAdjustment, EngineSetting, Transform};
pub use catalog::{EngineReference, SearchEngine, BUILTIN_ENGINES, CUSTOM_ENGINE};
