//! Query resolution subsystem.
//!
//! # Data Flow
//! ```text
//! raw query
//!     → token.rs (first bang token, key, remainder)
//!     → resolve.rs
//!         lone bang        → "_l_<bang>" verbatim
//!         bang + text      → "_b_<bang>" template, encoded per format digit
//!         otherwise/miss   → "_e" template with the original query
//!     → destination URL
//! ```
//!
//! # Design Decisions
//! - Total: every query yields a non-empty URL, nothing is ever rejected
//! - Pure: reads through `Lookup`, never writes, never navigates
//! - An unknown bang searches the default engine for the query as typed,
//!   bang text included

pub mod encode;
pub mod resolve;
pub mod token;

pub use encode::encode;
pub use resolve::{resolve, resolve_detailed, Outcome, Resolution, DEFAULT_ENGINE_TEMPLATE};
pub use token::{find_bang, BangToken};
