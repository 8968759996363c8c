//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (resolution counters, table size gauge)
//!
//! Consumers:
//!     → stderr (fmt layer, filtered by RUST_LOG or the configured level)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every request span (tower-http)
//! - Metrics are no-ops until an exporter is installed

pub mod logging;
pub mod metrics;

pub use logging::{init_logging, LogHandle, LogLevelError};
