//! Bang search router library.
//!
//! # Architecture Overview
//!
//! ```text
//!   bang-router.toml                      vendor catalogs (JSON)
//!         │                                        │
//!         ▼                                        ▼
//!   ┌──────────┐   [search]   ┌──────────┐   ┌──────────┐
//!   │  config  │─────────────▶│ compiler │◀──│  bangs   │
//!   └──────────┘              └────┬─────┘   └──────────┘
//!         ▲                        │ CompiledTable
//!   watcher / SIGHUP               ▼
//!                             ┌──────────┐
//!                             │  store   │ (memory or JSON file)
//!                             └────┬─────┘
//!                                  │ Lookup
//!   GET /search?q=...   ┌──────┐   ▼        ┌──────────┐
//!   ───────────────────▶│ http │────────────▶│ resolver │
//!   ◀─── 303 Location ──└──────┘            └──────────┘
//! ```

// Core subsystems
pub mod bangs;
pub mod compiler;
pub mod engines;
pub mod resolver;
pub mod store;

// Service
pub mod admin;
pub mod config;
pub mod http;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use compiler::{compile, CompiledTable};
pub use config::schema::RouterConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use resolver::resolve;
pub use store::Lookup;
