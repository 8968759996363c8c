//! HTTP service subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → request.rs (request ID, request span)
//!     → server.rs (search → resolve → redirect, health)
//!     → admin (bearer-protected table dump)
//!
//! Config update channel
//!     → server.rs (recompile, swap table into the store)
//! ```

pub mod request;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer, TableUpdater};
