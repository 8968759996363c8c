//! Compiled table storage.
//!
//! # Data Flow
//! ```text
//! compiler → TableStore::replace(table)
//!     → file.rs (persist JSON, atomic rename)   [optional]
//!     → memory.rs (ArcSwap store)
//!
//! resolver ← Lookup (over the Arc<CompiledTable> snapshot)
//! ```
//!
//! # Design Decisions
//! - Readers take a snapshot (`Arc`) and resolve against it; a concurrent
//!   replace never shows them a partially written table
//! - The resolver only sees the `Lookup` trait, never a store

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::compiler::CompiledTable;

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors that can occur while persisting a table.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Read access to a compiled table by key.
pub trait Lookup {
    fn lookup(&self, key: &str) -> Option<Cow<'_, str>>;
}

impl Lookup for CompiledTable {
    fn lookup(&self, key: &str) -> Option<Cow<'_, str>> {
        self.get(key).map(Cow::Borrowed)
    }
}

impl Lookup for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<Cow<'_, str>> {
        self.get(key).map(|v| Cow::Borrowed(v.as_str()))
    }
}

impl<T: Lookup + ?Sized> Lookup for Arc<T> {
    fn lookup(&self, key: &str) -> Option<Cow<'_, str>> {
        (**self).lookup(key)
    }
}

/// Adapts any `key -> value` closure into a [`Lookup`].
pub struct FnLookup<F>(pub F);

impl<F> Lookup for FnLookup<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn lookup(&self, key: &str) -> Option<Cow<'_, str>> {
        (self.0)(key).map(Cow::Owned)
    }
}

/// Holder of the current compiled table.
pub trait TableStore: Send + Sync {
    /// Snapshot of the current table.
    fn load(&self) -> Arc<CompiledTable>;

    /// Replace the whole table.
    fn replace(&self, table: CompiledTable) -> StoreResult<()>;
}
