//! In-memory table store.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::compiler::CompiledTable;
use crate::observability::metrics;
use crate::store::{StoreResult, TableStore};

/// Lock-free store holding the current table behind an [`ArcSwap`].
#[derive(Debug)]
pub struct MemoryStore {
    current: ArcSwap<CompiledTable>,
}

impl MemoryStore {
    pub fn new(table: CompiledTable) -> Self {
        Self {
            current: ArcSwap::from_pointee(table),
        }
    }

    /// Swap in `table` without persisting it.
    pub fn swap(&self, table: CompiledTable) {
        metrics::record_table_size(table.len());
        self.current.store(Arc::new(table));
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(CompiledTable::new())
    }
}

impl TableStore for MemoryStore {
    fn load(&self) -> Arc<CompiledTable> {
        self.current.load_full()
    }

    fn replace(&self, table: CompiledTable) -> StoreResult<()> {
        self.swap(table);
        Ok(())
    }
}
