//! File-backed table store.
//!
//! The table is written as one flat JSON object. Writes go to a sibling
//! temporary file that is renamed over the target, so the file on disk is
//! always either the old or the new table.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::compiler::CompiledTable;
use crate::store::{MemoryStore, StoreResult, TableStore};

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    memory: MemoryStore,
}

impl FileStore {
    /// Open the store at `path`, loading a previously persisted table if
    /// one exists.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let table = match read_table(&path) {
            Ok(table) => {
                tracing::info!(path = ?path, entries = table.len(), "Loaded persisted table");
                table
            }
            Err(crate::store::StoreError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                CompiledTable::new()
            }
            Err(e) => return Err(e),
        };

        Ok(Self {
            path,
            memory: MemoryStore::new(table),
        })
    }
}

impl TableStore for FileStore {
    fn load(&self) -> Arc<CompiledTable> {
        self.memory.load()
    }

    /// Persist first; the in-memory table only changes once the file did.
    fn replace(&self, table: CompiledTable) -> StoreResult<()> {
        write_table(&self.path, &table)?;
        self.memory.swap(table);
        Ok(())
    }
}

/// Read a persisted table.
pub fn read_table(path: &Path) -> StoreResult<CompiledTable> {
    let file = File::open(path)?;
    let table = serde_json::from_reader(BufReader::new(file))?;
    Ok(table)
}

/// Write `table` to `path` atomically.
pub fn write_table(path: &Path, table: &CompiledTable) -> StoreResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tmp = path.with_extension("tmp");
    {
        let mut writer = BufWriter::new(File::create(&tmp)?);
        serde_json::to_writer_pretty(&mut writer, table)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }
    fs::rename(&tmp, path)?;

    tracing::debug!(path = ?path, entries = table.len(), "Persisted table");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CompiledTable {
        let mut table = CompiledTable::new();
        table.insert("_e", "https://e.example/?q={query}");
        table.insert("_b_gh", "3https://github.com/search?q={query}");
        table.insert("_l_gh", "https://github.com");
        table
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("table.json")).unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_replace_persists_and_reopens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("table.json");

        let store = FileStore::open(&path).unwrap();
        store.replace(sample()).unwrap();
        assert_eq!(*store.load(), sample());
        assert!(!path.with_extension("tmp").exists());

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(*reopened.load(), sample());
    }

    #[test]
    fn test_open_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.json");
        fs::write(&path, "{not json").unwrap();

        assert!(matches!(
            FileStore::open(&path),
            Err(crate::store::StoreError::Serialize(_))
        ));
    }
}
