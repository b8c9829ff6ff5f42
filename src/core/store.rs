//! Record stores: the append-only persistence collaborator
//!
//! The pipeline only ever calls `append`. Failures are reported to the
//! caller here; the pipeline logs and moves on.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::info;

use crate::config::StoreConfig;
use crate::error::{Result, SolaceError};
use crate::types::Record;

/// Append-only record store
pub trait RecordStore: Send + Sync {
    fn append(&self, record: Record) -> Result<()>;

    /// All records in append order
    fn records(&self) -> Result<Vec<Record>>;
}

/// Build the store named by the config: JSONL file if a path is set, memory otherwise
pub fn open_store(config: &StoreConfig) -> Arc<dyn RecordStore> {
    match &config.path {
        Some(path) => {
            info!(path = %path.display(), "using JSONL record store");
            Arc::new(JsonlStore::new(path))
        }
        None => Arc::new(MemoryStore::new()),
    }
}

/// In-process store
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<Record>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RecordStore for MemoryStore {
    fn append(&self, record: Record) -> Result<()> {
        self.records
            .lock()
            .map_err(|_| SolaceError::Store("memory store lock poisoned".to_string()))?
            .push(record);
        Ok(())
    }

    fn records(&self) -> Result<Vec<Record>> {
        Ok(self
            .records
            .lock()
            .map_err(|_| SolaceError::Store("memory store lock poisoned".to_string()))?
            .clone())
    }
}

/// One JSON record per line
#[derive(Debug)]
pub struct JsonlStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordStore for JsonlStore {
    fn append(&self, record: Record) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| SolaceError::Store("jsonl store lock poisoned".to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let line = serde_json::to_string(&record)?;
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        writeln!(file, "{}", line)?;
        Ok(())
    }

    fn records(&self) -> Result<Vec<Record>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        content
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| serde_json::from_str(l).map_err(SolaceError::from))
            .collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================
