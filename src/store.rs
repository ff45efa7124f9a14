//! Persistence boundary: a single table of tournament records keyed by tournament id.
//!
//! Writes replace the whole record (last write wins). Store errors are returned to the caller
//! as-is; nothing here retries.

use crate::models::{Tournament, TournamentId};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

/// Errors from the persistence layer.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Serde(serde_json::Error),
    /// A writer panicked while holding the table lock.
    Poisoned,
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "storage I/O error: {}", e),
            StoreError::Serde(e) => write!(f, "storage format error: {}", e),
            StoreError::Poisoned => write!(f, "lock error"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Serde(e) => Some(e),
            StoreError::Poisoned => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serde(e)
    }
}

/// Key-value table of tournaments.
pub trait TournamentStore: Send + Sync {
    fn get(&self, id: TournamentId) -> Result<Option<Tournament>, StoreError>;
    /// Insert or replace the record with `tournament.id`.
    fn put(&self, tournament: &Tournament) -> Result<(), StoreError>;
    /// Remove a record; returns whether it existed.
    fn delete(&self, id: TournamentId) -> Result<bool, StoreError>;
    /// All records, oldest first.
    fn list(&self) -> Result<Vec<Tournament>, StoreError>;
}

/// In-memory table. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    table: RwLock<HashMap<TournamentId, Tournament>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_records(records: Vec<Tournament>) -> Self {
        Self {
            table: RwLock::new(records.into_iter().map(|t| (t.id, t)).collect()),
        }
    }
}

impl TournamentStore for MemoryStore {
    fn get(&self, id: TournamentId) -> Result<Option<Tournament>, StoreError> {
        let g = self.table.read().map_err(|_| StoreError::Poisoned)?;
        Ok(g.get(&id).cloned())
    }

    fn put(&self, tournament: &Tournament) -> Result<(), StoreError> {
        let mut g = self.table.write().map_err(|_| StoreError::Poisoned)?;
        g.insert(tournament.id, tournament.clone());
        Ok(())
    }

    fn delete(&self, id: TournamentId) -> Result<bool, StoreError> {
        let mut g = self.table.write().map_err(|_| StoreError::Poisoned)?;
        Ok(g.remove(&id).is_some())
    }

    fn list(&self) -> Result<Vec<Tournament>, StoreError> {
        let g = self.table.read().map_err(|_| StoreError::Poisoned)?;
        let mut all: Vec<_> = g.values().cloned().collect();
        all.sort_by_key(|t| t.created_at);
        Ok(all)
    }
}

/// Table kept in memory and written to a JSON file (an array of records) after every write.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryStore,
    /// Serializes file writes.
    flush_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open the store at `path`, loading existing records if the file exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let records: Vec<Tournament> = if path.exists() {
            serde_json::from_reader(BufReader::new(File::open(&path)?))?
        } else {
            Vec::new()
        };
        log::info!("Loaded {} tournament(s) from {}", records.len(), path.display());
        Ok(Self {
            path,
            inner: MemoryStore::with_records(records),
            flush_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `records` to a temporary file, then move it over the real one.
    fn write_snapshot(&self, records: &[Tournament]) -> Result<(), StoreError> {
        let tmp = self.path.with_extension("tmp");
        let mut writer = BufWriter::new(File::create(&tmp)?);
        serde_json::to_writer_pretty(&mut writer, records)?;
        writer.flush()?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Writes hold `flush_lock` and reach the in-memory table only after the file write succeeds,
/// so a failed write leaves the table and the real file untouched.
impl TournamentStore for JsonFileStore {
    fn get(&self, id: TournamentId) -> Result<Option<Tournament>, StoreError> {
        self.inner.get(id)
    }

    fn put(&self, tournament: &Tournament) -> Result<(), StoreError> {
        let _guard = self.flush_lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut records = self.inner.list()?;
        match records.iter_mut().find(|t| t.id == tournament.id) {
            Some(existing) => *existing = tournament.clone(),
            None => records.push(tournament.clone()),
        }
        self.write_snapshot(&records)?;
        self.inner.put(tournament)
    }

    fn delete(&self, id: TournamentId) -> Result<bool, StoreError> {
        let _guard = self.flush_lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut records = self.inner.list()?;
        let before = records.len();
        records.retain(|t| t.id != id);
        if records.len() == before {
            return Ok(false);
        }
        self.write_snapshot(&records)?;
        self.inner.delete(id)
    }

    fn list(&self) -> Result<Vec<Tournament>, StoreError> {
        self.inner.list()
    }
}
