//! redb-based storage for staged selections
//!
//! One table, keyed by [`StageKey`], values are JSON envelopes carrying a
//! schema version. Reads never fail the caller: a missing, unreadable or
//! outdated entry is logged and treated as absent. Writes do fail, since
//! losing a selection silently is worse than telling the user.

use super::StageKey;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Staged entries: key = stage key, value = JSON envelope
const STAGED_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("staged_selections");

/// Bump when a staged value's shape changes; older entries are then ignored
pub const STAGE_SCHEMA_VERSION: u32 = 2;

#[derive(Debug, Error)]
pub enum StagingError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StagingResult<T> = Result<T, StagingError>;

#[derive(Serialize)]
struct EnvelopeOut<'a, T> {
    version: u32,
    saved_at: i64,
    value: &'a T,
}

#[derive(Deserialize)]
struct EnvelopeIn<T> {
    version: u32,
    value: T,
}

/// Staged selection store
#[derive(Clone)]
pub struct StagingStore {
    db: Arc<Database>,
}

impl std::fmt::Debug for StagingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StagingStore").finish_non_exhaustive()
    }
}

impl StagingStore {
    /// Open or create database
    pub fn open(path: impl AsRef<Path>) -> StagingResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open in-memory database (tests, or a client without a data dir)
    pub fn open_in_memory() -> StagingResult<Self> {
        let db =
            Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StagingResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(STAGED_TABLE)?;
        }
        write_txn.commit()?;
        Ok(Self { db: Arc::new(db) })
    }

    /// Stage a value, replacing whatever was under `key`
    pub fn save<T: Serialize>(&self, key: StageKey, value: &T) -> StagingResult<()> {
        let bytes = serde_json::to_vec(&EnvelopeOut {
            version: STAGE_SCHEMA_VERSION,
            saved_at: shared::util::now_millis(),
            value,
        })?;
        self.write_raw(key, &bytes)?;
        tracing::debug!(key = key.as_str(), bytes = bytes.len(), "Staged value saved");
        Ok(())
    }

    /// Read a staged value; anything unusable reads as `None`
    pub fn load<T: DeserializeOwned>(&self, key: StageKey) -> Option<T> {
        let bytes = match self.read_raw(key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key = key.as_str(), error = %e, "Failed to read staged value");
                return None;
            }
        };

        match serde_json::from_slice::<EnvelopeIn<T>>(&bytes) {
            Ok(envelope) if envelope.version == STAGE_SCHEMA_VERSION => Some(envelope.value),
            Ok(envelope) => {
                tracing::warn!(
                    key = key.as_str(),
                    version = envelope.version,
                    expected = STAGE_SCHEMA_VERSION,
                    "Ignoring staged value with outdated schema"
                );
                None
            }
            Err(e) => {
                tracing::warn!(key = key.as_str(), error = %e, "Ignoring malformed staged value");
                None
            }
        }
    }

    /// Remove a staged value (no-op when absent)
    pub fn clear(&self, key: StageKey) -> StagingResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(STAGED_TABLE)?;
            table.remove(key.as_str())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Load and clear in one step
    ///
    /// The entry is cleared even when it was unusable, so a bad value does
    /// not come back on every visit. A failed clear is logged; the value is
    /// still returned.
    pub fn take<T: DeserializeOwned>(&self, key: StageKey) -> Option<T> {
        let value = self.load(key);
        if let Err(e) = self.clear(key) {
            tracing::warn!(key = key.as_str(), error = %e, "Failed to clear staged value");
        }
        value
    }

    /// Whether anything is staged under `key` (usable or not)
    pub fn contains(&self, key: StageKey) -> bool {
        matches!(self.read_raw(key), Ok(Some(_)))
    }

    fn read_raw(&self, key: StageKey) -> StagingResult<Option<Vec<u8>>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(STAGED_TABLE)?;
        let value = table.get(key.as_str())?.map(|guard| guard.value().to_vec());
        Ok(value)
    }

    pub(crate) fn write_raw(&self, key: StageKey, bytes: &[u8]) -> StagingResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(STAGED_TABLE)?;
            table.insert(key.as_str(), bytes)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}
