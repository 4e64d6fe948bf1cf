//! Catalog store and transaction scope
//!
//! The catalog holds the tables behind a single mutex. Every handler
//! acquires one [`Transaction`] for its whole request: commit makes the
//! delta durable, dropping the transaction without committing rolls the
//! tables back to the last checkpoint on every exit path, including
//! panics.
//!
//! [`Transaction::checkpoint`] moves the rollback floor forward mid
//! request. The lookup helpers use it to make implicitly created rows
//! durable before the parent entity's own insert commits.

use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use super::errors::CatalogResult;
use super::snapshot;
use super::tables::Tables;

/// The catalog store.
///
/// With a snapshot path configured, every commit and checkpoint rewrites
/// the snapshot file; without one the catalog is purely in-memory.
pub struct Catalog {
    tables: Mutex<Tables>,
    snapshot_path: Option<PathBuf>,
}

impl Catalog {
    /// Creates an empty in-memory catalog.
    pub fn in_memory() -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
            snapshot_path: None,
        }
    }

    /// Opens a snapshot-backed catalog, loading existing state if the
    /// snapshot file is present.
    pub fn open(path: impl Into<PathBuf>) -> CatalogResult<Self> {
        let path = path.into();
        let tables = if path.exists() {
            snapshot::load(&path)?
        } else {
            Tables::default()
        };
        Ok(Self {
            tables: Mutex::new(tables),
            snapshot_path: Some(path),
        })
    }

    /// Begins a transaction, serializing against all other requests.
    pub fn begin(&self) -> Transaction<'_> {
        // A poisoned mutex only means some request panicked mid
        // transaction; its Drop already rolled the tables back.
        let guard = self
            .tables
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let undo = guard.clone();
        Transaction {
            tables: guard,
            undo,
            snapshot_path: self.snapshot_path.as_deref(),
            committed: false,
        }
    }
}

/// A transaction over the catalog tables.
///
/// Derefs to [`Tables`] for row and link operations. Dropping without
/// commit restores the tables to the last checkpoint.
pub struct Transaction<'a> {
    tables: MutexGuard<'a, Tables>,
    undo: Tables,
    snapshot_path: Option<&'a Path>,
    committed: bool,
}

impl Transaction<'_> {
    /// Makes the transaction's current state durable and releases the
    /// scope. A failed snapshot write leaves the commit unapplied: the
    /// drop rolls the in-memory tables back to the last checkpoint.
    pub fn commit(mut self) -> CatalogResult<()> {
        self.persist()?;
        self.committed = true;
        Ok(())
    }

    /// Moves the rollback floor to the current state without releasing
    /// the scope. Rows created before a checkpoint survive a later
    /// rollback of the same transaction.
    pub fn checkpoint(&mut self) -> CatalogResult<()> {
        self.persist()?;
        self.undo = self.tables.clone();
        Ok(())
    }

    fn persist(&self) -> CatalogResult<()> {
        if let Some(path) = self.snapshot_path {
            snapshot::save(path, &self.tables)?;
        }
        Ok(())
    }
}

impl Deref for Transaction<'_> {
    type Target = Tables;

    fn deref(&self) -> &Tables {
        &self.tables
    }
}

impl DerefMut for Transaction<'_> {
    fn deref_mut(&mut self) -> &mut Tables {
        &mut self.tables
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if !self.committed {
            std::mem::swap(&mut *self.tables, &mut self.undo);
        }
    }
}
