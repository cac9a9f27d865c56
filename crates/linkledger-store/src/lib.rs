//! Linkledger Storage Layer
//!
//! Durable holder of the ledger state: the pending queue and the contributor
//! counters, persisted as two independently-named, human-readable JSON files
//! that are always loaded and saved as a pair.
//!
//! # Architecture
//!
//! - One [`LedgerStore`] instance per process; its internal mutex is the
//!   single serialization point for every transaction
//! - A transaction reloads both files, runs the caller's mutation, and on
//!   success rewrites both files atomically (write to a temporary path,
//!   then rename in place)
//! - A failed mutation persists nothing
//!
//! # Recovery
//!
//! Startup and every transaction tolerate a missing or malformed backing
//! file by falling back to the empty structure. The two cases are logged
//! distinctly: absence is routine (first run), a malformed file means the
//! previous contents are about to be lost and is logged at error severity.
//!
//! # Examples
//!
//! ```no_run
//! use linkledger_store::LedgerStore;
//!
//! # async fn example() -> Result<(), linkledger_store::StoreError> {
//! let store = LedgerStore::new("pending_urls.json", "url_counts.json");
//! let pending = store
//!     .transact(|ledger| Ok::<_, linkledger_store::StoreError>(ledger.pending_len()))
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

use indexmap::IndexMap;
use linkledger_domain::{Ledger, LinkEntry};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, error};

/// Errors that can occur during storage operations.
///
/// A malformed backing file is deliberately NOT an error (see crate docs);
/// only real I/O and encoding failures surface here.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading a backing file failed for a reason other than absence
    #[error("failed to read {path}: {source}")]
    Read {
        /// The file that could not be read
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// Writing or renaming a backing file failed
    #[error("failed to write {path}: {source}")]
    Write {
        /// The file that could not be written
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// Serializing ledger state to JSON failed
    #[error("failed to encode ledger state: {0}")]
    Encode(#[from] serde_json::Error),
}

/// File-backed store for the paired (queue, counters) ledger state.
///
/// # Concurrency
///
/// All access goes through [`transact`](LedgerStore::transact) or
/// [`snapshot`](LedgerStore::snapshot), both of which hold the store's
/// mutex for their full duration. Two transactions can therefore never
/// interleave their load/modify/persist phases; the lost-update race is
/// ruled out by construction rather than by caller discipline.
pub struct LedgerStore {
    queue_path: PathBuf,
    counters_path: PathBuf,
    lock: Mutex<()>,
}

impl LedgerStore {
    /// Create a store over the two backing file paths.
    ///
    /// Neither file needs to exist yet; the first committed transaction
    /// creates them.
    pub fn new(queue_path: impl Into<PathBuf>, counters_path: impl Into<PathBuf>) -> Self {
        Self {
            queue_path: queue_path.into(),
            counters_path: counters_path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Run one serialized read-modify-write transaction.
    ///
    /// Loads the current ledger, hands it mutably to `f`, and persists both
    /// backing files atomically when `f` returns `Ok`. When `f` returns
    /// `Err`, nothing is persisted and the error is passed through.
    ///
    /// # Errors
    ///
    /// Propagates `f`'s error, or a [`StoreError`] (converted via `From`)
    /// when loading or persisting fails.
    pub async fn transact<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Ledger) -> Result<T, E>,
        E: From<StoreError>,
    {
        let _guard = self.lock.lock().await;
        let mut ledger = self.load().await.map_err(E::from)?;
        let result = f(&mut ledger)?;
        self.persist(&ledger).await.map_err(E::from)?;
        Ok(result)
    }

    /// Read a consistent snapshot of the ledger without persisting.
    ///
    /// Takes the same lock as [`transact`](LedgerStore::transact), so the
    /// snapshot can never observe a half-committed pair.
    pub async fn snapshot(&self) -> Result<Ledger, StoreError> {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    async fn load(&self) -> Result<Ledger, StoreError> {
        let queue: Vec<LinkEntry> = load_json(&self.queue_path).await?;
        let counters: IndexMap<String, u64> = load_json(&self.counters_path).await?;
        Ok(Ledger::from_parts(queue, counters))
    }

    async fn persist(&self, ledger: &Ledger) -> Result<(), StoreError> {
        persist_json(&self.queue_path, ledger.entries()).await?;
        persist_json(&self.counters_path, ledger.counters()).await?;
        Ok(())
    }
}

/// Load one backing file, treating absence and malformed content as the
/// empty structure. The two cases log differently so silent corruption
/// stays observable.
async fn load_json<T>(path: &Path) -> Result<T, StoreError>
where
    T: serde::de::DeserializeOwned + Default,
{
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "backing file absent, starting empty");
            return Ok(T::default());
        }
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(value) => Ok(value),
        Err(err) => {
            error!(
                path = %path.display(),
                %err,
                "backing file malformed, resetting to empty; its contents will be lost on the next commit"
            );
            Ok(T::default())
        }
    }
}

/// Rewrite one backing file in full: serialize, write to `<path>.tmp`,
/// rename over `<path>`.
async fn persist_json<T>(path: &Path, value: &T) -> Result<(), StoreError>
where
    T: serde::Serialize + ?Sized,
{
    let bytes = serde_json::to_vec_pretty(value)?;
    let tmp = path.with_extension("tmp");

    fs::write(&tmp, &bytes).await.map_err(|source| StoreError::Write {
        path: tmp.clone(),
        source,
    })?;
    fs::rename(&tmp, path).await.map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}
