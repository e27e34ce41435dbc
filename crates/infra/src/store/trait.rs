use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use ewaste_ledger::Ledger;

/// Ledger storage error.
///
/// These are **infrastructure errors** (IO, malformed files) as opposed to
/// domain errors (validation, row indices).
#[derive(Debug, Error)]
pub enum LedgerStoreError {
    #[error("failed to {op} ledger file {}: {source}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed ledger file {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("corrupt ledger file {} at line {line}: {reason}", .path.display())]
    /// `line` is the 1-based line in the file; the header is line 1.
    Corrupt {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    #[error("ledger storage unavailable: {0}")]
    Unavailable(String),
}

impl LedgerStoreError {
    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }
}

/// Whole-ledger durable storage.
///
/// ## Load Semantics
///
/// `load()` returns the stored rows in stored order. Absent storage is the
/// first-run state and yields an empty ledger, never an error.
///
/// ## Save Semantics
///
/// `save()` replaces the stored ledger with `ledger` and returns only after the
/// write is durable. A failed save leaves either the old or the new contents.
pub trait LedgerStore {
    fn load(&self) -> Result<Ledger, LedgerStoreError>;

    fn save(&self, ledger: &Ledger) -> Result<(), LedgerStoreError>;
}

impl<S> LedgerStore for Arc<S>
where
    S: LedgerStore + ?Sized,
{
    fn load(&self) -> Result<Ledger, LedgerStoreError> {
        (**self).load()
    }

    fn save(&self, ledger: &Ledger) -> Result<(), LedgerStoreError> {
        (**self).save(ledger)
    }
}
