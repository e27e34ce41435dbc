use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use ewaste_ledger::{Entry, Ledger};

use super::r#trait::{LedgerStore, LedgerStoreError};

/// In-memory ledger store.
///
/// Intended for tests/dev. `None` means nothing was ever saved, which loads as
/// an empty ledger just like a missing file.
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    rows: RwLock<Option<Vec<Entry>>>,
    saves: AtomicUsize,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `entries`, as if saved by an earlier session.
    pub fn with_entries(entries: Vec<Entry>) -> Self {
        Self {
            rows: RwLock::new(Some(entries)),
            saves: AtomicUsize::new(0),
        }
    }

    /// Number of successful `save` calls.
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// True once anything has been saved or seeded.
    pub fn is_initialized(&self) -> bool {
        self.rows.read().map(|rows| rows.is_some()).unwrap_or(false)
    }
}

impl LedgerStore for InMemoryLedgerStore {
    fn load(&self) -> Result<Ledger, LedgerStoreError> {
        let rows = self
            .rows
            .read()
            .map_err(|_| LedgerStoreError::Unavailable("lock poisoned".to_string()))?;

        Ok(Ledger::from_entries(rows.clone().unwrap_or_default()))
    }

    fn save(&self, ledger: &Ledger) -> Result<(), LedgerStoreError> {
        let mut rows = self
            .rows
            .write()
            .map_err(|_| LedgerStoreError::Unavailable("lock poisoned".to_string()))?;

        *rows = Some(ledger.entries().to_vec());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
