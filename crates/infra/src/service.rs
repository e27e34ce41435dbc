//! Ledger operation pipeline (application-level orchestration).
//!
//! Every mutating operation runs the same steps:
//!
//! ```text
//! caller's Ledger + Command
//!   ↓
//! 1. Handle command (pure decision logic, produces events)
//!   ↓
//! 2. Apply events to a copy of the ledger
//!   ↓
//! 3. Persist the copy (whole-file replace)
//!   ↓
//! 4. Return the copy
//! ```
//!
//! A rejected command never reaches step 3, and a failed save never returns a
//! ledger, so the caller's value is always the last state known to be stored.

use thiserror::Error;

use ewaste_core::{Aggregate, DomainError};
use ewaste_ledger::{
    CoefficientTable, DeleteEntry, Entry, Ledger, LedgerCommand, LedgerEvent, RecordEntry,
};

use crate::store::{LedgerStore, LedgerStoreError};

/// Operation failure, in the three kinds callers need to tell apart.
#[derive(Debug, Error)]
pub enum LedgerServiceError {
    /// Non-positive quantity or unknown item. Nothing was stored.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Row index outside `[0, len)`. Nothing was stored.
    #[error("row index {index} out of range (ledger has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Reading or writing durable storage failed.
    #[error("storage error: {0}")]
    Storage(#[from] LedgerStoreError),
}

impl From<DomainError> for LedgerServiceError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::InvalidInput(msg) => LedgerServiceError::InvalidInput(msg),
            DomainError::IndexOutOfRange { index, len } => {
                LedgerServiceError::IndexOutOfRange { index, len }
            }
        }
    }
}

impl LedgerServiceError {
    /// True for the caller-recoverable kinds (re-prompt and try again).
    pub fn is_validation(&self) -> bool {
        !matches!(self, LedgerServiceError::Storage(_))
    }
}

/// Ledger operations over an injected store.
///
/// Single writer, synchronous: each call finishes its save before returning.
#[derive(Debug)]
pub struct LedgerService<S> {
    store: S,
}

impl<S> LedgerService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S> LedgerService<S>
where
    S: LedgerStore,
{
    /// Load the persisted ledger; empty on first run.
    pub fn load(&self) -> Result<Ledger, LedgerServiceError> {
        let ledger = self.store.load()?;
        tracing::debug!(entries = ledger.len(), "ledger loaded");
        Ok(ledger)
    }

    /// Record `quantity` units of `item`, priced with `coefficients`.
    ///
    /// Returns the new ledger and the created entry.
    pub fn append(
        &self,
        ledger: &Ledger,
        item: &str,
        quantity: i64,
        coefficients: &CoefficientTable,
    ) -> Result<(Ledger, Entry), LedgerServiceError> {
        let command = LedgerCommand::RecordEntry(RecordEntry {
            item: item.to_string(),
            quantity,
            coefficients: coefficients.clone(),
        });
        let (next, events) = self.dispatch(ledger, &command)?;

        let entry = events
            .into_iter()
            .find_map(|event| match event {
                LedgerEvent::EntryRecorded(e) => Some(e.entry),
                _ => None,
            })
            .ok_or_else(|| DomainError::invalid_input("no entry was recorded"))?;

        tracing::info!(
            item = entry.item(),
            quantity = entry.quantity().get(),
            co2_saved = entry.co2_saved(),
            entries = next.len(),
            "entry recorded"
        );
        Ok((next, entry))
    }

    /// Remove the row at `index`; later rows move up by one.
    pub fn delete_at(&self, ledger: &Ledger, index: usize) -> Result<Ledger, LedgerServiceError> {
        let (next, _) = self.dispatch(ledger, &LedgerCommand::DeleteEntry(DeleteEntry { index }))?;
        tracing::info!(index, entries = next.len(), "entry deleted");
        Ok(next)
    }

    /// Drop every entry. Succeeds on an already-empty ledger.
    pub fn clear(&self, ledger: &Ledger) -> Result<Ledger, LedgerServiceError> {
        let (next, _) = self.dispatch(ledger, &LedgerCommand::Clear)?;
        tracing::info!(removed = ledger.len(), "ledger cleared");
        Ok(next)
    }

    fn dispatch(
        &self,
        ledger: &Ledger,
        command: &LedgerCommand,
    ) -> Result<(Ledger, Vec<LedgerEvent>), LedgerServiceError> {
        let (next, events) = ledger.decide_and_apply(command).map_err(|err| {
            tracing::warn!(error = %err, "ledger command rejected");
            LedgerServiceError::from(err)
        })?;

        self.store.save(&next).map_err(|err| {
            tracing::error!(error = %err, "failed to persist ledger");
            LedgerServiceError::from(err)
        })?;

        for event in &events {
            tracing::debug!(event_type = event.event_type(), "applied ledger event");
        }
        Ok((next, events))
    }
}
