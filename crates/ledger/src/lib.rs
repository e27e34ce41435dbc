//! Recycling ledger domain module.
//!
//! Pure domain logic only: entries, the coefficient table, and the `Ledger`
//! aggregate with its derived totals. No IO, no persistence concerns.

pub mod coefficient;
pub mod entry;
pub mod ledger;

pub use coefficient::{Coefficient, CoefficientTable};
pub use entry::{Entry, Quantity};
pub use ledger::{
    DeleteEntry, EntryDeleted, EntryRecorded, ItemShare, ItemTotal, ItemTotals, Ledger,
    LedgerCleared, LedgerCommand, LedgerEvent, RecordEntry,
};
