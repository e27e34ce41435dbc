//! Ledger persistence boundary.
//!
//! A store only knows how to read and write a whole `Ledger`. Deciding what
//! changes is the service's job; the store never validates commands.

pub mod csv_file;
pub mod in_memory;
pub mod r#trait;

pub use csv_file::CsvFileLedgerStore;
pub use in_memory::InMemoryLedgerStore;
pub use r#trait::{LedgerStore, LedgerStoreError};
