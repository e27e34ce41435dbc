//! Infrastructure layer: ledger storage, the operation pipeline, config.

pub mod config;
pub mod service;
pub mod store;


pub use config::{AppConfig, ConfigError};
pub use service::{LedgerService, LedgerServiceError};
pub use store::{CsvFileLedgerStore, InMemoryLedgerStore, LedgerStore, LedgerStoreError};
