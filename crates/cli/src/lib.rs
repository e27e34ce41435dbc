//! `ewaste` command-line front end.
//!
//! A thin presentation layer: every command loads the ledger, calls one
//! service operation, and renders the result.

pub mod commands;
pub mod render;

use anyhow::Context as _;

use ewaste_infra::{AppConfig, CsvFileLedgerStore, LedgerService};
use ewaste_ledger::{CoefficientTable, Ledger};

/// Everything a command needs: the ledger service and the coefficient table.
#[derive(Debug)]
pub struct Context {
    pub service: LedgerService<CsvFileLedgerStore>,
    pub coefficients: CoefficientTable,
}

impl Context {
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let coefficients = config
            .coefficient_table()
            .context("failed to load coefficient table")?;
        Ok(Self {
            service: LedgerService::new(config.store()),
            coefficients,
        })
    }

    pub fn load(&self) -> anyhow::Result<Ledger> {
        self.service.load().with_context(|| {
            format!(
                "failed to load ledger from {}",
                self.service.store().path().display()
            )
        })
    }
}
