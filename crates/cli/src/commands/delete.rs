use std::io::Write;

use anyhow::Context as _;

use crate::Context;

/// Delete one row by its current row number.
pub fn run(ctx: &Context, row: usize, out: &mut impl Write) -> anyhow::Result<()> {
    let ledger = ctx.load()?;
    if ledger.is_empty() {
        anyhow::bail!("No data available to manage.");
    }

    let removed = ledger.get(row).map(|e| e.item().to_string());
    let ledger = ctx
        .service
        .delete_at(&ledger, row)
        .with_context(|| format!("failed to delete row {row}"))?;

    if let Some(item) = removed {
        writeln!(out, "Deleted row {row} ({item}). {} entries remain.", ledger.len())?;
    }
    Ok(())
}
