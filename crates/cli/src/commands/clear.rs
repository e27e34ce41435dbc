use std::io::Write;

use anyhow::Context as _;

use crate::Context;

/// Remove every entry.
pub fn run(ctx: &Context, out: &mut impl Write) -> anyhow::Result<()> {
    let ledger = ctx.load()?;
    let removed = ledger.len();
    ctx.service
        .clear(&ledger)
        .context("failed to clear ledger")?;

    writeln!(out, "All data cleared ({removed} entries removed).")?;
    Ok(())
}
