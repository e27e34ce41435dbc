use std::io::Write;

use crate::Context;
use crate::render;

/// Show the running total and the saved entries.
pub fn run(ctx: &Context, out: &mut impl Write) -> anyhow::Result<()> {
    let ledger = ctx.load()?;

    writeln!(out, "{}", render::total_line(&ledger))?;
    if ledger.is_empty() {
        writeln!(out, "{}", render::NO_ENTRIES)?;
        return Ok(());
    }
    writeln!(out, "{}", render::entries_table(&ledger))?;
    Ok(())
}
