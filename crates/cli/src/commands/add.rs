use std::io::Write;

use crate::Context;
use crate::render;

/// Record a recycling event and print the confirmation and new total.
pub fn run(ctx: &Context, item: &str, quantity: i64, out: &mut impl Write) -> anyhow::Result<()> {
    let ledger = ctx.load()?;
    let (ledger, entry) = ctx
        .service
        .append(&ledger, item, quantity, &ctx.coefficients)
        .map_err(|err| {
            if err.is_validation() {
                let known: Vec<&str> = ctx.coefficients.items().collect();
                anyhow::anyhow!("{err} (known items: {})", known.join(", "))
            } else {
                anyhow::Error::new(err).context("failed to save entry")
            }
        })?;

    writeln!(out, "{}", entry.confirmation())?;
    writeln!(out, "{}", render::total_line(&ledger))?;
    Ok(())
}
