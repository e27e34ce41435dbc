use std::io::Write;

use crate::Context;

/// List the selectable item categories with their per-unit savings.
pub fn run(ctx: &Context, out: &mut impl Write) -> anyhow::Result<()> {
    for coefficient in ctx.coefficients.iter() {
        writeln!(
            out,
            "{:<16} {:>6.2} kg CO₂ per unit",
            coefficient.item, coefficient.kg_co2_per_unit
        )?;
    }
    Ok(())
}
