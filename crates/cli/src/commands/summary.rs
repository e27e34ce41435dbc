use std::io::Write;

use serde::Serialize;

use ewaste_ledger::{ItemShare, ItemTotals, Ledger};

use crate::Context;
use crate::render;

/// Chart data: per-item totals (bar) and shares (pie).
#[derive(Debug, Serialize)]
pub struct Summary {
    pub entries: usize,
    pub total_kg: f64,
    pub by_item: ItemTotals,
    pub shares: Vec<ItemShare>,
}

impl Summary {
    pub fn of(ledger: &Ledger) -> Self {
        let by_item = ledger.aggregate_by_item();
        Self {
            entries: ledger.len(),
            total_kg: ledger.total_saved(),
            shares: by_item.shares(),
            by_item,
        }
    }
}

pub fn run(ctx: &Context, json: bool, out: &mut impl Write) -> anyhow::Result<()> {
    let ledger = ctx.load()?;
    let summary = Summary::of(&ledger);

    if json {
        serde_json::to_writer_pretty(&mut *out, &summary)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "{}", render::total_line(&ledger))?;
    if summary.by_item.is_empty() {
        writeln!(out, "{}", render::NO_CHART_DATA)?;
        return Ok(());
    }

    writeln!(out, "\nCO₂ saved by item type\n")?;
    write!(out, "{}", render::bar_chart(&summary.by_item))?;
    writeln!(out, "\nCO₂ contribution by item type\n")?;
    write!(out, "{}", render::contribution(&summary.by_item))?;
    Ok(())
}
