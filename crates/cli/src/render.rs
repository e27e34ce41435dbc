//! Text rendering for ledger views.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{CellAlignment, ContentArrangement, Table};

use ewaste_ledger::{ItemTotals, Ledger};

pub const NO_ENTRIES: &str = "No data yet. Add an entry to begin tracking.";
pub const NO_CHART_DATA: &str = "No chart data available.";

const BAR_WIDTH: usize = 40;

/// Kilograms with two decimals, e.g. `25.00 kg`.
pub fn kg(value: f64) -> String {
    format!("{value:.2} kg")
}

pub fn total_line(ledger: &Ledger) -> String {
    format!("Total CO₂ saved: {}", kg(ledger.total_saved()))
}

/// Saved entries with their row numbers (the deletion keys).
pub fn entries_table(ledger: &Ledger) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Row", "Item", "Quantity", "CO₂ Saved (kg)"]);

    for (row, entry) in ledger.iter().enumerate() {
        table.add_row(vec![
            row.to_string(),
            entry.item().to_string(),
            entry.quantity().to_string(),
            format!("{:.2}", entry.co2_saved()),
        ]);
    }

    for column in [0, 2, 3] {
        if let Some(col) = table.column_mut(column) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
    table
}

/// Horizontal bar chart of CO₂ saved per item, scaled to the largest item.
pub fn bar_chart(totals: &ItemTotals) -> String {
    let max = totals.iter().map(|t| t.co2_saved).fold(0.0_f64, f64::max);
    let label_width = totals.iter().map(|t| t.item.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    for total in totals.iter() {
        let len = if max > 0.0 {
            ((total.co2_saved / max) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        out.push_str(&format!(
            "{:<label_width$}  {} {}\n",
            total.item,
            "█".repeat(len.max(1)),
            kg(total.co2_saved),
        ));
    }
    out
}

/// Each item's share of the total, one line per item.
pub fn contribution(totals: &ItemTotals) -> String {
    let label_width = totals.iter().map(|t| t.item.chars().count()).max().unwrap_or(0);
    totals
        .shares()
        .iter()
        .map(|share| format!("{:<label_width$}  {:>6.2}%\n", share.item, share.percent))
        .collect()
}
