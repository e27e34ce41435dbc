use std::path::PathBuf;

use clap::{Parser, Subcommand};

use ewaste_cli::Context;
use ewaste_cli::commands::{add, clear, delete, items, list, summary};
use ewaste_infra::AppConfig;

#[derive(Parser)]
#[command(name = "ewaste")]
#[command(about = "Track the CO₂ you save by recycling e-waste", long_about = None)]
struct Cli {
    /// Ledger CSV file (overrides EWASTE_DATA_FILE).
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    /// JSON coefficient table (overrides EWASTE_COEFFICIENTS).
    #[arg(long, global = true)]
    coefficients: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the item categories and their CO₂ savings per unit
    Items,
    /// Record recycled items
    Add {
        /// Item category, e.g. "Laptop"
        item: String,

        /// Number of units (at least 1)
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Show saved entries and the running total
    List,
    /// Delete one entry by row number (starting from 0)
    Delete {
        row: usize,
    },
    /// Delete every entry
    Clear,
    /// Show per-item totals and contributions
    Summary {
        /// Print chart data as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.json_logs {
        ewaste_observability::init_json();
    } else {
        ewaste_observability::init();
    }

    let config = AppConfig::from_env().with_overrides(cli.data_file, cli.coefficients);
    tracing::debug!(data_file = %config.data_file.display(), "starting");
    let ctx = Context::from_config(&config)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Items => items::run(&ctx, &mut out),
        Commands::Add { item, quantity } => add::run(&ctx, &item, quantity, &mut out),
        Commands::List => list::run(&ctx, &mut out),
        Commands::Delete { row } => delete::run(&ctx, row, &mut out),
        Commands::Clear => clear::run(&ctx, &mut out),
        Commands::Summary { json } => summary::run(&ctx, json, &mut out),
    }
}
