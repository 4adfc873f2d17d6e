//! MarketMap CLI — fetch and render commands for the ETF heatmap treemap.
//!
//! Commands:
//! - `render` — fetch heatmap data and write/show the treemap PNG
//! - `fetch` — fetch heatmap data and print a table summary, optionally
//!   exporting CSV/JSON artifacts
//! - `ranges` — list the valid date-range selectors

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use marketmap_core::data::{HeatmapProvider, SyntheticProvider, UnusualWhalesProvider};
use marketmap_core::domain::{DateRange, HeatmapTable};
use marketmap_core::export::{write_table_csv, write_table_json};
use marketmap_render::{render_treemap, RenderConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "marketmap",
    about = "MarketMap CLI — ETF heatmap treemap renderer"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch heatmap data and render the treemap PNG.
    Render {
        /// Trading-session window: one_day, after_hours, yesterday,
        /// one_week, one_month, ytd, one_year.
        #[arg(long, default_value_t = DateRange::OneDay)]
        date_range: DateRange,

        /// ETF symbol whose heatmap to fetch.
        #[arg(long, default_value = "SPY")]
        symbol: String,

        /// Output PNG path. Defaults to the config's path (img/spy_heatmap.png).
        #[arg(long)]
        out: Option<PathBuf>,

        /// Skip writing the PNG.
        #[arg(long, default_value_t = false)]
        no_save: bool,

        /// Open the rendered image in the platform viewer.
        #[arg(long, default_value_t = false)]
        show: bool,

        /// Path to a TOML render config (flags override its values).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Use the seeded offline data source instead of the network.
        #[arg(long, default_value_t = false)]
        synthetic: bool,

        /// Seed for the offline data source.
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Fetch heatmap data and print a summary.
    Fetch {
        /// Trading-session window: one_day, after_hours, yesterday,
        /// one_week, one_month, ytd, one_year.
        #[arg(long, default_value_t = DateRange::OneDay)]
        date_range: DateRange,

        /// ETF symbol whose heatmap to fetch.
        #[arg(long, default_value = "SPY")]
        symbol: String,

        /// Use the seeded offline data source instead of the network.
        #[arg(long, default_value_t = false)]
        synthetic: bool,

        /// Seed for the offline data source.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Export the fetched table as CSV.
        #[arg(long)]
        export_csv: Option<PathBuf>,

        /// Export the fetched table as JSON.
        #[arg(long)]
        export_json: Option<PathBuf>,
    },
    /// List the valid date-range selectors.
    Ranges,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render {
            date_range,
            symbol,
            out,
            no_save,
            show,
            config,
            synthetic,
            seed,
        } => run_render(date_range, symbol, out, no_save, show, config, synthetic, seed),
        Commands::Fetch {
            date_range,
            symbol,
            synthetic,
            seed,
            export_csv,
            export_json,
        } => run_fetch(date_range, symbol, synthetic, seed, export_csv, export_json),
        Commands::Ranges => run_ranges(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn fetch_table(
    date_range: DateRange,
    symbol: &str,
    synthetic: bool,
    seed: u64,
) -> Result<HeatmapTable> {
    let provider: Box<dyn HeatmapProvider> = if synthetic {
        Box::new(SyntheticProvider::for_symbol(symbol, seed))
    } else {
        Box::new(UnusualWhalesProvider::for_symbol(symbol))
    };

    let table = provider
        .fetch(date_range)
        .with_context(|| format!("fetching {symbol} heatmap for {date_range}"))?;
    Ok(table)
}

#[allow(clippy::too_many_arguments)]
fn run_render(
    date_range: DateRange,
    symbol: String,
    out: Option<PathBuf>,
    no_save: bool,
    show: bool,
    config_path: Option<PathBuf>,
    synthetic: bool,
    seed: u64,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => RenderConfig::from_file(&path)
            .with_context(|| format!("loading render config {}", path.display()))?,
        None => RenderConfig::default(),
    };
    if let Some(path) = out {
        config.output_path = path;
    }
    if no_save {
        config.save_image = false;
    }
    if show {
        config.show = true;
    }

    let table = fetch_table(date_range, &symbol, synthetic, seed)?;
    print_summary(&table);

    let outcome = render_treemap(&table, &config)?;
    match outcome.saved_to {
        Some(path) => println!("Treemap saved to: {}", path.display()),
        None if config.show => println!("Treemap opened in viewer (not saved)"),
        None => println!("Nothing to do: saving and showing are both disabled"),
    }

    Ok(())
}

fn run_fetch(
    date_range: DateRange,
    symbol: String,
    synthetic: bool,
    seed: u64,
    export_csv: Option<PathBuf>,
    export_json: Option<PathBuf>,
) -> Result<()> {
    let table = fetch_table(date_range, &symbol, synthetic, seed)?;
    print_summary(&table);

    if let Some(path) = export_csv {
        write_table_csv(&path, &table)?;
        println!("CSV exported to: {}", path.display());
    }
    if let Some(path) = export_json {
        write_table_json(&path, &table)?;
        println!("JSON exported to: {}", path.display());
    }

    Ok(())
}

fn run_ranges() -> Result<()> {
    for range in DateRange::ALL {
        println!("{range}");
    }
    Ok(())
}

fn print_summary(table: &HeatmapTable) {
    println!();
    println!("=== Heatmap ===");
    println!("Symbol:         {}", table.symbol);
    println!("Date range:     {}", table.date_range);
    println!("Source:         {}", table.source.as_str());
    println!("Fetched at:     {}", table.fetched_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("Tickers:        {}", table.len());
    println!(
        "Total mkt cap:  {}",
        format_marketcap(table.total_marketcap())
    );

    let sorted = table.sorted_by_change();
    if !sorted.is_empty() {
        println!();
        println!("--- Top movers ---");
        for row in sorted.iter().take(3) {
            println!(
                "{:<8} {:>7.2}%  ({})",
                row.ticker, row.percentage_change, row.sector
            );
        }
        for row in sorted.iter().rev().take(3).rev() {
            println!(
                "{:<8} {:>7.2}%  ({})",
                row.ticker, row.percentage_change, row.sector
            );
        }
    }
    println!();
}

fn format_marketcap(value: f64) -> String {
    if value >= 1.0e12 {
        format!("${:.2}T", value / 1.0e12)
    } else if value >= 1.0e9 {
        format!("${:.2}B", value / 1.0e9)
    } else if value >= 1.0e6 {
        format!("${:.2}M", value / 1.0e6)
    } else {
        format!("${value:.0}")
    }
}
