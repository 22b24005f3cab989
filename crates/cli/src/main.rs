mod config;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use sigwatch_core::{SentimentSnapshot, Watchlist};
use sigwatch_data::sample::{sample_store, sample_watchlist};
use sigwatch_data::MemoryBarStore;
use sigwatch_signals::{aggregate, compute_reading, evaluate, PortfolioRecommendation};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use config::WatchConfig;

#[derive(Parser)]
#[command(name = "sigwatch")]
#[command(about = "Watchlist sentiment engine — indicator signals and portfolio recommendations")]
#[command(version)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the watchlist once and print the snapshot
    Evaluate {
        #[command(flatten)]
        source: SourceArgs,

        /// Emit the snapshot and recommendation as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the latest indicator readings for one symbol
    Indicators {
        #[command(flatten)]
        source: SourceArgs,

        /// Symbol to inspect
        #[arg(short, long)]
        symbol: String,
    },

    /// Re-evaluate on a fixed cadence (the timer lives here, not in the core)
    Watch {
        #[command(flatten)]
        source: SourceArgs,

        /// Seconds between evaluations
        #[arg(short, long, default_value = "60")]
        interval: u64,

        /// Emit each snapshot as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// Path to a sigwatch.toml config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory containing {SYMBOL}.csv files
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Symbols to watch (comma-separated, first is the anchor).
    /// Overrides the config file
    #[arg(short = 'S', long = "symbols", value_delimiter = ',')]
    symbols: Vec<String>,

    /// Use the embedded sample dataset instead of CSV files
    #[arg(long)]
    sample: bool,
}

#[derive(Serialize)]
struct EvaluationOutput {
    snapshot: SentimentSnapshot,
    recommendation: PortfolioRecommendation,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Evaluate { source, json } => {
            let (watchlist, store) = load_source(&source)?;
            run_evaluation(&watchlist, &store, json)?;
        }
        Commands::Indicators { source, symbol } => {
            let (_, store) = load_source(&source)?;
            print_indicators(&store, &symbol)?;
        }
        Commands::Watch {
            source,
            interval,
            json,
        } => {
            let (watchlist, store) = load_source(&source)?;
            info!(interval, "starting evaluation loop");
            loop {
                run_evaluation(&watchlist, &store, json)?;
                std::thread::sleep(Duration::from_secs(interval));
            }
        }
    }

    Ok(())
}

/// Resolve the watchlist and bar store from flags and/or config file.
fn load_source(source: &SourceArgs) -> Result<(Watchlist, MemoryBarStore)> {
    if source.sample {
        let watchlist = if source.symbols.is_empty() {
            sample_watchlist()
        } else {
            Watchlist::from_symbols(source.symbols.iter().cloned())
        };
        return Ok((watchlist, sample_store()));
    }

    let config = match &source.config {
        Some(path) => WatchConfig::load(path)?,
        None => WatchConfig::default(),
    };

    let symbols = if source.symbols.is_empty() {
        config.symbols.clone()
    } else {
        source.symbols.clone()
    };
    if symbols.is_empty() {
        bail!("no symbols to watch; pass --symbol, a config file, or --sample");
    }

    let data_dir = source
        .data_dir
        .clone()
        .or(config.data_dir)
        .context("no data directory; pass --data-dir, set data_dir in the config, or --sample")?;

    let store = MemoryBarStore::load_csv_dir(&data_dir, &symbols)?;
    Ok((Watchlist::from_symbols(symbols), store))
}

fn run_evaluation(watchlist: &Watchlist, store: &MemoryBarStore, json: bool) -> Result<()> {
    let snapshot = evaluate(watchlist, store)?;
    let recommendation = aggregate(&snapshot);

    if json {
        let output = EvaluationOutput {
            snapshot,
            recommendation,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Signals");
    println!("-------");
    for entry in &snapshot.signals {
        println!("  {:<8} {}", entry.symbol, entry.signal);
    }
    println!();
    match snapshot.anchor_signal {
        Some(signal) => println!(
            "buys: {}  sells: {}  anchor: {}",
            snapshot.buy_count, snapshot.sell_count, signal
        ),
        None => println!(
            "buys: {}  sells: {}  anchor: none",
            snapshot.buy_count, snapshot.sell_count
        ),
    }
    match (recommendation.show_buy, recommendation.show_sell) {
        (true, true) => println!("recommendation: BUY and SELL conditions both met"),
        (true, false) => println!("recommendation: BUY"),
        (false, true) => println!("recommendation: SELL"),
        (false, false) => println!("recommendation: none"),
    }

    Ok(())
}

fn print_indicators(store: &MemoryBarStore, symbol: &str) -> Result<()> {
    use sigwatch_core::BarStore;

    let series = store
        .bars(symbol)
        .with_context(|| format!("no bars loaded for symbol {}", symbol))?;
    if series.is_empty() {
        bail!("symbol {} has an empty series", symbol);
    }

    let reading = compute_reading(series)?;
    println!("{} ({} bars)", symbol, series.len());
    println!("  close   {}", reading.price);
    println!("  ema(9)  {}", reading.ema_fast);
    println!("  ema(21) {}", reading.ema_slow);
    match reading.rsi {
        Some(rsi) => println!("  rsi(14) {}", rsi),
        None => println!("  rsi(14) n/a (needs more history)"),
    }
    println!("  vwap    {}", reading.vwap);

    Ok(())
}
