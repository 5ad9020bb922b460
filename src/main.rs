//! vaglog - Decode a VCDS measuring-block CSV log
//!
//! Prints a summary of the decoded log, or the full record as JSON.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use vaglog::parsers::{LogRecord, Vcds};
use vaglog::settings::UserSettings;

/// Decode a VCDS measuring-block CSV log
#[derive(Debug, Parser)]
#[command(name = "vaglog", version, about)]
struct Args {
    /// Path to the `.csv` log file
    #[arg(value_name = "FILE")]
    path: PathBuf,

    /// Print the decoded record as JSON
    #[arg(long)]
    json: bool,

    /// Print all groups merged into one flat table (implies --json)
    #[arg(long)]
    merged: bool,

    /// Add a 1-based row index column to the merged table
    #[arg(long)]
    index: bool,

    /// Settings file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let settings = match &args.settings {
        Some(path) => UserSettings::load_from(path),
        None => UserSettings::load(),
    };

    let log = Vcds
        .parse_file(&args.path)
        .with_context(|| format!("Failed to parse {}", args.path.display()))?;

    if args.merged {
        let table = log.merged(args.index || settings.include_index);
        print_json(&table, settings.pretty_json)?;
    } else if args.json {
        print_json(&log, settings.pretty_json)?;
    } else {
        print_summary(&log);
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", text);
    Ok(())
}

fn print_summary(log: &LogRecord) {
    println!("Timestamp:    {}", log.timestamp());
    println!("Tool version: {} ({})", log.tool_version(), log.tool_data_version());
    println!("Controller:   {}", log.controller_name());
    println!("Engine:       {}", log.engine_type());
    println!("Data rows:    {}", log.data_row_count());

    for group in log.data() {
        println!();
        println!("Group {}", group.id());
        for channel in group.channels() {
            println!("  {:<40} {:>6} values", channel.label(), channel.len());
        }
    }
}
