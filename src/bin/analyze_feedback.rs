//! CLI entry point: extract a feedback CSV and print the analysis report
//! as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use feedback_insights::analysis::report::{comprehensive_report, initial_summary};
use feedback_insights::ingestion::extract_feedback_path;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "analyze_feedback", about = "Analyze an event feedback CSV export")]
struct Args {
    /// Path to the feedback CSV export
    csv_file: PathBuf,

    /// Print only the lightweight summary instead of the full report
    #[arg(long)]
    summary_only: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let extraction = extract_feedback_path(&args.csv_file)
        .with_context(|| format!("failed to process {}", args.csv_file.display()))?;

    let output = if args.summary_only {
        serde_json::to_value(initial_summary(&extraction.records))?
    } else {
        serde_json::to_value(comprehensive_report(&extraction))?
    };

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{rendered}");

    Ok(())
}
