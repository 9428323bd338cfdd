//! Command-line parsing for the retail sales dashboard pipeline.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the reconciliation/aggregation code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::domain::GridRange;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "pulse", version, about = "Retail sales reconciliation and dashboard summary")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Reconcile the source tables and print the dashboard summary.
    Report(ReportArgs),
    /// Generate a synthetic snapshot and write it to a JSON file.
    Sample(SampleArgs),
}

/// Options for a report run.
#[derive(Debug, Parser, Clone)]
pub struct ReportArgs {
    /// Snapshot JSON to run on. Omitted: run on a generated sample.
    #[arg(long, value_name = "JSON")]
    pub data: Option<PathBuf>,

    /// Inclusive start of the date window (YYYY-MM-DD).
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Inclusive end of the date window (YYYY-MM-DD).
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Restrict to a category (repeatable). No occurrences: all categories.
    #[arg(long = "category", value_name = "NAME")]
    pub categories: Vec<String>,

    /// How many locations the by-location ranking keeps.
    #[arg(long, default_value_t = 5)]
    pub top: usize,

    /// Where the trend grid's date range comes from.
    #[arg(long, value_enum, default_value_t = GridRange::FilterBounds)]
    pub range: GridRange,

    /// Seed for the generated sample (ignored with --data).
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

/// Options for snapshot generation.
#[derive(Debug, Parser)]
pub struct SampleArgs {
    /// Output snapshot path.
    #[arg(long, value_name = "JSON")]
    pub out: PathBuf,

    /// Random seed; identical seeds yield identical snapshots.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Customers in the generated catalog.
    #[arg(long, default_value_t = 12)]
    pub customers: usize,

    /// Products in the generated catalog.
    #[arg(long, default_value_t = 10)]
    pub products: usize,

    /// Length of the sales window in days.
    #[arg(long, default_value_t = 8)]
    pub days: u32,

    /// First day of the sales window.
    #[arg(long, default_value = "2024-01-01")]
    pub start: NaiveDate,

    /// Average sales rows generated per day.
    #[arg(long, default_value_t = 6)]
    pub per_day: usize,

    /// Rows with dangling references, to exercise validation.
    #[arg(long, default_value_t = 2)]
    pub bad_rows: usize,
}
