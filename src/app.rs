//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - initializes logging
//! - parses CLI arguments
//! - obtains the source tables (snapshot file or generated sample)
//! - runs the reconciliation pipeline
//! - prints the dashboard summary

use std::collections::BTreeSet;

use chrono::Utc;
use clap::Parser;

use crate::cli::{Cli, Command, ReportArgs, SampleArgs};
use crate::data::sample::{SampleShape, generate_sample};
use crate::data::snapshot;
use crate::domain::{FilterSpec, PipelineOptions, SourceTables};
use crate::error::PulseError;

/// Entry point for the `pulse` binary.
pub fn run() -> Result<(), PulseError> {
    init_tracing();

    // We want bare `pulse` and `pulse --from ...` to behave like
    // `pulse report ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while keeping the default invocation short.
    let argv = rewrite_args(std::env::args().collect());
    let cli = Cli::parse_from(argv);

    match cli.command {
        Command::Report(args) => handle_report(args),
        Command::Sample(args) => handle_sample(args),
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn handle_report(args: ReportArgs) -> Result<(), PulseError> {
    let tables = load_tables(&args)?;
    let options = options_from_args(&args);

    let data = crate::pipeline::run(&tables, &options, Utc::now())?;

    println!("{}", crate::report::format_dashboard(&data, &options));
    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), PulseError> {
    let shape = SampleShape {
        seed: args.seed,
        customers: args.customers,
        products: args.products,
        days: args.days,
        start_date: args.start,
        sales_per_day: args.per_day,
        bad_reference_rows: args.bad_rows,
    };
    let tables = generate_sample(&shape)?;
    snapshot::write_snapshot(&args.out, &tables)?;

    println!(
        "Wrote snapshot '{}' ({} customers, {} products, {} sales rows)",
        args.out.display(),
        tables.customers.len(),
        tables.products.len(),
        tables.sales.len()
    );
    Ok(())
}

fn load_tables(args: &ReportArgs) -> Result<SourceTables, PulseError> {
    match &args.data {
        Some(path) => snapshot::read_snapshot(path),
        None => generate_sample(&SampleShape {
            seed: args.seed,
            ..SampleShape::default()
        }),
    }
}

pub fn options_from_args(args: &ReportArgs) -> PipelineOptions {
    let categories: BTreeSet<String> = args.categories.iter().cloned().collect();
    PipelineOptions {
        filter: FilterSpec {
            start_date: args.from,
            end_date: args.to,
            categories: if categories.is_empty() {
                None
            } else {
                Some(categories)
            },
        },
        grid_range: args.range,
        top_locations: args.top,
    }
}

/// Rewrite argv so `pulse` defaults to `pulse report`.
///
/// Rules:
/// - `pulse`                     -> `pulse report`
/// - `pulse --from ... `         -> `pulse report --from ...`
/// - `pulse --help/--version`    -> unchanged (top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("report".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "report" | "sample");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "report flags".
    if arg1.starts_with('-') {
        argv.insert(1, "report".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
