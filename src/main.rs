//! Mortgage Schedule CLI
//!
//! Command-line interface for single-track schedules and multi-track mortgages

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use mortgage_schedule::output::{self, HeaderStyle};
use mortgage_schedule::track::{load_tracks_auto, period_count_from, DEFAULT_ANNUAL_INDEX_RATE};
use mortgage_schedule::{generate_schedule, LedgerRow, MortgageRunner, RepaymentMethod, TrackParams};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Amortization schedules for indexed mortgage tracks
#[derive(Parser)]
#[command(name = "mortgage-schedule", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, value_enum, default_value = "table", global = true)]
    format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Use the dashboard's Hebrew column labels
    #[arg(long, global = true)]
    hebrew_headers: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Schedule for a single track
    Schedule(ScheduleArgs),
    /// Aggregate schedule for all tracks in a CSV or JSON file
    Mortgage(MortgageArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
    Json,
}

#[derive(Args)]
struct ScheduleArgs {
    /// Repayment method: straight, declining or bullet
    #[arg(long, default_value = "straight")]
    method: RepaymentMethod,

    /// Loan amount
    #[arg(long)]
    principal: f64,

    /// Annual interest rate in percent
    #[arg(long)]
    rate: f64,

    /// Number of monthly periods
    #[arg(long, allow_negative_numbers = true)]
    periods: i64,

    /// Annual index rate in percent
    #[arg(long, default_value_t = DEFAULT_ANNUAL_INDEX_RATE)]
    index_rate: f64,

    /// Link the track to the index (one observation)
    #[arg(long)]
    indexed: bool,
}

#[derive(Args)]
struct MortgageArgs {
    /// Tracks file (.csv or .json)
    #[arg(long)]
    tracks: PathBuf,

    /// First period to show (1-indexed)
    #[arg(long, default_value_t = 1)]
    from: u32,

    /// Last period to show
    #[arg(long, default_value_t = u32::MAX)]
    to: u32,

    /// Compute tracks on a single thread
    #[arg(long)]
    sequential: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let headers = if cli.hebrew_headers {
        HeaderStyle::Hebrew
    } else {
        HeaderStyle::Semantic
    };

    let writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Unable to create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    match cli.command {
        Commands::Schedule(args) => run_schedule(args, cli.format, headers, writer),
        Commands::Mortgage(args) => run_mortgage(args, cli.format, headers, writer),
    }
}

fn run_schedule(
    args: ScheduleArgs,
    format: OutputFormat,
    headers: HeaderStyle,
    mut out: Box<dyn Write>,
) -> Result<()> {
    let index_series = if args.indexed { vec![1.0] } else { Vec::new() };
    let period_count = period_count_from(args.periods)?;
    let track = TrackParams::new(args.method, args.principal, args.rate, period_count)
        .with_indexation(args.index_rate, index_series);

    let schedule = generate_schedule(&track).context("Schedule generation failed")?;

    match format {
        OutputFormat::Json => output::write_json(&mut out, &schedule)?,
        OutputFormat::Csv => output::write_ledger_csv(&mut out, &schedule.ledger, headers)?,
        OutputFormat::Table => {
            output::write_ledger_table(&mut out, &schedule.ledger, headers)?;
            writeln!(out)?;
            output::write_summary(&mut out, &schedule.summary())?;
        }
    }
    out.flush()?;
    Ok(())
}

fn run_mortgage(
    args: MortgageArgs,
    format: OutputFormat,
    headers: HeaderStyle,
    mut out: Box<dyn Write>,
) -> Result<()> {
    let tracks = load_tracks_auto(&args.tracks)
        .with_context(|| format!("Failed to load tracks from {}", args.tracks.display()))?;

    let result = MortgageRunner::new()
        .with_parallel(!args.sequential)
        .run(&tracks);

    for failure in &result.failures {
        eprintln!("Skipped {}: {}", failure.label(), failure.error);
    }

    let rows: &[LedgerRow] = result.rows_in_range(args.from, args.to);

    match format {
        OutputFormat::Json => output::write_json(&mut out, &result.report())?,
        OutputFormat::Csv => output::write_ledger_csv(&mut out, rows, headers)?,
        OutputFormat::Table => {
            for schedule in &result.schedules {
                writeln!(
                    out,
                    "{:<20} {:<10} first payment {:>12.2}  total {:>14.2}",
                    schedule.name.as_deref().unwrap_or("-"),
                    schedule.method,
                    schedule.first_payment(),
                    schedule.summary().total_payments,
                )?;
            }
            writeln!(out)?;
            output::write_ledger_table(&mut out, rows, headers)?;
            writeln!(out)?;
            output::write_summary(&mut out, &result.summary())?;
        }
    }
    out.flush()?;
    Ok(())
}
