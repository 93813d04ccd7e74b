//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use costplan_core::cost_plan::ReportingPeriod;
use costplan_shared::types::Cents;
use rust_decimal::Decimal;

/// Top-level parser for the `costplan` binary.
#[derive(Debug, Parser)]
#[command(name = "costplan", version, about = "Cost plan reconciliation and variance engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,
}

/// Engine operations.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Calculate line figures and section totals for a reporting period
    Calculate(CalculateArgs),
    /// Plan the evaluation row changes for one pricing scope
    Reconcile(InputArgs),
    /// Record an explicit row deletion and print the updated tombstone map
    HideRow(InputArgs),
    /// Sum evaluation cells per firm
    FirmTotals(InputArgs),
    /// Compare current totals with a saved snapshot
    Compare(InputArgs),
    /// Derive forecast and variance trends from snapshots
    Trend(TrendArgs),
    /// Format an amount of cents
    Format(FormatArgs),
    /// Parse a typed currency amount into cents
    Parse {
        /// Text to parse, e.g. "$1.5k" or "(250)"
        text: String,
    },
}

/// A JSON input document.
#[derive(Debug, Args)]
pub struct InputArgs {
    /// Path to the JSON input, or "-" for stdin
    #[arg(short, long, default_value = "-")]
    pub input: PathBuf,
}

/// Arguments for `calculate`.
#[derive(Debug, Args)]
pub struct CalculateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Reporting period (YYYY-MM), overriding the one in the input
    #[arg(short, long)]
    pub period: Option<ReportingPeriod>,
}

/// Arguments for `trend`.
#[derive(Debug, Args)]
pub struct TrendArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Percentage of the first value that counts as movement
    #[arg(short, long)]
    pub threshold: Option<Decimal>,
}

/// Arguments for `format`.
#[derive(Debug, Args)]
pub struct FormatArgs {
    /// Amount in cents
    #[arg(allow_negative_numbers = true)]
    pub cents: Cents,

    /// Abbreviate to K, M or B
    #[arg(long)]
    pub compact: bool,

    /// Prefix positive amounts with "+"
    #[arg(long)]
    pub sign: bool,

    /// Round to whole units
    #[arg(long)]
    pub no_cents: bool,

    /// Gross up by the configured GST rate
    #[arg(long)]
    pub gst: bool,
}
