//! Cost plan engine CLI.
//!
//! Reads a JSON document, runs one engine operation and prints the JSON
//! result on stdout. Logs go to stderr.

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use costplan_shared::{AppConfig, AppError};

mod cli;
mod commands;

use cli::{Cli, Command, InputArgs};

fn main() {
    if let Err(error) = run() {
        let code = error
            .downcast_ref::<AppError>()
            .map_or(1, AppError::exit_code);
        eprintln!("costplan error: {error:#}");
        std::process::exit(code);
    }
}

fn run() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.json_logs)?;

    let config = AppConfig::load().map_err(AppError::from)?;
    let engine = &config.engine;
    debug!(currency = %engine.currency, gst_rate = %engine.gst_rate, "Configuration loaded");

    match &cli.command {
        Command::Calculate(args) => {
            let input = read_input(&args.input)?;
            emit(&commands::calculate(&input, args.period, engine)?, cli.pretty)
        }
        Command::Reconcile(args) => emit(&commands::reconcile(&read_input(args)?)?, cli.pretty),
        Command::HideRow(args) => emit(&commands::hide_row(&read_input(args)?)?, cli.pretty),
        Command::FirmTotals(args) => {
            emit(&commands::firm_totals_of(&read_input(args)?)?, cli.pretty)
        }
        Command::Compare(args) => emit(&commands::compare(&read_input(args)?)?, cli.pretty),
        Command::Trend(args) => {
            let input = read_input(&args.input)?;
            emit(&commands::trend(&input, args.threshold, engine)?, cli.pretty)
        }
        Command::Format(args) => {
            println!("{}", commands::format(args, engine));
            Ok(())
        }
        Command::Parse { text } => {
            println!("{}", commands::parse(text));
            Ok(())
        }
    }
}

fn init_tracing(json: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("costplan=info"));

    let registry = tracing_subscriber::registry().with(filter);
    let result = if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };

    result.map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))
}

fn read_input(args: &InputArgs) -> anyhow::Result<String> {
    if args.input == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read input from stdin")?;
        return Ok(buffer);
    }

    std::fs::read_to_string(&args.input).map_err(|err| {
        AppError::Validation(format!("cannot read {}: {err}", args.input.display())).into()
    })
}

fn emit<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(AppError::from)?;
    println!("{json}");
    Ok(())
}
