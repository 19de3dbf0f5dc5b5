// Path: crates/cli/src/main.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # MNO Registry CLI
//!
//! Drives a local, single-replica MNO registry ledger from the command line.

use anyhow::Result;
use clap::{Parser, Subcommand};
use mno_cli::LedgerSession;
use mno_types::config::NodeConfig;
use mno_types::error::{ConfigError, ErrorCode, TransactionError};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;

use commands::*;

#[derive(Parser, Debug)]
#[clap(
    name = "mno-registry",
    version,
    about = "Manage MNO records on a local registry ledger.",
    long_about = "Each invocation loads the ledger snapshot, runs one operation atomically, and writes the snapshot back if the operation committed."
)]
struct Cli {
    /// Ledger snapshot file. Created on the first committed write; without it the ledger is discarded on exit.
    #[clap(long, global = true)]
    state: Option<PathBuf>,

    /// TOML configuration file.
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr.
    #[clap(long, global = true)]
    log_json: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    // --- Records ---
    /// Create the configured bootstrap records.
    Seed,
    /// Create a record.
    Create(records::RecordArgs),
    /// Print a record.
    Read(records::IdArgs),
    /// Replace a record.
    Update(records::RecordArgs),
    /// Remove a record.
    Delete(records::IdArgs),
    /// Print whether a record exists.
    Exists(records::IdArgs),
    /// Print every record in id order.
    List,

    // --- Tools ---
    /// Invoke any registry method with raw JSON arguments.
    Call(call::CallArgs),
    /// Print the SHA-256 digest of the ledger.
    Digest,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", render_error(&err));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => NodeConfig::load(path)?,
        None => NodeConfig::default(),
    };
    if cli.log_json {
        config.telemetry.json = true;
    }
    mno_telemetry::init_tracing(&config.telemetry)?;

    let mut session = LedgerSession::open(cli.state.as_deref(), &config.registry)?;

    match cli.command {
        Commands::Seed => records::seed(&mut session),
        Commands::Create(args) => records::create(&mut session, args),
        Commands::Read(args) => records::read(&mut session, args),
        Commands::Update(args) => records::update(&mut session, args),
        Commands::Delete(args) => records::delete(&mut session, args),
        Commands::Exists(args) => records::exists(&mut session, args),
        Commands::List => records::list(&mut session),
        Commands::Call(args) => call::run(&mut session, args),
        Commands::Digest => digest::run(&session),
    }
}

/// Formats an error as `<CODE>: <message>` when it carries a stable code.
fn render_error(err: &anyhow::Error) -> String {
    if let Some(e) = err.downcast_ref::<TransactionError>() {
        format!("{}: {}", e.code(), e)
    } else if let Some(e) = err.downcast_ref::<ConfigError>() {
        format!("{}: {}", e.code(), e)
    } else {
        format!("error: {:#}", err)
    }
}
