//! distaudit CLI
//!
//! Command-line interface for scanning distribution trees and comparing the
//! two most recent audit snapshots

use clap::{Parser, Subcommand};
use distaudit_core::logging_facility::{init, Profile};
use distaudit_core_types::RunId;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "distaudit")]
#[command(about = "distaudit - Distribution mirror audit", long_about = None)]
struct Cli {
    /// Emit JSON structured logs on stderr
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fingerprint one or more distribution trees into a dated snapshot
    Scan(commands::scan::ScanArgs),
    /// Compare the two most recent snapshots
    Diff(commands::diff::DiffArgs),
}

fn main() {
    let cli = Cli::parse();

    init(if cli.json_logs {
        Profile::Production
    } else {
        Profile::Development
    });

    let run_id = RunId::new();
    let span = tracing::info_span!("run", run_id = %run_id);
    let _entered = span.enter();

    let result = match cli.command {
        Commands::Scan(args) => commands::scan::execute(args),
        Commands::Diff(args) => commands::diff::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
