//! Diff command

use clap::{Args, ValueEnum};
use distaudit_core::codec::wrap_page;
use distaudit_core::model::ResourceRecord;
use distaudit_core::{compute_latest_diff, AuditReport, LatestDiff, RecordWarning};
use distaudit_store::atomic::write_report;
use distaudit_store::{AuditConfig, FsSnapshotSource};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// XHTML report page
    Html,
    /// JSON summary of the reconciliation
    Json,
}

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Snapshot directory [default: audit]
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Snapshot file name prefix [default: audit]
    #[arg(long)]
    pub prefix: Option<String>,

    /// Write the report here instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
    pub format: OutputFormat,

    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ResourceKey<'a> {
    directory: &'a str,
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct DiffSummary<'a> {
    from: &'a str,
    till: &'a str,
    added: Vec<ResourceKey<'a>>,
    modified: Vec<ResourceKey<'a>>,
    removed: Vec<ResourceKey<'a>>,
    warnings: &'a [RecordWarning],
}

impl<'a> DiffSummary<'a> {
    fn of(report: &'a AuditReport) -> Self {
        let keys = |records: &'a [ResourceRecord]| -> Vec<ResourceKey<'a>> {
            records
                .iter()
                .map(|r| ResourceKey {
                    directory: &r.directory,
                    name: &r.name,
                })
                .collect()
        };
        let reconciliation = &report.reconciliation;
        Self {
            from: &report.older_identifier,
            till: &report.newer_identifier,
            added: keys(&reconciliation.added),
            modified: keys(&reconciliation.modified),
            removed: keys(&reconciliation.removed),
            warnings: &reconciliation.warnings,
        }
    }
}

pub fn execute(args: DiffArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = AuditConfig::load_optional(args.config.as_deref())?;
    let source = FsSnapshotSource::new(config.resolve_dir(args.dir));
    let prefix = config.resolve_prefix(args.prefix);

    let report = match compute_latest_diff(&source, &prefix)? {
        LatestDiff::InsufficientHistory { .. } => {
            println!("First run so skipping comparison");
            return Ok(());
        }
        LatestDiff::Compared(report) => report,
    };

    let rendered = match args.format {
        OutputFormat::Html => wrap_page(&super::today(), &report.fragment),
        OutputFormat::Json => serde_json::to_string_pretty(&DiffSummary::of(&report))?,
    };

    match args.output {
        Some(path) => {
            write_report(&path, rendered.as_bytes())?;
            println!("Report written:");
            println!("  path: {}", path.display());
            println!("  from: {}", report.older_identifier);
            println!("  till: {}", report.newer_identifier);
        }
        None => println!("{}", rendered),
    }
    Ok(())
}
