//! Scan command

use clap::Args;
use distaudit_core::codec::{render_audit, AuditSection};
use distaudit_core::errors::{ExError, ExErrorKind};
use distaudit_core::selector::snapshot_identifier;
use distaudit_store::atomic::write_snapshot;
use distaudit_store::{AuditConfig, Scanner};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Roots of the distribution trees to fingerprint into one snapshot
    #[arg(required = true, num_args = 1..)]
    pub base_dirs: Vec<PathBuf>,

    /// Snapshot directory [default: audit]
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Snapshot file name prefix [default: audit]
    #[arg(long)]
    pub prefix: Option<String>,

    /// Date stamped into the snapshot, YYYY-MM-DD [default: today, UTC]
    #[arg(long)]
    pub created: Option<String>,

    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn execute(args: ScanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = AuditConfig::load_optional(args.config.as_deref())?;
    let dir = config.resolve_dir(args.dir);
    let prefix = config.resolve_prefix(args.prefix);
    let created = match args.created {
        Some(created) => validate_date(created)?,
        None => super::today(),
    };

    let options = config.scan_options();
    let mut trees = Vec::with_capacity(args.base_dirs.len());
    for base_dir in &args.base_dirs {
        let snapshot = Scanner::new(base_dir, options.clone()).scan(&created)?;
        trees.push((base_dir.display().to_string(), snapshot));
    }

    let sections: Vec<AuditSection<'_>> = trees
        .iter()
        .map(|(base_dir, snapshot)| AuditSection {
            base_dir,
            records: &snapshot.resources,
        })
        .collect();
    let identifier = snapshot_identifier(&prefix, &created);
    let markup = render_audit(&created, &sections);
    let path = write_snapshot(&dir, &identifier, markup.as_bytes())?;

    println!("Snapshot written:");
    println!("  path: {}", path.display());
    println!("  trees: {}", trees.len());
    println!(
        "  resources: {}",
        trees.iter().map(|(_, snapshot)| snapshot.len()).sum::<usize>()
    );
    Ok(())
}

fn validate_date(created: String) -> Result<String, ExError> {
    let problem = match chrono::NaiveDate::parse_from_str(&created, "%Y-%m-%d") {
        // Identifiers are compared lexicographically, so the token must be zero-padded.
        Ok(date) if date.format("%Y-%m-%d").to_string() == created => None,
        Ok(_) => Some("date is not zero-padded".to_string()),
        Err(e) => Some(e.to_string()),
    };
    match problem {
        None => Ok(created),
        Some(reason) => Err(ExError::new(ExErrorKind::InvalidInput)
            .with_op("scan")
            .with_message(format!("--created must be YYYY-MM-DD, got '{}': {}", created, reason))),
    }
}
