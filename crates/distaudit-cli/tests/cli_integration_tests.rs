//! CLI integration tests
//!
//! Drive the `distaudit` binary end to end: scan a tree twice, then compare
//! the two snapshots it wrote.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_distaudit-cli"))
        .current_dir(cwd)
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "CLI command should succeed. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

fn setup_tree(work: &TempDir) {
    let tree = work.path().join("dist");
    fs::create_dir_all(tree.join("rat")).unwrap();
    fs::write(tree.join("rat").join("rat-0.1.tar.gz"), "first release").unwrap();
    fs::write(tree.join("rat").join("rat-0.1.tar.gz.asc"), "signature").unwrap();
    fs::write(tree.join("KEYS"), "keys").unwrap();
}

fn scan(work: &TempDir, created: &str) {
    let output = run(work.path(), &["scan", "dist", "--created", created]);
    assert_success(&output);
}

#[test]
fn test_scan_writes_dated_snapshot() {
    let work = TempDir::new().unwrap();
    setup_tree(&work);

    let output = run(
        work.path(),
        &["scan", "dist", "--created", "2008-01-22", "--prefix", "rat"],
    );
    assert_success(&output);

    let snapshot = work.path().join("audit").join("rat-2008-01-22.html");
    let markup = fs::read_to_string(&snapshot).unwrap();
    assert!(markup.contains("<span class='created'>2008-01-22</span>"));
    assert!(markup.contains("rat-0.1.tar.gz"));
    assert!(!markup.contains("KEYS"));
    assert!(!markup.contains(".asc"));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("resources: 1"), "stdout: {}", stdout);
}

#[test]
fn test_scan_audits_several_trees_into_one_snapshot() {
    let work = TempDir::new().unwrap();
    setup_tree(&work);
    let archive = work.path().join("archive");
    fs::create_dir_all(archive.join("rat")).unwrap();
    fs::write(archive.join("rat").join("rat-0.0.1.tar.gz"), "old release").unwrap();

    let output = run(
        work.path(),
        &["scan", "dist", "archive", "--created", "2008-01-22"],
    );
    assert_success(&output);

    let markup =
        fs::read_to_string(work.path().join("audit").join("audit-2008-01-22.html")).unwrap();
    assert_eq!(markup.matches("<div class='audit'>").count(), 2);
    assert!(markup.contains("<span class='base-dir'>dist</span>"));
    assert!(markup.contains("<span class='base-dir'>archive</span>"));
    assert!(markup.contains("rat-0.1.tar.gz"));
    assert!(markup.contains("rat-0.0.1.tar.gz"));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("trees: 2"), "stdout: {}", stdout);
    assert!(stdout.contains("resources: 2"), "stdout: {}", stdout);
}

#[test]
fn test_change_in_second_tree_is_reported() {
    let work = TempDir::new().unwrap();
    setup_tree(&work);
    let archive = work.path().join("archive");
    fs::create_dir_all(archive.join("rat")).unwrap();
    fs::write(archive.join("rat").join("rat-0.0.1.tar.gz"), "old release").unwrap();
    assert_success(&run(
        work.path(),
        &["scan", "dist", "archive", "--created", "2008-01-22"],
    ));
    fs::write(archive.join("rat").join("rat-0.0.1.tar.gz"), "tampered").unwrap();
    assert_success(&run(
        work.path(),
        &["scan", "dist", "archive", "--created", "2008-01-23"],
    ));

    let output = run(work.path(), &["diff", "--format", "json"]);
    assert_success(&output);

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let modified = summary["modified"].as_array().unwrap();
    assert_eq!(modified.len(), 1);
    assert_eq!(modified[0]["name"], "rat-0.0.1.tar.gz");
    assert_eq!(summary["added"].as_array().unwrap().len(), 0);
}

#[test]
fn test_first_diff_is_skipped() {
    let work = TempDir::new().unwrap();
    setup_tree(&work);
    scan(&work, "2008-01-22");

    let output = run(work.path(), &["diff"]);
    assert_success(&output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("First run so skipping comparison"));
}

#[test]
fn test_diff_json_lists_changes() {
    let work = TempDir::new().unwrap();
    setup_tree(&work);
    scan(&work, "2008-01-22");
    fs::write(
        work.path().join("dist").join("rat").join("rat-0.2.tar.gz"),
        "second release",
    )
    .unwrap();
    scan(&work, "2008-01-23");

    let output = run(work.path(), &["--json-logs", "diff", "--format", "json"]);
    assert_success(&output);

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["from"], "audit-2008-01-22.html");
    assert_eq!(summary["till"], "audit-2008-01-23.html");
    assert_eq!(summary["added"][0]["name"], "rat-0.2.tar.gz");
    assert_eq!(summary["removed"].as_array().unwrap().len(), 0);
    assert_eq!(summary["modified"].as_array().unwrap().len(), 0);
}

#[test]
fn test_diff_html_report_written_to_file() {
    let work = TempDir::new().unwrap();
    setup_tree(&work);
    scan(&work, "2008-01-22");
    fs::write(
        work.path().join("dist").join("rat").join("rat-0.1.tar.gz"),
        "patched release",
    )
    .unwrap();
    scan(&work, "2008-01-23");

    let output = run(work.path(), &["diff", "--output", "reports/latest.html"]);
    assert_success(&output);

    let page = fs::read_to_string(work.path().join("reports").join("latest.html")).unwrap();
    assert!(page.starts_with("<!DOCTYPE html"));
    assert!(page.contains("<div class='diff'>"));
    assert!(page.contains("<ul class='modified'><li class='group'>"));
    assert!(page.contains("<li class='resource'>rat-0.1.tar.gz</li>"));
}

#[test]
fn test_date_mismatch_exits_with_error() {
    let work = TempDir::new().unwrap();
    setup_tree(&work);
    scan(&work, "2008-01-21");
    scan(&work, "2008-01-22");
    let audit = work.path().join("audit");
    fs::rename(
        audit.join("audit-2008-01-22.html"),
        audit.join("audit-2008-01-23.html"),
    )
    .unwrap();

    let output = run(work.path(), &["diff"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: [ERR_DATE_MISMATCH]"), "stderr: {}", stderr);
    assert!(stderr.contains("audit-2008-01-23.html"));
}

#[test]
fn test_config_file_supplies_dir_and_prefix() {
    let work = TempDir::new().unwrap();
    setup_tree(&work);
    fs::write(
        work.path().join("audit.toml"),
        "dir = \"snapshots\"\nprefix = \"mirror\"\nskip_extensions = []\n",
    )
    .unwrap();

    let output = run(
        work.path(),
        &["scan", "dist", "--created", "2008-01-22", "--config", "audit.toml"],
    );
    assert_success(&output);

    let markup =
        fs::read_to_string(work.path().join("snapshots").join("mirror-2008-01-22.html")).unwrap();
    assert!(markup.contains("rat-0.1.tar.gz.asc"));
}

#[test]
fn test_missing_config_file_is_an_error() {
    let work = TempDir::new().unwrap();
    setup_tree(&work);

    let output = run(work.path(), &["scan", "dist", "--config", "absent.toml"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error: [ERR_NOT_FOUND]"));
}

#[test]
fn test_bad_created_date_is_rejected() {
    let work = TempDir::new().unwrap();
    setup_tree(&work);

    let output = run(work.path(), &["scan", "dist", "--created", "yesterday"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_INVALID_INPUT"));
    assert!(!work.path().join("audit").exists());
}
