// Command-line tests for the reciprocal binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

fn project() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("project")
}

fn reciprocal() -> Command {
    Command::cargo_bin("reciprocal").expect("binary not built")
}

#[test]
fn test_help_lists_commands() {
    reciprocal()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("version"));
}

#[test]
fn test_version_command() {
    reciprocal()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("reciprocal "));
}

#[test]
fn test_analyze_two_jobs() {
    let out = TempDir::new().unwrap();
    let out_dir = out.path().join("out");

    reciprocal()
        .current_dir(out.path())
        .args(["analyze", "--project"])
        .arg(project())
        .args(["--jobs", "1", "2", "--outdir"])
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Reciprocal analysis complete."))
        .stdout(predicate::str::contains("run_it025_data.star"));

    let edges = std::fs::read_to_string(out_dir.join("pysankey_input.csv")).unwrap();
    assert_eq!(
        edges,
        "id,jobANo_class,jobBNo_class,#particles\n\
         0,job001_class1,job002_class1,2\n\
         1,job001_class2,job002_class1,0\n"
    );
    assert!(out_dir.join("intersection_fractions.csv").exists());
    assert!(out_dir.join("per_class_star/job001_class2.star").exists());
}

#[test]
fn test_missing_subdirectory_fails() {
    let out = TempDir::new().unwrap();
    let out_dir = out.path().join("out");

    reciprocal()
        .current_dir(out.path())
        .args(["analyze", "--project"])
        .arg(out.path())
        .args(["--jobs", "1", "2", "--outdir"])
        .arg(&out_dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing Class3D directory"));

    assert!(!out_dir.exists());
}

#[test]
fn test_single_valid_job_fails() {
    let out = TempDir::new().unwrap();
    let out_dir = out.path().join("out");

    reciprocal()
        .current_dir(out.path())
        .args(["analyze", "--project"])
        .arg(project())
        .args(["--jobs", "1", "3", "--outdir"])
        .arg(&out_dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("insufficient jobs"));

    assert!(!out_dir.join("intersection_counts.csv").exists());
}

#[test]
fn test_skip_malformed_flag() {
    let out = TempDir::new().unwrap();
    let out_dir = out.path().join("out");

    reciprocal()
        .current_dir(out.path())
        .args(["analyze", "--project"])
        .arg(project())
        .args(["--jobs", "1", "2", "4", "--outdir"])
        .arg(&out_dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Parse error"));

    reciprocal()
        .current_dir(out.path())
        .args(["analyze", "--project"])
        .arg(project())
        .args(["--jobs", "1", "2", "4", "--skip-malformed", "--no-per-class", "--outdir"])
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Job 004: skipped"));
}

#[test]
fn test_config_file_json_format() {
    let out = TempDir::new().unwrap();
    let out_dir = out.path().join("out");
    let config = out.path().join("reciprocal.toml");
    std::fs::write(&config, "[output]\nformat = \"json\"\nper_class = false\n").unwrap();

    reciprocal()
        .current_dir(out.path())
        .args(["analyze", "--project"])
        .arg(project())
        .args(["--jobs", "1", "2", "--outdir"])
        .arg(&out_dir)
        .assert()
        .success();

    assert!(out_dir.join("intersection_counts.json").exists());
    assert!(out_dir.join("pysankey_input.json").exists());
    assert!(!out_dir.join("per_class_star").exists());
}
