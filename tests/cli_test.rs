// tests/cli_test.rs
use std::io::Write;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

/// Run the binary with an empty configuration file and no SMGR_* variables
fn smgr(args: &[&str]) -> Output {
    let mut config = NamedTempFile::new().unwrap();
    config.write_all(b"").unwrap();

    Command::new(env!("CARGO_BIN_EXE_smgr"))
        .arg("--config")
        .arg(config.path())
        .args(args)
        .env_remove("SMGR_TOKEN")
        .env_remove("SMGR_PLATFORM")
        .env_remove("SMGR_OWNER")
        .env_remove("SMGR_REPOSITORY")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute smgr")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap().trim().to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

#[test]
fn test_help() {
    let output = smgr(&["--help"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("smgr"));
    assert!(text.contains("filter"));
    assert!(text.contains("fetch"));
    assert!(text.contains("increment"));
}

#[test]
fn test_filter_stream_and_highest() {
    let output = smgr(&[
        "filter",
        "--versions",
        "1.0.0 1.2.0 1.2.4 2.3.4",
        "--stream",
        "1.2.*",
        "--highest",
    ]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "1.2.4");
}

#[test]
fn test_filter_release_keeps_input_order() {
    let output = smgr(&["filter", "--versions", "1.1.0, 1.0.0-rc.1, 0.9.0", "--release"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "1.1.0 0.9.0");
}

#[test]
fn test_filter_highest_of_nothing_fails() {
    let output = smgr(&["filter", "--versions", "1.0.0", "-s", "9.*.*", "-H"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("version list is empty"));
}

#[test]
fn test_filter_rejects_invalid_version() {
    let output = smgr(&["filter", "--versions", "1.0.0 01.0.0"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("leading zeroes"));
}

#[test]
fn test_filter_rejects_invalid_pattern() {
    let output = smgr(&["filter", "--versions", "1.0.0", "--stream", "1.x.*"]);
    assert!(!output.status.success());
}

#[test]
fn test_fetch_dry_run_sorts_merged_versions() {
    let output = smgr(&[
        "--dry-run",
        "fetch",
        "--owner",
        "acme",
        "--repo",
        "widgets",
        "--versions",
        "1.0.0 2.0.0-rc.1 1.5.0",
    ]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "2.0.0-rc.1 1.5.0 1.0.0");
    let err = stderr(&output);
    assert!(err.contains("WARNING"));
    assert!(err.contains("Dry run: skipping the github tag source"));
}

#[test]
fn test_fetch_dry_run_with_filters() {
    let output = smgr(&[
        "fetch",
        "--dry-run",
        "--versions",
        "1.0.0 2.0.0-rc.1 1.5.0",
        "--release",
        "-H",
    ]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "1.5.0");
}

#[test]
fn test_increment_source_version() {
    let output = smgr(&["increment", "release", "-V", "1.2.3-rc.1", "--level", "minor"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "1.3.0");
}

#[test]
fn test_increment_default_level_is_patch() {
    let output = smgr(&["increment", "release", "--source-version", "1.2.3"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "1.2.4");
}

#[test]
fn test_increment_new_stream() {
    let output = smgr(&["increment", "release", "--stream", "3.*.*", "--level", "minor"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "3.0.0");
}

#[test]
fn test_increment_existing_stream() {
    let output = smgr(&[
        "increment",
        "release",
        "--stream",
        "1.*.*",
        "--versions",
        "1.0.0 1.4.2 2.0.0",
        "-l",
        "patch",
    ]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "1.4.3");
}

#[test]
fn test_increment_requires_version_or_stream() {
    let output = smgr(&["increment", "release"]);
    assert!(!output.status.success());
}

#[test]
fn test_increment_rejects_prerelease_stream() {
    let output = smgr(&["increment", "release", "--stream", "1.*.*-rc.*"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("must be release only"));
}

#[test]
fn test_increment_rejects_unknown_level() {
    let output = smgr(&["increment", "release", "-V", "1.0.0", "--level", "huge"]);
    assert!(!output.status.success());
}

#[test]
fn test_promote() {
    let output = smgr(&[
        "increment",
        "promote",
        "--source-version",
        "1.2.0-beta.4",
        "--target-stream",
        "1.*.*-rc.*",
        "--versions",
        "1.2.0-rc.0 1.2.0-rc.5",
    ]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "1.2.0-rc.6");
    assert!(!stderr(&output).contains("Dry run"));
}

#[test]
fn test_promote_onto_taken_literal_stream_fails() {
    let output = smgr(&[
        "increment",
        "promote",
        "-V",
        "1.0.0-beta.1",
        "--target-stream",
        "1.0.0-rc.1",
        "--versions",
        "1.0.0-rc.1",
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("already exists on stream"));
}

#[test]
fn test_promote_dry_run_fetch_uses_no_tags() {
    let output = smgr(&[
        "--dry-run",
        "increment",
        "promote",
        "-V",
        "2.0.0-alpha.3",
        "--target-stream",
        "2.*.*-beta.*",
        "--fetch",
    ]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "2.0.0-beta.0");
}
