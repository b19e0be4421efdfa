// tests/cli.rs  —  End-to-end runs of the xcmerge binary
use std::path::Path;
use std::process::{Command, Output};

const BIN: &str = env!("CARGO_BIN_EXE_xcmerge");

fn xcmerge(dir: &Path, args: &[&str]) -> Output {
    Command::new(BIN)
        .current_dir(dir)
        .args(args)
        .output()
        .expect("failed to run xcmerge")
}

const TABLE: &str = r#"
[lookup]
"Start" = "开始"

[[entry]]
key = "retry"
source = "Retry"
target = "重试"

[[entry]]
source = "Start"

[[entry]]
source = "Export timeline"
"#;

#[test]
fn init_creates_catalog_and_refuses_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let out = xcmerge(dir.path(), &["--catalog", "cat.xcstrings", "--init"]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let raw = std::fs::read_to_string(dir.path().join("cat.xcstrings")).unwrap();
    assert!(raw.contains("\"sourceLanguage\": \"en\""));
    assert!(raw.contains("\"version\": \"1.0\""));

    let again = xcmerge(dir.path(), &["--catalog", "cat.xcstrings", "--init"]);
    assert!(!again.status.success());
}

#[test]
fn merge_is_idempotent_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("batch.toml"), TABLE).unwrap();

    let args = ["--catalog", "cat.xcstrings", "--table", "batch.toml"];
    let out = xcmerge(dir.path(), &args);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("added 3"), "stdout: {stdout}");
    let first = std::fs::read_to_string(dir.path().join("cat.xcstrings")).unwrap();
    assert!(first.contains("开始"));
    assert!(first.contains("needs_translation"));

    // Second run adds nothing and rewrites an identical catalog
    let out = xcmerge(dir.path(), &args);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("added 0, skipped 3"), "stdout: {stdout}");
    let second = std::fs::read_to_string(dir.path().join("cat.xcstrings")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn dry_run_does_not_touch_the_catalog() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("batch.toml"), TABLE).unwrap();

    let out = xcmerge(
        dir.path(),
        &["--catalog", "cat.xcstrings", "--table", "batch.toml", "--dry-run"],
    );
    assert!(out.status.success());
    assert!(!dir.path().join("cat.xcstrings").exists());
}

#[test]
fn check_and_stats_report_the_catalog() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("batch.toml"), TABLE).unwrap();
    let out = xcmerge(dir.path(), &["--catalog", "cat.xcstrings", "--table", "batch.toml"]);
    assert!(out.status.success());

    let out = xcmerge(dir.path(), &["--catalog", "cat.xcstrings", "--check"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("Catalog OK: 3 strings"));

    let out = xcmerge(dir.path(), &["--catalog", "cat.xcstrings", "--stats"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("2/3"), "stdout: {stdout}");
}

#[test]
fn scan_merges_extracted_strings_via_lookup() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("Sources")).unwrap();
    std::fs::write(
        dir.path().join("Sources/MainView.swift"),
        r#"Text("Start") Text("No cards yet")"#,
    )
    .unwrap();
    std::fs::write(dir.path().join("batch.toml"), TABLE).unwrap();

    let out = xcmerge(
        dir.path(),
        &["--catalog", "cat.xcstrings", "--table", "batch.toml", "--scan", "Sources"],
    );
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let raw = std::fs::read_to_string(dir.path().join("cat.xcstrings")).unwrap();
    // "Start" came from the table; the scanned copy is a skipped re-run
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("scan: added 1, skipped 1"), "stdout: {stdout}");
    // Scanned entry with no translation anywhere: automatic + placeholder
    assert!(raw.contains("\"no_cards_yet\""));
    assert!(raw.contains("automatic"));
}

#[test]
fn write_table_emits_a_mergeable_starter_batch() {
    let dir = tempfile::tempdir().unwrap();

    // Default path: ./table.toml
    let out = xcmerge(dir.path(), &["--write-table"]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(dir.path().join("table.toml").exists());

    // --table names the destination
    let out = xcmerge(dir.path(), &["--write-table", "--table", "starter.toml"]);
    assert!(out.status.success());
    let raw = std::fs::read_to_string(dir.path().join("starter.toml")).unwrap();
    assert!(raw.contains("[lookup]"));
    assert!(raw.contains("[[entry]]"));

    // The written table merges cleanly as-is
    let out = xcmerge(
        dir.path(),
        &["--catalog", "cat.xcstrings", "--table", "starter.toml"],
    );
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let cat = std::fs::read_to_string(dir.path().join("cat.xcstrings")).unwrap();
    assert!(cat.contains("\"settings_language\""));
}

#[test]
fn nothing_to_do_exits_with_hint() {
    let dir = tempfile::tempdir().unwrap();
    let out = xcmerge(dir.path(), &["--catalog", "cat.xcstrings"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Nothing to do"));
}
