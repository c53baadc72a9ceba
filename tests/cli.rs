//! CLI behavior tests: exit codes, output formats, stdin, init.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const READABLE: &str = "The quick brown fox jumps over the lazy dog.\n";
const DENSE: &str = "Notwithstanding organizational considerations, internationalization \
                     unquestionably necessitates extraordinarily comprehensive reconsideration.\n";

fn legible_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_legible"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write_doc(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn no_args_returns_error_not_panic() {
    legible_cmd()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("PATH").or(predicate::str::contains("path")));
}

#[test]
fn readable_document_succeeds() {
    let dir = TempDir::new().unwrap();
    let doc = write_doc(dir.path(), "page.txt", READABLE);

    legible_cmd()
        .arg(&doc)
        .arg("--no-cache")
        .assert()
        .success()
        .stdout(predicate::str::contains("Text Quality Analysis"));
}

#[test]
fn below_threshold_exit_1() {
    let dir = TempDir::new().unwrap();
    let doc = write_doc(dir.path(), "dense.txt", DENSE);

    legible_cmd()
        .arg(&doc)
        .args(["--threshold", "60", "--no-cache"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("below threshold"));
}

#[test]
fn above_threshold_exit_0() {
    let dir = TempDir::new().unwrap();
    let doc = write_doc(dir.path(), "page.txt", READABLE);

    legible_cmd()
        .arg(&doc)
        .args(["--threshold", "60", "--no-cache"])
        .assert()
        .success();
}

#[test]
fn threshold_from_config_file() {
    let dir = TempDir::new().unwrap();
    let doc = write_doc(dir.path(), "dense.txt", DENSE);
    write_doc(dir.path(), ".legiblerc.json", r#"{ "threshold": 30 }"#);

    legible_cmd()
        .arg(&doc)
        .arg("--no-cache")
        .assert()
        .failure()
        .code(1);
}

#[test]
fn strict_mode_fails_on_noise() {
    let dir = TempDir::new().unwrap();
    let doc = write_doc(
        dir.path(),
        "scan.txt",
        "The quick brown fox jumps over the lazy dog.\nPage 00012345 ~~ end\n",
    );

    legible_cmd()
        .arg(&doc)
        .arg("--no-cache")
        .assert()
        .success();

    legible_cmd()
        .arg(&doc)
        .args(["--strict", "--no-cache"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("noisy lines"));
}

#[test]
fn json_output_valid() {
    let dir = TempDir::new().unwrap();
    let doc = write_doc(dir.path(), "page.txt", READABLE);

    let output = legible_cmd()
        .arg(&doc)
        .args(["--json", "--no-cache"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(parsed["report"]["isValid"], true);
    assert!(parsed["report"]["readability"].is_number());
    assert_eq!(parsed["noiseFree"], true);
    assert_eq!(parsed["sourceKind"], "text");
}

#[test]
fn json_output_for_directory_has_summary() {
    let dir = TempDir::new().unwrap();
    write_doc(dir.path(), "a.txt", READABLE);
    write_doc(dir.path(), "nested/b.md", DENSE);
    write_doc(dir.path(), "ignored.rs", "fn main() {}");

    let output = legible_cmd()
        .arg(dir.path())
        .args(["--json", "--no-cache"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["results"].as_array().unwrap().len(), 2);
    assert_eq!(parsed["summary"]["documentsAnalyzed"], 2);
}

#[test]
fn quiet_output_one_line_per_document() {
    let dir = TempDir::new().unwrap();
    write_doc(dir.path(), "a.txt", READABLE);
    write_doc(dir.path(), "b.txt", "Hello there");

    let output = legible_cmd()
        .arg(dir.path())
        .args(["--quiet", "--no-cache"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 2);
    assert!(stdout.contains("too-short"));
}

#[test]
fn stdin_text() {
    legible_cmd()
        .arg("-")
        .arg("--json")
        .write_stdin("Hello world.\nHello world.\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"isRedundant\": true"))
        .stdout(predicate::str::contains("\"sourceKind\": \"stdin\""));
}

#[test]
fn stdin_quiet_line() {
    legible_cmd()
        .args(["-", "--quiet"])
        .write_stdin("The cat sat on the mat today.\n")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<stdin>: "));
}

#[test]
fn rust_log_enables_debug_events() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_legible"));
    cmd.env("RUST_LOG", "debug")
        .arg("-")
        .write_stdin("The quick brown fox jumps over the lazy dog.\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG"));
}

#[test]
fn stdin_lines_payload() {
    let output = legible_cmd()
        .args(["-", "--lines", "--json"])
        .write_stdin(r#"["Hello world.", "Hello world."]"#)
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["report"]["isRedundant"], true);
    assert_eq!(parsed["report"]["readability"], "too-short");
    assert_eq!(parsed["stats"]["lines"], 2);
}

#[test]
fn stdin_invalid_lines_payload_exit_2() {
    legible_cmd()
        .args(["-", "--lines"])
        .write_stdin("not json at all")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Invalid JSON on stdin"));
}

#[test]
fn file_not_found_exit_2() {
    legible_cmd()
        .arg("definitely-missing.txt")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("definitely-missing.txt"));
}

#[test]
fn empty_directory_exit_2() {
    let dir = TempDir::new().unwrap();
    legible_cmd()
        .arg(dir.path())
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("No documents found"));
}

#[test]
fn cache_file_written_and_cleared() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join(".git")).unwrap();
    let doc = write_doc(dir.path(), "page.txt", READABLE);
    let cache_path = dir.path().join(".legible-cache.json");

    legible_cmd().arg(&doc).assert().success();
    assert!(cache_path.exists(), "cache should be written to the project root");

    legible_cmd()
        .arg(&doc)
        .arg("--clear-cache")
        .assert()
        .success()
        .stderr(predicate::str::contains("Cache cleared"));
}

#[test]
fn project_walk_evicts_deleted_documents_from_cache() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join(".git")).unwrap();
    write_doc(dir.path(), "keep.txt", READABLE);
    let gone = write_doc(dir.path(), "gone.txt", READABLE);
    let cache_path = dir.path().join(".legible-cache.json");

    legible_cmd().arg(dir.path()).arg("--quiet").assert().success();
    assert!(fs::read_to_string(&cache_path).unwrap().contains("gone.txt"));

    fs::remove_file(&gone).unwrap();
    legible_cmd().arg(dir.path()).arg("--quiet").assert().success();

    let cache = fs::read_to_string(&cache_path).unwrap();
    assert!(cache.contains("keep.txt"));
    assert!(!cache.contains("gone.txt"));
}

#[test]
fn init_creates_config() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join(".legiblerc.json");

    legible_cmd()
        .args(["init", "--threshold", "55"])
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success();

    let content = fs::read_to_string(&config_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed["threshold"], 55.0);
    assert_eq!(parsed["ocr"]["language"], "eng");
}

#[test]
fn init_does_not_overwrite() {
    let dir = TempDir::new().unwrap();
    let config_path = write_doc(dir.path(), ".legiblerc.json", r#"{ "threshold": 10 }"#);

    legible_cmd()
        .arg("init")
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(
        fs::read_to_string(&config_path).unwrap().trim(),
        r#"{ "threshold": 10 }"#
    );
}
