//! End-to-end tests for the `transitmap` binary.
//!
//! Each test points `HOME` at a temporary directory so the config file and
//! log file never touch the real user profile. No test reaches the network:
//! invalid arguments are rejected before any client is built.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn transitmap(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_transitmap"))
        .args(args)
        .env("HOME", home)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run transitmap binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn config_path_points_into_home() {
    let home = TempDir::new().unwrap();

    let output = transitmap(home.path(), &["config", "path"]);

    assert!(output.status.success());
    let expected = home.path().join(".transitmap").join("config.ini");
    assert_eq!(stdout(&output).trim(), expected.display().to_string());
}

#[test]
fn config_init_writes_defaults_once() {
    let home = TempDir::new().unwrap();
    let config_path = home.path().join(".transitmap").join("config.ini");

    let output = transitmap(home.path(), &["config", "init"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(config_path.exists());

    std::fs::write(&config_path, "[refresh]\ninterval_ms = 5000\n").unwrap();
    let output = transitmap(home.path(), &["config", "init"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("already exists"));
    assert_eq!(
        std::fs::read_to_string(&config_path).unwrap(),
        "[refresh]\ninterval_ms = 5000\n"
    );

    let output = transitmap(home.path(), &["config", "init", "--force"]);
    assert!(output.status.success());
    assert!(std::fs::read_to_string(&config_path)
        .unwrap()
        .contains("interval_ms = 15000"));
}

#[test]
fn config_show_prints_effective_values() {
    let home = TempDir::new().unwrap();
    let config_dir = home.path().join(".transitmap");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.ini"),
        "[refresh]\ninterval_ms = 30000\noverlap = chained\n",
    )
    .unwrap();

    let output = transitmap(home.path(), &["config", "show"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("[feed]"));
    assert!(text.contains("interval_ms = 30000"));
    assert!(text.contains("overlap = chained"));
}

#[test]
fn invalid_config_file_fails_with_hint() {
    let home = TempDir::new().unwrap();
    let config_dir = home.path().join(".transitmap");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.ini"), "[map]\nzoom = 42\n").unwrap();

    let output = transitmap(home.path(), &["config", "show"]);

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("map.zoom"));
    assert!(err.contains("config init --force"));
}

#[test]
fn run_rejects_short_interval() {
    let home = TempDir::new().unwrap();

    let output = transitmap(home.path(), &["run", "--no-tui", "--interval-ms", "10"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("--interval-ms"));
}

#[test]
fn fetch_rejects_non_http_url() {
    let home = TempDir::new().unwrap();

    let output = transitmap(home.path(), &["fetch", "--url", "ftp://example.com/feed"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("http://"));
}

#[test]
fn unknown_format_is_a_usage_error() {
    let home = TempDir::new().unwrap();

    let output = transitmap(home.path(), &["fetch", "--format", "csv"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("csv"));
}
