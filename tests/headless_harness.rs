//! Headless mode process-level integration harness.
//!
//! # What this covers
//!
//! This harness runs `battlemap` as a compiled binary via
//! [`std::process::Command`] and checks what a user or another tool sees:
//!
//! - **Output**: the map for a selection is printed to stdout as JSON.
//! - **Date errors**: the summary goes to stderr and the exit code stays 0.
//! - **Exit codes**: unreadable or malformed datasets and bad flags fail.
//!
//! # What this does NOT cover
//!
//! - TUI rendering (see the `TestBackend` tests in `battlemap-tui`)
//!
//! # Running
//!
//! ```sh
//! cargo test --test headless_harness
//! ```

mod common;
use common::*;

use pretty_assertions::assert_eq;
use serde_json::Value;
use std::path::Path;
use std::process::{Command, Output};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Run the binary with an isolated config directory.
fn battlemap(config_home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_battlemap"))
        .env("XDG_CONFIG_HOME", config_home)
        .args(args)
        .output()
        .expect("spawn battlemap")
}

fn stdout_json(out: &Output) -> Value {
    serde_json::from_slice(&out.stdout).expect("stdout is JSON")
}

fn markers(view: &Value) -> usize {
    view["markers"].as_array().map_or(0, Vec::len)
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[test]
fn default_selection_is_first_battle_all_notes() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_dataset(dir.path(), SAMPLE_JSON);
    let out = battlemap(dir.path(), &["--headless", "--data", data.to_str().unwrap()]);

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let view = stdout_json(&out);
    assert_eq!(markers(&view), 6);
    assert_eq!(view["paths"].as_array().unwrap().len(), 4);
    assert!(view["viewport"]["fit"].is_array());
}

#[test]
fn time_selection_for_named_event() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_dataset(dir.path(), SAMPLE_JSON);
    let out = battlemap(
        dir.path(),
        &[
            "--headless",
            "--data",
            data.to_str().unwrap(),
            "--event",
            "Midway",
            "--mode",
            "time",
            "--time",
            "1942-06-04 10:25:00",
        ],
    );

    assert!(out.status.success());
    let view = stdout_json(&out);
    assert_eq!(markers(&view), 1);
    assert_eq!(view["markers"][0]["popup"], "Dive bombers");
    assert_eq!(view["markers"][0]["tooltip"], "Time: 1942-06-04 10:25:00");
}

#[test]
fn note_selection_for_named_event() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_dataset(dir.path(), SAMPLE_JSON);
    let out = battlemap(
        dir.path(),
        &[
            "--headless",
            "--data",
            data.to_str().unwrap(),
            "--event",
            "Gettysburg",
            "--mode",
            "note",
            "--note",
            "Little Round Top",
        ],
    );

    assert!(out.status.success());
    assert_eq!(markers(&stdout_json(&out)), 2);
}

#[test]
fn unknown_event_prints_empty_map() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_dataset(dir.path(), SAMPLE_JSON);
    let out = battlemap(
        dir.path(),
        &["--headless", "--data", data.to_str().unwrap(), "--event", "Waterloo"],
    );

    assert!(out.status.success());
    let view = stdout_json(&out);
    assert_eq!(markers(&view), 0);
    assert!(view["viewport"]["default"].is_object());
}

#[test]
fn empty_map_uses_configured_default_view() {
    let dir = tempfile::tempdir().unwrap();
    let config_dir = dir.path().join("battlemap");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "[map]\ndefault_center_lat = 50.68\ndefault_center_lon = 4.41\ndefault_zoom = 9\n",
    )
    .unwrap();
    let data = write_dataset(dir.path(), SAMPLE_JSON);
    let out = battlemap(
        dir.path(),
        &["--headless", "--data", data.to_str().unwrap(), "--event", "Waterloo"],
    );

    assert!(out.status.success());
    let view = stdout_json(&out);
    assert_eq!(view["viewport"]["default"]["center"], serde_json::json!([50.68, 4.41]));
    assert_eq!(view["viewport"]["default"]["zoom"], 9);
}

// ---------------------------------------------------------------------------
// Date errors
// ---------------------------------------------------------------------------

#[test]
fn date_errors_go_to_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_dataset(dir.path(), SAMPLE_JSON);
    let out = battlemap(dir.path(), &["--headless", "--data", data.to_str().unwrap()]);

    assert!(out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Error parsing DateTime"), "got {stderr:?}");
    assert!(stderr.contains("1 of 8"), "got {stderr:?}");
}

#[test]
fn clean_dataset_writes_nothing_to_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let json = serde_json::to_string(&vec![
        RecordBuilder::new("Antietam").at(39.47, -77.74).build(),
    ])
    .unwrap();
    let data = write_dataset(dir.path(), &json);
    let out = battlemap(dir.path(), &["--headless", "--data", data.to_str().unwrap()]);

    assert!(out.status.success());
    assert!(out.stderr.is_empty(), "got {:?}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(markers(&stdout_json(&out)), 1);
}

// ---------------------------------------------------------------------------
// Exit codes
// ---------------------------------------------------------------------------

#[test]
fn missing_dataset_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.json");
    let out = battlemap(dir.path(), &["--headless", "--data", missing.to_str().unwrap()]);

    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("absent.json"));
}

#[test]
fn malformed_dataset_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_dataset(dir.path(), "{ not json");
    let out = battlemap(dir.path(), &["--headless", "--data", data.to_str().unwrap()]);

    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn selection_flags_require_headless() {
    let dir = tempfile::tempdir().unwrap();
    let out = battlemap(dir.path(), &["--event", "Midway"]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn mode_flag_requires_headless() {
    let dir = tempfile::tempdir().unwrap();
    let out = battlemap(dir.path(), &["--mode", "time"]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn unknown_mode_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_dataset(dir.path(), SAMPLE_JSON);
    let out = battlemap(
        dir.path(),
        &["--headless", "--data", data.to_str().unwrap(), "--mode", "sideways"],
    );
    assert_eq!(out.status.code(), Some(2));
}
