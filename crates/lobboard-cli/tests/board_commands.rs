//! Integration tests for the lobboard CLI.
//!
//! Exit code contract: 0 on success (including "no data"), 1 when the input
//! file cannot be read or parsed. Per-record data problems never fail a
//! command; they show up in `check` output as dropped ids.

use std::path::PathBuf;
use std::process::{Command, Output};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn lobboard_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("target/debug/lobboard")
}

fn run(args: &[&str]) -> Output {
    Command::new(lobboard_binary())
        .args(args)
        .output()
        .expect("failed to execute lobboard")
}

fn fixture(name: &str) -> String {
    fixtures_dir().join(name).to_string_lossy().into_owned()
}

#[test]
fn check_reports_counts_and_dropped() {
    let out = run(&["check", &fixture("site_records.json")]);
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("records:   5"));
    assert!(stdout.contains("intervals: 4"));
    assert!(stdout.contains("groups:    3"));
    assert!(stdout.contains("dropped:   1"));
    assert!(stdout.contains("lob-004"));
}

#[test]
fn check_missing_file_exits_1() {
    let out = run(&["check", "does-not-exist.json"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn check_malformed_json_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, "{not json").unwrap();
    let out = run(&["check", path.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn layout_emits_board_json() {
    let out = run(&[
        "layout",
        &fixture("site_records.json"),
        "--as-of",
        "2026-01-15",
        "--descending",
    ]);
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    let board: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    // Floors top-down; floor 3 kept as an empty row (its record was dropped)
    let rows = board["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["group_key"], "FLOOR 3");
    assert_eq!(rows[0]["bars"].as_array().unwrap().len(), 0);

    // Floor 1 has three activities; the overlapping pair stacks
    let floor1 = &rows[2];
    assert_eq!(floor1["group_key"], "FLOOR 1");
    assert_eq!(floor1["lane_count"], 2);

    // Data window: Jan 5 - 2d .. Jan 30 + 5d
    assert_eq!(board["window"]["start"], "2026-01-03");
    assert_eq!(board["window"]["end"], "2026-02-04");

    assert_eq!(board["dropped"].as_array().unwrap().len(), 1);
}

#[test]
fn layout_rolling_window_week_markers() {
    let out = run(&[
        "layout",
        &fixture("site_records.json"),
        "--window",
        "rolling",
        "--granularity",
        "week",
        "--weeks-before",
        "2",
        "--weeks",
        "8",
        "--as-of",
        "2026-01-21",
    ]);
    assert!(out.status.success());

    let board: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&out.stdout)).unwrap();
    // Rolling window anchored to a Monday, independent of the data
    assert_eq!(board["window"]["start"], "2026-01-05");
    let markers = board["markers"].as_array().unwrap();
    assert!(markers.iter().any(|m| m["is_current"] == true));
    assert!(markers.iter().any(|m| m["is_today"] == true));
}

#[test]
fn board_writes_html_file() {
    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("board.html");
    let out = run(&[
        "board",
        &fixture("site_records.json"),
        "--as-of",
        "2026-01-15",
        "--title",
        "Tower A - LOB",
        "-o",
        out_path.to_str().unwrap(),
    ]);
    assert!(out.status.success());

    let html = std::fs::read_to_string(&out_path).unwrap();
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("Tower A - LOB"));
    assert!(html.contains("FLOOR 1"));
    assert!(html.contains("board-bar"));
}

#[test]
fn board_svg_to_stdout() {
    let out = run(&[
        "board",
        &fixture("site_records.json"),
        "--format",
        "svg",
        "--as-of",
        "2026-01-15",
    ]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("<svg"));
    assert!(stdout.contains("Masonry"));
}

#[test]
fn board_empty_input_says_no_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.json");
    std::fs::write(&path, "[]").unwrap();
    let out = run(&["board", path.to_str().unwrap()]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("No data to display."));
}

#[test]
fn board_text_format_summarizes() {
    let out = run(&[
        "board",
        &fixture("site_records.json"),
        "--format",
        "text",
        "--as-of",
        "2026-01-15",
    ]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Window: 2026-01-03 .. 2026-02-04"));
    assert!(stdout.contains("FLOOR 1 [2 lanes]"));
}
