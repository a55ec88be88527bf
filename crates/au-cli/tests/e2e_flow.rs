//! End-to-end tests driving the `au` binary.
//!
//! Tests the full pipeline: event log on disk → config → usage report.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use au_core::DayWindow;
use chrono::{Local, NaiveDate};
use tempfile::TempDir;

fn au_binary() -> String {
    env!("CARGO_BIN_EXE_au").to_string()
}

fn report_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 4).unwrap()
}

/// Writes a config file pointing at files inside `temp`.
fn write_config(temp: &Path) -> PathBuf {
    let config_path = temp.join("config.toml");
    let content = format!(
        "events_path = {:?}\napps_path = {:?}\n",
        temp.join("events.jsonl").display().to_string(),
        temp.join("apps.json").display().to_string(),
    );
    std::fs::write(&config_path, content).unwrap();
    config_path
}

fn write_events(temp: &Path, events: &[(&str, &str, &str, i64)]) {
    let lines: Vec<String> = events
        .iter()
        .map(|(app, sub, kind, ts)| {
            format!(r#"{{"app_id":"{app}","sub_id":"{sub}","kind":"{kind}","timestamp_ms":{ts}}}"#)
        })
        .collect();
    std::fs::write(temp.join("events.jsonl"), lines.join("\n")).unwrap();
}

fn au(temp: &Path, args: &[&str]) -> Output {
    let config_path = write_config(temp);
    Command::new(au_binary())
        .env("HOME", temp)
        .env_remove("AU_EVENTS_PATH")
        .env_remove("AU_APPS_PATH")
        .env_remove("AU_EXCLUDE_PATTERN")
        .arg("--config")
        .arg(&config_path)
        .args(args)
        .output()
        .expect("failed to run au")
}

#[test]
fn test_usage_json_report() {
    let temp = TempDir::new().unwrap();
    let start = DayWindow::for_date(report_date(), &Local).start_ms;
    write_events(
        temp.path(),
        &[
            // Previous day: its stop has no resume inside the window.
            ("com.example.reader", "Book", "activity_resumed", start - 5_000),
            ("com.example.reader", "Book", "activity_stopped", start + 5_000),
            ("com.example.mail", "Inbox", "activity_resumed", start + 60_000),
            ("com.example.mail", "Compose", "activity_resumed", start + 70_000),
            ("com.example.mail", "Inbox", "activity_stopped", start + 80_000),
            ("com.example.mail", "Compose", "activity_stopped", start + 130_000),
            ("com.google.android.apps.nexuslauncher", "Home", "activity_resumed", start + 130_000),
            ("com.google.android.apps.nexuslauncher", "Home", "activity_stopped", start + 900_000),
            ("com.example.chat", "Main", "1", start + 900_000),
            ("com.example.chat", "Main", "2", start + 1_000_000),
            ("com.example.chat", "Main", "23", start + 1_020_000),
        ],
    );

    let output = au(temp.path(), &["usage", "--date", "2025-03-04", "--json"]);

    assert!(
        output.status.success(),
        "au usage should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8(output.stdout).unwrap();
    // mail: 20s (Inbox) + 60s (Compose) = 80s; chat: 120s.
    assert_eq!(
        stdout,
        "{\n  \"com.example.chat\": 120,\n  \"com.example.mail\": 80\n}\n"
    );
}

#[test]
fn test_usage_table_report() {
    let temp = TempDir::new().unwrap();
    let start = DayWindow::for_date(report_date(), &Local).start_ms;
    write_events(
        temp.path(),
        &[
            ("com.example.mail", "Inbox", "activity_resumed", start + 3_600_000),
            ("com.example.mail", "Inbox", "activity_stopped", start + 7_500_000),
        ],
    );

    let output = au(temp.path(), &["usage", "--date", "2025-03-04"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("APP USAGE: Tuesday, Mar 4, 2025"));
    assert!(stdout.contains("com.example.mail"));
    assert!(stdout.contains("(3900s)"));
    assert!(stdout.contains("Total: 1h 5m across 1 apps"));
}

#[test]
fn test_usage_without_event_log_fails_with_hint() {
    let temp = TempDir::new().unwrap();

    let output = au(temp.path(), &["usage", "--json"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("usage access not granted"),
        "unexpected stderr: {stderr}"
    );
    assert!(output.stdout.is_empty());
}

#[test]
fn test_apps_installed_and_info() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("apps.json"),
        r#"[{"name":"Mail","package_name":"com.example.mail"}]"#,
    )
    .unwrap();

    let installed = au(temp.path(), &["apps", "installed", "com.example.mail"]);
    assert_eq!(String::from_utf8_lossy(&installed.stdout).trim(), "true");

    let missing = au(temp.path(), &["apps", "installed", "com.example.none"]);
    assert_eq!(String::from_utf8_lossy(&missing.stdout).trim(), "false");

    let info = au(temp.path(), &["apps", "info", "com.example.none"]);
    assert!(info.status.success());
    assert_eq!(String::from_utf8_lossy(&info.stdout).trim(), "null");
}

#[test]
fn test_apps_list_outputs_json_array() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("apps.json"),
        r#"[
            {"name":"Mail","package_name":"com.example.mail"},
            {"name":"Settings","package_name":"android.settings","is_system":true}
        ]"#,
    )
    .unwrap();

    let output = au(temp.path(), &["apps", "list"]);

    assert!(output.status.success());
    let apps: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(apps.as_array().map(Vec::len), Some(1));
    assert_eq!(apps[0]["package_name"], "com.example.mail");
}
