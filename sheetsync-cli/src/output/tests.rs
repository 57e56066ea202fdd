//! CLI output formatting tests.

use chrono::{TimeZone, Utc};
use std::time::Duration;

use sheetsync_core::{EndpointAttempt, RefreshMode, SyncReport};
use sheetsync_store::Trigger;

use super::json;
use super::text::TextFormatter;

fn sample_report() -> SyncReport {
    SyncReport {
        success: true,
        rows: 3,
        mode: RefreshMode::Full,
        attempts: vec![
            EndpointAttempt {
                name: "pets".to_string(),
                path: "/pets".to_string(),
                records: 2,
                duration: Duration::from_millis(200),
            },
            EndpointAttempt {
                name: "owners".to_string(),
                path: "/owners".to_string(),
                records: 1,
                duration: Duration::from_millis(120),
            },
        ],
        duration: Duration::from_millis(400),
    }
}

#[test]
fn text_report_without_colors() {
    let formatter = TextFormatter::new(false);
    let out = formatter.format_report(&sample_report());

    let mut lines = out.lines();
    assert_eq!(lines.next().unwrap(), "✓ Synced 3 rows (full refresh) in 0.4s");
    assert!(out.contains("pets"));
    assert!(out.contains("/owners"));
    assert!(!out.contains("\x1b["), "no ANSI codes in plain mode");
}

#[test]
fn text_report_with_colors_paints_the_check() {
    let formatter = TextFormatter::new(true);
    let out = formatter.format_report(&sample_report());
    assert!(out.contains("\x1b[32m✓\x1b[0m"));
}

#[test]
fn text_report_uses_singular_for_one_row() {
    let mut report = sample_report();
    report.rows = 1;
    report.attempts.truncate(0);
    let out = TextFormatter::new(false).format_report(&report);
    assert!(out.starts_with("✓ Synced 1 row "));
}

#[test]
fn json_report_is_machine_readable() {
    let out = json::report(&sample_report(), false).unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["success"], true);
    assert_eq!(value["rows"], 3);
    assert_eq!(value["mode"], "full");
    assert_eq!(value["attempts"][1]["name"], "owners");
}

#[test]
fn empty_trigger_listing_has_a_message() {
    let out = TextFormatter::new(false).format_triggers(&[]);
    assert_eq!(out, "No triggers registered.");
}

#[test]
fn trigger_listing_shows_period_and_age() {
    let triggers = vec![Trigger {
        handler: "sync".to_string(),
        period_minutes: 30,
        created_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
    }];
    let out = TextFormatter::new(false).format_triggers(&triggers);
    assert!(out.contains("sync"));
    assert!(out.contains("every 30 min"));
    assert!(out.contains("2025-06-01 12:00 UTC"));

    let json_out = json::triggers(&triggers, false).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json_out).unwrap();
    assert_eq!(value[0]["handler"], "sync");
    assert_eq!(value[0]["period_minutes"], 30);
}
