//! E2E tests for `wt export` / `wt import` round trips between stores.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn wt_cmd(dir: &Path, db: &str) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("wt"));
    cmd.current_dir(dir);
    cmd.env("WELDTRACK_LOG", "error");
    cmd.env("WELDTRACK_DB", dir.join(db));
    cmd
}

fn json_output(dir: &Path, db: &str, args: &[&str]) -> Value {
    let output = wt_cmd(dir, db)
        .args(args)
        .arg("--json")
        .output()
        .expect("command should not crash");
    assert!(
        output.status.success(),
        "{args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid JSON")
}

#[test]
fn export_then_import_reproduces_the_month() {
    let dir = TempDir::new().expect("temp dir");

    let worker = json_output(dir.path(), "source.sqlite3", &["worker", "add", "Petrov"]);
    let worker_id = worker["id"].as_str().expect("worker id").to_string();

    for quantity in ["5", "3"] {
        wt_cmd(dir.path(), "source.sqlite3")
            .args(["log", "--worker", &worker_id, "--article", "AB-1", "--quantity", quantity])
            .assert()
            .success();
    }

    let exported = json_output(
        dir.path(),
        "source.sqlite3",
        &["export", "--output", "month.json"],
    );
    assert_eq!(exported["records"], 1);

    let file: Value = serde_json::from_str(
        &fs::read_to_string(dir.path().join("month.json")).expect("read export"),
    )
    .expect("export is JSON");
    let records = file.as_array().expect("array");
    assert_eq!(records[0]["welderName"], "Petrov");
    assert_eq!(records[0]["quantity"], 8);
    assert_eq!(records[0]["history"].as_array().expect("history").len(), 2);

    let report = json_output(dir.path(), "target.sqlite3", &["import", "month.json"]);
    assert_eq!(report["workersCreated"], 1);
    assert_eq!(report["entriesCreated"], 1);
    assert_eq!(report["historyAppended"], 2);
    assert!(report["failures"].as_array().expect("failures").is_empty());

    let summaries = json_output(dir.path(), "target.sqlite3", &["summary"]);
    let summaries = summaries.as_array().expect("array");
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0]["totalQuantity"], 8);

    // The imported worker keeps its id and resolves by name.
    let workers = json_output(dir.path(), "target.sqlite3", &["worker", "list"]);
    let workers = workers.as_array().expect("array");
    assert_eq!(workers.len(), 1);
    assert_eq!(workers[0]["id"].as_str(), Some(worker_id.as_str()));
    assert_eq!(workers[0]["name"], "Petrov");
}

#[test]
fn malformed_import_file_reports_format_error() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join("garbage.json"), "definitely not json").expect("write");

    wt_cmd(dir.path(), "records.sqlite3")
        .args(["import", "garbage.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed import data"));

    let workers = json_output(dir.path(), "records.sqlite3", &["worker", "list"]);
    assert!(workers.as_array().expect("array").is_empty(), "no partial writes");
}

#[test]
fn bad_record_fails_alone_and_is_reported() {
    let dir = TempDir::new().expect("temp dir");
    let data = r#"[
        {
            "workerId": "w-good",
            "welderName": "Petrov",
            "article": "AB-1",
            "quantity": 5,
            "month": "July 2026",
            "date": "2026-07-05T08:00:00Z",
            "history": []
        },
        {
            "workerId": "w-bad",
            "article": "CD-2",
            "quantity": "many",
            "month": "July 2026",
            "date": "2026-07-05T08:00:00Z",
            "history": []
        }
    ]"#;
    fs::write(dir.path().join("mixed.json"), data).expect("write");

    let report = json_output(dir.path(), "records.sqlite3", &["import", "mixed.json"]);
    assert_eq!(report["workersCreated"], 1);
    assert_eq!(report["failures"].as_array().expect("failures").len(), 1);
    assert_eq!(report["failures"][0]["index"], 1);

    let workers = json_output(dir.path(), "records.sqlite3", &["worker", "list"]);
    assert_eq!(workers.as_array().expect("array").len(), 1);
}
