//! Integration tests for the spendscan CLI (offline commands only).

use assert_cmd::Command;
use predicates::prelude::*;

fn spendscan() -> Command {
    Command::cargo_bin("spendscan").unwrap()
}

#[test]
fn parse_extracts_fields_from_ocr_text() {
    let dir = tempfile::tempdir().unwrap();
    let ocr = dir.path().join("receipt.txt");
    std::fs::write(
        &ocr,
        "GREEN GROCER\n14/03/25 11:02\nApples 2.40\nTOTAL €12.34\n",
    )
    .unwrap();

    spendscan()
        .args(["parse", "--today", "2025-06-01"])
        .arg(&ocr)
        .assert()
        .success()
        .stdout(predicate::str::contains("GREEN GROCER"))
        .stdout(predicate::str::contains("12.34"))
        .stdout(predicate::str::contains("2025-03-14"));
}

#[test]
fn parse_json_output_defaults_missing_date() {
    let dir = tempfile::tempdir().unwrap();
    let ocr = dir.path().join("receipt.txt");
    std::fs::write(&ocr, "CORNER SHOP\nTOTAL €5.00\n").unwrap();

    spendscan()
        .args(["parse", "--json", "--today", "2025-06-01"])
        .arg(&ocr)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"2025-06-01\""))
        .stdout(predicate::str::contains("\"5.00\""));
}

#[test]
fn parse_missing_file_fails() {
    spendscan()
        .args(["parse", "/nonexistent/receipt.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn report_groups_by_month_newest_first() {
    let dir = tempfile::tempdir().unwrap();
    let expenses = dir.path().join("expenses.json");
    std::fs::write(
        &expenses,
        r#"[
            {"id": 1, "description": "Groceries", "amount": "10", "date": "2025-03-20"},
            {"id": 2, "description": "Coffee", "amount": "5", "date": "2025-03-05"},
            {"id": 3, "description": "Lunch", "amount": "20", "date": "2025-04-01"}
        ]"#,
    )
    .unwrap();

    let assert = spendscan().arg("report").arg(&expenses).assert().success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    let april = output.find("Apr 2025").expect("April section missing");
    let march = output.find("Mar 2025").expect("March section missing");
    assert!(april < march, "sections must be newest month first");
    assert!(output.contains("Grand total:"));
    assert!(output.contains("35"));
}

#[test]
fn scan_requires_existing_input() {
    spendscan()
        .args(["scan", "--api-key", "test-key", "/nonexistent/receipt.jpg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}
