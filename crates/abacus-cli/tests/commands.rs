//! Command behavior against a real progress file.

use std::fs;

use abacus_cli::cli::{NextArgs, OperationArg, RecordArgs, SelectArgs};
use abacus_cli::commands::{SelectOutcome, Session, run_levels, run_next, run_record, run_select};
use abacus_cli::summary::{
    format_next, format_record_report, format_select_outcome, levels_table, summary_table,
};
use abacus_model::Operation;
use insta::{assert_json_snapshot, assert_snapshot};
use tempfile::tempdir;

fn record(level: &str, correct: bool, count: u32) -> RecordArgs {
    RecordArgs {
        level: level.to_string(),
        correct,
        incorrect: !correct,
        count,
    }
}

fn select(level: &str) -> SelectArgs {
    SelectArgs {
        level: level.to_string(),
    }
}

#[test]
fn mastering_the_first_level_reports_the_unlock() {
    let dir = tempdir().unwrap();
    let mut session = Session::open(&dir.path().join("progress.json"), None).unwrap();

    let report = run_record(&mut session, &record("addition/none/single", true, 10)).unwrap();
    assert_snapshot!(format_record_report(&report), @r"
    Recorded 10 answers for Addition · No Complement · 1 Digit (addition/none/single)
    Score: 10/10 correct (100%)
    Level mastered!
    Unlocked: addition/none/double
    ");

    let summary = session.store().summary();
    let addition = summary.operation_progress(Operation::Addition);
    assert_eq!((addition.completed, addition.total), (1, 25));
}

#[test]
fn wrong_answers_report_what_is_still_needed() {
    let dir = tempdir().unwrap();
    let mut session = Session::open(&dir.path().join("progress.json"), None).unwrap();

    let report = run_record(&mut session, &record("subtraction/none/single", false, 3)).unwrap();
    assert_snapshot!(format_record_report(&report), @r"
    Recorded 3 answers for Subtraction · No Complement · 1 Digit (subtraction/none/single)
    Score: 0/3 correct (0%)
    12 more correct answers to master this level.
    ");
}

#[test]
fn loose_level_spelling_is_accepted() {
    let dir = tempdir().unwrap();
    let mut session = Session::open(&dir.path().join("progress.json"), None).unwrap();

    let report = run_record(&mut session, &record("Mixed/None/1", true, 1)).unwrap();
    assert_eq!(report.level.as_str(), "mixed/none/single");
    assert_snapshot!(format_record_report(&report), @r"
    Recorded 1 answer for Mixed Operations · No Complement · 1 Digit (mixed/none/single)
    Score: 1/1 correct (100%)
    9 more correct answers to master this level.
    ");
}

#[test]
fn selecting_a_locked_level_names_its_prerequisite() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("progress.json");
    let mut session = Session::open(&path, None).unwrap();

    let outcome = run_select(&mut session, &select("subtraction/small-friend/single")).unwrap();
    assert!(matches!(outcome, SelectOutcome::Locked { .. }));
    assert_snapshot!(
        format_select_outcome(&outcome),
        @"Subtraction · Small Friend · 1 Digit (subtraction/small-friend/single) is locked. Master subtraction/none/five first."
    );
    assert!(!path.exists(), "a refused selection is not saved");

    let outcome = run_select(&mut session, &select("subtraction/none/single")).unwrap();
    assert_snapshot!(
        format_select_outcome(&outcome),
        @"Now practising Subtraction · No Complement · 1 Digit (subtraction/none/single)"
    );
    let reopened = Session::open(&path, None).unwrap();
    assert_eq!(
        reopened.store().current_level().map(|id| id.as_str()),
        Some("subtraction/none/single")
    );
}

#[test]
fn next_follows_the_chain() {
    let dir = tempdir().unwrap();
    let mut session = Session::open(&dir.path().join("progress.json"), None).unwrap();
    assert_snapshot!(format_next(&run_next(&session, &NextArgs { operation: None })), @r"
    Addition: addition/none/single (Addition · No Complement · 1 Digit), 0/0 correct
    Subtraction: subtraction/none/single (Subtraction · No Complement · 1 Digit), 0/0 correct
    Mixed Operations: mixed/none/single (Mixed Operations · No Complement · 1 Digit), 0/0 correct
    ");

    run_record(&mut session, &record("addition/none/single", true, 10)).unwrap();
    run_record(&mut session, &record("addition/none/double", true, 2)).unwrap();
    let next = run_next(
        &session,
        &NextArgs {
            operation: Some(OperationArg::Addition),
        },
    );
    assert_snapshot!(
        format_next(&next),
        @"Addition: addition/none/double (Addition · No Complement · 2 Digits), 2/2 correct"
    );
}

#[test]
fn levels_can_be_filtered_by_operation() {
    let dir = tempdir().unwrap();
    let mut session = Session::open(&dir.path().join("progress.json"), None).unwrap();
    run_record(&mut session, &record("mixed/none/single", true, 4)).unwrap();

    assert_eq!(run_levels(&session, None).len(), 75);
    let mixed = run_levels(&session, Some(Operation::Mixed));
    assert_eq!(mixed.len(), 25);
    assert!(mixed.iter().all(|view| view.operation == Operation::Mixed));

    let table = levels_table(&mixed).to_string();
    assert!(table.contains("mixed/none/single"));
    assert!(table.contains("100%"));
    assert!(table.contains("open"));
    assert!(table.contains("locked"));
    assert!(!table.contains("addition/"));
}

#[test]
fn summary_lists_every_section() {
    let dir = tempdir().unwrap();
    let session = Session::open(&dir.path().join("progress.json"), None).unwrap();
    let table = summary_table(&session.store().summary()).to_string();
    assert!(table.contains("Mixed Complements"));
    assert!(table.contains("All sections"));
    assert_eq!(table.matches("0/5").count(), 15);
    assert_eq!(table.matches("0/25").count(), 3);
}

#[test]
fn config_file_changes_the_threshold() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("curriculum.toml");
    fs::write(&config, "[mastery]\nmin_attempts = 3\nmastery_ratio = 1.0\n").unwrap();
    let mut session = Session::open(&dir.path().join("progress.json"), Some(&config)).unwrap();

    let report = run_record(&mut session, &record("addition/none/single", true, 3)).unwrap();
    assert!(report.newly_completed);

    let report = run_record(&mut session, &record("addition/none/double", false, 1)).unwrap();
    assert_snapshot!(format_record_report(&report), @r"
    Recorded 1 answer for Addition · No Complement · 2 Digits (addition/none/double)
    Score: 0/1 correct (0%)
    This level can no longer reach the mastery ratio.
    ");
}

#[test]
fn corrupt_progress_file_is_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("progress.json");
    fs::write(&path, "not json").unwrap();

    let error = Session::open(&path, None).err().unwrap();
    let message = error.to_string();
    assert!(message.contains("could not be read"), "{message}");
}

#[test]
fn level_rows_serialize_for_machine_readers() {
    let dir = tempdir().unwrap();
    let mut session = Session::open(&dir.path().join("progress.json"), None).unwrap();
    run_select(&mut session, &select("mixed/none/single")).unwrap();
    run_record(&mut session, &record("mixed/none/single", true, 3)).unwrap();
    run_record(&mut session, &record("mixed/none/single", false, 1)).unwrap();

    let views = run_levels(&session, Some(Operation::Mixed));
    assert_json_snapshot!(views[0], @r#"
    {
      "id": "mixed/none/single",
      "operation": "mixed",
      "complement": "none",
      "digits": "single",
      "title": "Mixed Operations · No Complement · 1 Digit",
      "questions_completed": 4,
      "correct_answers": 3,
      "accuracy": 0.75,
      "unlocked": true,
      "completed": false,
      "current": true
    }
    "#);
}
