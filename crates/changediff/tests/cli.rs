//! End-to-end tests for the changediff binary, covering the stream split:
//! stdout carries the generated document and nothing else, logs and errors
//! go to stderr.

use assert_cmd::cargo;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

use changediff_dom::Reader;

const PREVIOUS: &str = r#"<databaseChangeLog>
    <createTable tableName="users">
        <column name="id" type="int"/>
    </createTable>
</databaseChangeLog>"#;

const CURRENT: &str = r#"<databaseChangeLog>
    <createTable tableName="users">
        <column name="id" type="int"/>
        <column name="email" type="varchar(255)"/>
    </createTable>
    <createTable tableName="orders">
        <column name="id" type="int"/>
    </createTable>
</databaseChangeLog>"#;

fn changediff_cli() -> Command {
    Command::new(cargo::cargo_bin!("changediff"))
}

/// Writes the two changelog fixtures and returns their paths plus a counter
/// file path inside the same directory.
fn fixtures(dir: &Path) -> (PathBuf, PathBuf, PathBuf) {
    let previous = dir.join("previous.xml");
    let current = dir.join("current.xml");
    std::fs::write(&previous, PREVIOUS).unwrap();
    std::fs::write(&current, CURRENT).unwrap();
    (previous, current, dir.join("changediff.counter"))
}

#[test]
fn test_stdout_is_exactly_the_document() {
    let temp = TempDir::new().unwrap();
    let (previous, current, counter) = fixtures(temp.path());

    let assert = changediff_cli()
        .arg(&previous)
        .arg(&current)
        .arg("--counter-file")
        .arg(&counter)
        .assert()
        .success()
        .stderr(predicate::str::contains("Assembled migration changelog"));

    // Piping stdout to a file must yield a parsable document: no log lines,
    // no escape sequences, nothing before the declaration.
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));

    let migration = Reader::new(&stdout).read_document().unwrap();
    assert_eq!(migration.name, "databaseChangeLog");
    let ids: Vec<_> = migration
        .child_elements()
        .map(|change_set| change_set.attribute("id").unwrap())
        .collect();
    assert_eq!(ids, ["create-table-orders-1", "add-column-users-2"]);
}

#[test]
fn test_verbose_logs_stay_off_stdout() {
    let temp = TempDir::new().unwrap();
    let (previous, current, counter) = fixtures(temp.path());

    let assert = changediff_cli()
        .arg(&previous)
        .arg(&current)
        .arg("--counter-file")
        .arg(&counter)
        .arg("--verbose")
        .assert()
        .success()
        .stderr(predicate::str::contains("Emitting changeset"));

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(Reader::new(&stdout).read_document().is_ok());
}

#[test]
fn test_output_flag_writes_the_file_and_nothing_to_stdout() {
    let temp = TempDir::new().unwrap();
    let (previous, current, counter) = fixtures(temp.path());
    let output = temp.path().join("migration.xml");

    changediff_cli()
        .arg(&previous)
        .arg(&current)
        .arg("--counter-file")
        .arg(&counter)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = std::fs::read_to_string(&output).unwrap();
    let migration = Reader::new(&written).read_document().unwrap();
    assert_eq!(migration.child_elements().count(), 2);
}

#[test]
fn test_failed_run_emits_no_document() {
    let temp = TempDir::new().unwrap();
    let (_, current, counter) = fixtures(temp.path());

    changediff_cli()
        .arg(temp.path().join("no-such-file.xml"))
        .arg(&current)
        .arg("--counter-file")
        .arg(&counter)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Failed to read changelog"));
}
