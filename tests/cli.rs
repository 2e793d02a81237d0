use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn natreg_compiles_demo_file() {
    let mut cmd = Command::cargo_bin("natreg").expect("binary exists");
    cmd.arg("compile").arg("demos/vowels.natreg");
    cmd.assert()
        .success()
        .stdout(predicate::eq("^(?:[aeiou])+$\n"));
}

#[test]
fn natreg_compiles_version_demo() {
    let mut cmd = Command::cargo_bin("natreg").expect("binary exists");
    cmd.arg("compile").arg("demos/version.natreg");
    cmd.assert().success().stdout(predicate::str::contains(
        r"^(?:[0-9])+\.(?:[0-9])+\.(?:[0-9])+(?:\-(?:[a-zA-Z0-9])+)?$",
    ));
}

#[test]
fn natreg_eval_snippet() {
    let mut cmd = Command::cargo_bin("natreg").expect("binary exists");
    cmd.arg("eval").arg("match between n and m([0-9], 2, 4)");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("(?:[0-9]{2,4})"));
}

#[test]
fn natreg_reports_error_kind_and_fails() {
    let mut cmd = Command::cargo_bin("natreg").expect("binary exists");
    cmd.arg("eval").arg("match nowhere");
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("[MissingReference]"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn natreg_applies_environment_file() {
    let dir = tempdir().expect("create temp dir");
    let env_path = dir.path().join("sets.env");
    fs::write(&env_path, "hex=[0-9a-f]\n").expect("write env file");
    let source_path = dir.path().join("color.natreg");
    fs::write(&source_path, "match (\"#\", exactly n(hex, 6))\n").expect("write source");

    let mut cmd = Command::cargo_bin("natreg").expect("binary exists");
    cmd.arg("compile")
        .arg(&source_path)
        .arg("--env")
        .arg(&env_path);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r"\#(?:[0-9a-f]{6})"));
}

#[test]
fn natreg_missing_target_file_fails() {
    let dir = tempdir().expect("create temp dir");
    let mut cmd = Command::cargo_bin("natreg").expect("binary exists");
    cmd.arg("compile").arg(dir.path().join("absent.natreg"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("[Io]"));
}

#[test]
fn natreg_reports_missing_environment_file_once() {
    let dir = tempdir().expect("create temp dir");
    let mut cmd = Command::cargo_bin("natreg").expect("binary exists");
    cmd.env_remove("RUST_LOG")
        .arg("eval")
        .arg("match [a]")
        .arg("--env")
        .arg(dir.path().join("absent.env"));
    cmd.assert()
        .success()
        .stdout(predicate::eq("[a]\n"))
        .stderr(predicate::str::contains("environment file does not exist").count(1));
}

#[test]
fn natreg_repl_accepts_environment_file() {
    let dir = tempdir().expect("create temp dir");
    let env_path = dir.path().join("sets.env");
    fs::write(&env_path, "hex=[0-9a-f]\n").expect("write env file");

    let mut cmd = Command::cargo_bin("natreg").expect("binary exists");
    cmd.arg("repl")
        .arg("--env")
        .arg(&env_path)
        .write_stdin("match one or more(hex)\n:quit\n");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("(?:[0-9a-f])+"));
}
