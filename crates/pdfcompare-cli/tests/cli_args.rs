use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("pdfcompare").unwrap()
}

#[test]
fn help_flag_prints_usage() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("PDF1"))
        .stdout(predicate::str::contains("PDF2"))
        .stdout(predicate::str::contains("--methods"))
        .stdout(predicate::str::contains("--detailed"))
        .stdout(predicate::str::contains("--json"));
}

#[test]
fn version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pdfcompare"));
}

#[test]
fn missing_files_is_a_usage_error() {
    cmd().assert().code(1).stderr(predicate::str::contains("PDF1"));
}

#[test]
fn single_file_is_a_usage_error() {
    cmd().arg("a.pdf").assert().code(1);
}

#[test]
fn unknown_method_is_rejected() {
    cmd()
        .args(["a.pdf", "b.pdf", "-m", "ocr"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("ocr"));
}

#[test]
fn methods_and_all_conflict() {
    cmd()
        .args(["a.pdf", "b.pdf", "--all", "-m", "text"])
        .assert()
        .code(1);
}
