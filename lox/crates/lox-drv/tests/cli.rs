//! End-to-end CLI tests driving the `lox` binary: each test spawns the
//! real binary against a temp fixture file and asserts on stdout,
//! stderr, and exit code.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn lox_bin() -> Command {
    Command::cargo_bin("lox").expect("lox binary should build")
}

fn fixture(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create fixture file");
    write!(file, "{contents}").expect("failed to write fixture contents");
    file
}

#[test]
fn help_flag_succeeds_and_mentions_usage() {
    lox_bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn version_flag_succeeds() {
    lox_bin().arg("--version").assert().success();
}

#[test]
fn unknown_subcommand_exits_64() {
    lox_bin().arg("bogus").arg("main.lox").assert().code(64);
}

#[test]
fn run_a_well_formed_program_prints_output_and_exits_0() {
    let file = fixture("print 1 + 2;");
    lox_bin()
        .arg("run")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::eq("3\n"));
}

#[test]
fn run_with_a_parse_error_exits_65() {
    let file = fixture("print 1 +;");
    lox_bin().arg("run").arg(file.path()).assert().code(65);
}

#[test]
fn run_with_a_runtime_error_exits_70() {
    let file = fixture(r#"print "a" + 1;"#);
    lox_bin()
        .arg("run")
        .arg(file.path())
        .assert()
        .code(70)
        .stderr(predicate::str::contains("Operands must be two numbers or two strings."));
}

#[test]
fn run_with_a_missing_file_exits_1() {
    lox_bin()
        .arg("run")
        .arg("/nonexistent/path/does-not-exist.lox")
        .assert()
        .code(1);
}

#[test]
fn tokenize_prints_one_token_per_line() {
    let file = fixture("var x = 1;");
    lox_bin()
        .arg("tokenize")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("VAR var null"))
        .stdout(predicate::str::contains("NUMBER 1 1.0"))
        .stdout(predicate::str::contains("EOF"));
}

#[test]
fn parse_prints_the_parenthesized_ast() {
    let file = fixture("1 + 2 * 3");
    lox_bin()
        .arg("parse")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::eq("(+ 1.0 (* 2.0 3.0))\n"));
}

#[test]
fn evaluate_prints_the_expression_value() {
    let file = fixture("1 + 2 * 3");
    lox_bin()
        .arg("evaluate")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::eq("7\n"));
}

#[test]
fn for_loop_program_prints_each_iteration() {
    let file = fixture("for (var i = 0; i < 3; i = i + 1) print i;");
    lox_bin()
        .arg("run")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::eq("0\n1\n2\n"));
}

#[test]
fn closures_capture_the_live_environment() {
    let file = fixture(
        "fun c() { var i = 0; fun inc() { i = i + 1; return i; } return inc; } \
         var f = c(); print f(); print f(); print f();",
    );
    lox_bin()
        .arg("run")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::eq("1\n2\n3\n"));
}
