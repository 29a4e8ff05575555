//! End-to-end checks of the binary's exit-code and reporting contract.

use std::io::Write as _;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::NamedTempFile;

fn confab() -> Command {
    Command::cargo_bin("confab").expect("binary builds")
}

#[test]
fn help_prints_the_usage_table_and_exits_zero() {
    confab()
        .arg("--help")
        .assert()
        .success()
        .stderr(predicate::str::starts_with("usage:"));

    confab()
        .arg("-h")
        .assert()
        .success()
        .stderr(predicate::str::contains("--reverse-prompt"));
}

#[test]
fn unknown_argument_exits_one_with_the_usage_table() {
    confab()
        .arg("--frobnicate")
        .assert()
        .code(1)
        .stderr(
            predicate::str::contains("error: unknown argument: --frobnicate")
                .and(predicate::str::contains("usage:")),
        );
}

#[test]
fn missing_value_exits_one_and_names_the_flag() {
    confab()
        .args(["-p", "x", "--seed"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "invalid parameter for argument: --seed",
        ));
}

#[test]
fn unreadable_prompt_file_exits_one_and_names_the_path() {
    confab()
        .args(["-f", "definitely/not/here.txt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to open prompt file")
            .and(predicate::str::contains("definitely/not/here.txt")));
}

#[test]
fn resolved_run_is_reported_as_json() {
    let assert = confab()
        .args(["-p", "hello there", "-s", "42", "-b", "9999"])
        .assert()
        .success();

    let report: Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("stdout is a JSON report");
    assert_eq!(report["prompt"], "hello there");
    assert_eq!(report["seed"], 42);
    assert_eq!(report["n_batch"], 512);
}

#[test]
fn nonpositive_seed_is_replaced_from_the_clock() {
    let assert = confab().args(["-p", "x", "-s", "-5"]).assert().success();

    let report: Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("stdout is a JSON report");
    let seed = report["seed"].as_i64().expect("seed is a number");
    assert!(seed > 0, "derived seed should be positive, got {seed}");
}

#[test]
fn prompt_file_contents_reach_the_report() {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(b"from a file\n").expect("write temp file");

    let assert = confab()
        .args(["-f", file.path().to_str().expect("utf-8 path")])
        .assert()
        .success();

    let report: Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("stdout is a JSON report");
    assert_eq!(report["prompt"], "from a file");
}

#[test]
fn zero_config_run_falls_back_to_the_companion() {
    let assert = confab().env("USER", "zoe").assert().success();

    let report: Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("stdout is a JSON report");
    assert_eq!(report["interactive"], true);
    assert_eq!(report["antiprompts"][0], "zoe:");
    assert!(report["prompt"]
        .as_str()
        .expect("prompt is a string")
        .contains("zoe"));
}

#[test]
fn verbose_prompt_echo_is_colored_when_asked() {
    confab()
        .args(["-p", "shiny", "--color", "--verbose-prompt"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\x1b[33m")
                .and(predicate::str::contains("shiny"))
                .and(predicate::str::contains("\x1b[0m")),
        );
}

#[test]
fn plain_runs_emit_no_escape_sequences_on_stdout() {
    confab()
        .args(["-p", "plain", "--verbose-prompt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b").not());
}

#[test]
fn random_prompt_draws_a_starter_from_the_fixed_set() {
    let assert = confab()
        .args(["--random-prompt", "-s", "7"])
        .env("USER", "zoe")
        .assert()
        .success();

    let report: Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("stdout is a JSON report");
    let starters = [
        "So", "Once upon a time", "When", "The", "After", "If", "import", "He", "She", "They",
    ];
    let prompt = report["prompt"].as_str().expect("prompt is a string");
    assert!(starters.contains(&prompt), "unexpected starter: {prompt}");
}
