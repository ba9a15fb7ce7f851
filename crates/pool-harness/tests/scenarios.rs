use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn running_all_scenarios_succeeds() {
    Command::cargo_bin("pool-harness")
        .unwrap()
        .arg("0")
        .assert()
        .success()
        .stdout(predicate::str::contains("pool-harness"));
}

#[test]
fn running_a_single_scenario_succeeds() {
    Command::cargo_bin("pool-harness")
        .unwrap()
        .arg("1")
        .assert()
        .success();
}

#[test]
fn out_of_range_scenario_fails() {
    Command::cargo_bin("pool-harness")
        .unwrap()
        .arg("999")
        .assert()
        .failure();
}
