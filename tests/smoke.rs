//! Smoke tests -- verify the binary runs and key subcommands exist.

use assert_cmd::Command;

#[test]
fn test_cli_help() {
    Command::cargo_bin("eduthreat")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicates::str::contains(
            "cyber-incident intelligence in the education sector",
        ));
}

#[test]
fn test_cli_version() {
    Command::cargo_bin("eduthreat")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicates::str::contains("eduthreat"));
}

#[test]
fn test_serve_subcommand_exists() {
    Command::cargo_bin("eduthreat")
        .unwrap()
        .args(["serve", "--help"])
        .assert()
        .success();
}

#[test]
fn test_stats_subcommand_exists() {
    Command::cargo_bin("eduthreat")
        .unwrap()
        .args(["stats", "--help"])
        .assert()
        .success();
}

#[test]
fn test_incidents_subcommand_accepts_filters() {
    Command::cargo_bin("eduthreat")
        .unwrap()
        .args(["incidents", "--help"])
        .assert()
        .success()
        .stdout(predicates::str::contains("--country"))
        .stdout(predicates::str::contains("--enriched-only"))
        .stdout(predicates::str::contains("--search"));
}

#[test]
fn test_actors_subcommand_exists() {
    Command::cargo_bin("eduthreat")
        .unwrap()
        .args(["actors", "--help"])
        .assert()
        .success();
}
