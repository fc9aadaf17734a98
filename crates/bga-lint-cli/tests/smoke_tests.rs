//! Smoke tests for the bgalint CLI
//!
//! Each test builds a throwaway project on disk and runs the real binary.

#![allow(deprecated)] // Allow deprecated Command::cargo_bin until assert_cmd is updated
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CLEAN_STATES: &str = r#"<?php
$machinestates = [
    1 => [
        "name" => "gameSetup",
        "type" => "manager",
        "transitions" => ["" => 10],
    ],
    10 => [
        "name" => "playerTurn",
        "type" => "activeplayer",
        "possibleactions" => ["actPlayCard"],
        "transitions" => ["next" => 99],
    ],
    99 => [
        "name" => "gameEnd",
        "type" => "manager",
    ],
];
"#;

const BROKEN_STATES: &str = r#"<?php
$machinestates = [
    1 => [
        "name" => "gameSetup",
        "type" => "manager",
        "transitions" => ["" => 10],
    ],
    10 => [
        "name" => "playerTurn",
        "type" => "activeplayer",
        "transitions" => ["next" => 42],
    ],
];
"#;

const WARNING_STATES: &str = r#"<?php
$machinestates = [
    1 => [
        "name" => "gameSetup",
        "type" => "manager",
        "transitions" => ["" => 99],
    ],
    20 => [
        "name" => "orphan",
        "type" => "game",
        "transitions" => ["done" => 99],
    ],
    99 => [
        "name" => "gameEnd",
        "type" => "manager",
    ],
];
"#;

const GAME_PHP: &str = r#"<?php
class Hearts extends Table {
    function actPlayCard($card_id) {
        $this->checkAction('actPlayCard');
    }
}
"#;

/// Get a command for the bgalint binary, isolated from the caller's environment
fn bgalint() -> Command {
    let mut cmd = Command::cargo_bin("bgalint").expect("bgalint binary should exist");
    cmd.env_remove("BGA_WORKSPACE_PATH").env_remove("RUST_LOG");
    cmd
}

fn write(root: &Path, rel: &str, text: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

fn project(states: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "states.inc.php", states);
    write(dir.path(), "hearts.game.php", GAME_PHP);
    dir
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    bgalint()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.4.0"));
}

#[test]
fn test_help_flag() {
    bgalint()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("migration-status"))
        .stdout(predicate::str::contains("games"));
}

#[test]
fn test_no_args_fails() {
    bgalint().assert().failure();
}

// ============================================================================
// Validate Tests
// ============================================================================

#[test]
fn test_validate_clean_project() {
    let dir = project(CLEAN_STATES);
    bgalint()
        .args(["validate", "--project"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("VALIDATION REPORT"))
        .stdout(predicate::str::contains("All checks passed"));
}

#[test]
fn test_validate_broken_transition_fails() {
    let dir = project(BROKEN_STATES);
    bgalint()
        .args(["validate", "--project"])
        .arg(dir.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("[STATE002]"))
        .stderr(predicate::str::contains("Error: Validation failed: 1 error(s)"));
}

#[test]
fn test_validate_json_output() {
    let dir = project(CLEAN_STATES);
    let output = bgalint()
        .args(["validate", "--format", "json", "-p"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["passed"], true);
    assert_eq!(value["state_count"], 3);
}

#[test]
fn test_validate_strict_fails_on_warnings() {
    let dir = project(WARNING_STATES);
    bgalint()
        .args(["validate", "-p"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("[STATE003]"));

    bgalint()
        .args(["validate", "--strict", "-p"])
        .arg(dir.path())
        .assert()
        .failure();
}

#[test]
fn test_validate_disabled_check() {
    let dir = project(WARNING_STATES);
    let config = dir.path().join("bgalint.yaml");
    fs::write(&config, "disabled_checks: [STATE003]\n").unwrap();
    bgalint()
        .args(["validate", "--strict", "-p"])
        .arg(dir.path())
        .arg("--config")
        .arg(&config)
        .assert()
        .success();
}

#[test]
fn test_validate_latin1_project() {
    let dir = TempDir::new().unwrap();
    let states = CLEAN_STATES.replace(
        "\"name\" => \"playerTurn\",",
        "\"name\" => \"playerTurn\",\n        \"description\" => \"Vous jouez une carte \u{0}\",",
    );
    let bytes: Vec<u8> = states.bytes().map(|b| if b == 0 { 0xE9 } else { b }).collect();
    fs::write(dir.path().join("states.inc.php"), bytes).unwrap();
    write(dir.path(), "hearts.game.php", GAME_PHP);

    bgalint()
        .args(["validate", "-p"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Scanned 3 state definition(s)"));
}

#[test]
fn test_validate_without_states_fails() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "hearts.game.php", GAME_PHP);
    bgalint()
        .args(["validate", "-p"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No state definitions found"));
}

#[test]
fn test_validate_missing_project_dir() {
    bgalint()
        .args(["validate", "-p", "/nonexistent/bgalint/project"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

// ============================================================================
// Workspace Tests
// ============================================================================

#[test]
fn test_games_lists_workspace() {
    let ws = TempDir::new().unwrap();
    write(ws.path(), "hearts/states.inc.php", CLEAN_STATES);
    write(ws.path(), "chess/chess.game.php", GAME_PHP);
    bgalint()
        .arg("games")
        .env("BGA_WORKSPACE_PATH", ws.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("chess"))
        .stdout(predicate::str::contains("hearts"))
        .stdout(predicate::str::contains("2 game(s)"));
}

#[test]
fn test_multiple_games_require_game_flag() {
    let ws = TempDir::new().unwrap();
    write(ws.path(), "hearts/states.inc.php", CLEAN_STATES);
    write(ws.path(), "chess/states.inc.php", CLEAN_STATES);
    bgalint()
        .arg("validate")
        .arg("--workspace")
        .arg(ws.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--game"));

    bgalint()
        .args(["validate", "--game", "hearts", "--workspace"])
        .arg(ws.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("VALIDATION REPORT: hearts"));
}

#[test]
fn test_no_workspace_and_no_project() {
    bgalint()
        .arg("states")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no workspace configured"));
}

// ============================================================================
// Listing Tests
// ============================================================================

#[test]
fn test_states_listing() {
    let dir = project(CLEAN_STATES);
    bgalint()
        .args(["states", "-p"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("[10] playerTurn (active player)"))
        .stdout(predicate::str::contains("3 state(s)"));
}

#[test]
fn test_actions_listing() {
    let dir = project(CLEAN_STATES);
    bgalint()
        .args(["actions", "-p"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("actPlayCard($card_id)"))
        .stdout(predicate::str::contains("[10] playerTurn: playCard"));
}

#[test]
fn test_migration_status_json() {
    let dir = project(CLEAN_STATES);
    bgalint()
        .args(["migration-status", "-f", "json", "-p"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\""));
}
