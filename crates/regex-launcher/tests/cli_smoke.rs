use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn launcher(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("regex-launcher").expect("binary exists");
    cmd.arg("--config-dir")
        .arg(config_dir.path())
        .arg("--non-interactive")
        .env_remove("REGEX_LAUNCHER_PROFILE")
        .env_remove("REGEX_LAUNCHER_BUDDY_PATH")
        .env_remove("REGEX_LAUNCHER_MAGIC_PATH")
        .env_remove("REGEX_LAUNCHER_APP_NAME")
        .env("REGEX_LAUNCHER_LOCALE", "en");
    cmd
}

#[test]
fn help_displays_usage() {
    Command::cargo_bin("regex-launcher")
        .expect("binary exists")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("buddy-sample"));
}

#[test]
fn completions_are_generated() {
    Command::cargo_bin("regex-launcher")
        .expect("binary exists")
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("regex-launcher"));
}

#[test]
fn disabled_tool_reports_and_exits_cleanly() {
    let config = tempfile::tempdir().expect("temp dir");
    launcher(&config)
        .arg("buddy")
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "RegexBuddy integration is disabled in settings.",
        ));
}

#[test]
fn spawn_failure_is_reported_with_failure_status() {
    let config = tempfile::tempdir().expect("temp dir");
    let document = config.path().join("input.txt");
    fs::write(&document, "abc123\n").expect("write document");

    let missing = config.path().join("RegexMagic2.exe");
    fs::write(&missing, "").expect("write fake executable");
    fs::write(
        config.path().join("config.toml"),
        format!(
            "[regex_magic]\nenabled = true\npath = '{}'\n",
            missing.display()
        ),
    )
    .expect("write config");

    launcher(&config)
        .args(["magic", "--file"])
        .arg(&document)
        .args(["--anchor", "1:4", "--cursor", "1:7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to launch RegexMagic"));
}

#[test]
fn reset_needs_confirmation() {
    let config = tempfile::tempdir().expect("temp dir");
    let settings = config.path().join("config.toml");
    fs::write(&settings, "[regex_buddy]\nenabled = true\n").expect("write config");

    launcher(&config).arg("reset").assert().success();

    let contents = fs::read_to_string(&settings).expect("config still present");
    assert!(contents.contains("enabled = true"));
}

#[test]
fn profiles_marks_the_current_one() {
    let config = tempfile::tempdir().expect("temp dir");
    fs::create_dir_all(config.path().join("profiles")).expect("profiles dir");
    fs::write(config.path().join("profiles/work.toml"), "").expect("profile");

    launcher(&config)
        .args(["--profile", "work", "profiles"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  default"))
        .stdout(predicate::str::contains("* work"));
}

#[test]
fn invalid_cursor_is_rejected() {
    let config = tempfile::tempdir().expect("temp dir");
    launcher(&config)
        .args(["buddy", "--file", "x.txt", "--cursor", "0:0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid position"));
}
