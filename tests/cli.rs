use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn lapse(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("lapse").unwrap();
    cmd.env("LAPSE_HOME", home.path())
        .env_remove("LAPSE_LOG")
        .env_remove("LAPSE_OUTPUT")
        .env("NO_COLOR", "1");
    cmd
}

fn log_session(home: &TempDir, start: &str, duration: &str, description: &str) -> serde_json::Value {
    let output = lapse(home)
        .args(["-o", "json", "log", "--start", start, "--duration", duration, "-d", description])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

fn history_json(home: &TempDir) -> serde_json::Value {
    let output = lapse(home)
        .args(["history", "--flat", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_empty_history() {
    let home = TempDir::new().unwrap();
    lapse(&home)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No sessions recorded yet"));
}

#[test]
fn test_log_then_history() {
    let home = TempDir::new().unwrap();
    let session = log_session(&home, "2024-03-01T09:00:00Z", "25m", "writing");
    assert_eq!(session["duration"], 1500.0);
    assert_eq!(session["startTime"], "2024-03-01T09:00:00Z");

    let history = history_json(&home);
    assert_eq!(history["count"], 1);
    assert_eq!(history["items"][0]["id"], session["id"]);

    lapse(&home)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("writing"))
        .stdout(predicate::str::contains("25m"));
}

#[test]
fn test_log_rejects_end_before_start() {
    let home = TempDir::new().unwrap();
    lapse(&home)
        .args([
            "log",
            "--start",
            "2024-03-01T10:00:00Z",
            "--end",
            "2024-03-01T09:00:00Z",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid edit"));

    assert_eq!(history_json(&home)["count"], 0);
}

#[test]
fn test_edit_by_prefix() {
    let home = TempDir::new().unwrap();
    let session = log_session(&home, "2024-03-01T09:00:00Z", "30m", "draft");
    let prefix = &session["id"].as_str().unwrap()[..8];

    lapse(&home)
        .args(["-o", "json", "edit", prefix, "--end", "2024-03-01T10:00:00Z", "--description", "final"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"final\""));

    let history = history_json(&home);
    assert_eq!(history["items"][0]["id"], session["id"]);
    assert_eq!(history["items"][0]["duration"], 3600.0);
    assert_eq!(history["items"][0]["description"], "final");
}

#[test]
fn test_edit_rejects_inverted_times() {
    let home = TempDir::new().unwrap();
    let session = log_session(&home, "2024-03-01T09:00:00Z", "30m", "draft");
    let id = session["id"].as_str().unwrap();

    lapse(&home)
        .args(["edit", id, "--end", "2024-03-01T08:00:00Z"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));

    assert_eq!(history_json(&home)["items"][0]["duration"], 1800.0);
}

#[test]
fn test_show_unknown_session_fails() {
    let home = TempDir::new().unwrap();
    lapse(&home)
        .args(["show", "0123abcd"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not found"));
}

#[test]
fn test_delete_and_clear() {
    let home = TempDir::new().unwrap();
    let first = log_session(&home, "2024-03-01T09:00:00Z", "10m", "a");
    log_session(&home, "2024-03-01T11:00:00Z", "10m", "b");
    log_session(&home, "2024-03-01T13:00:00Z", "10m", "c");

    lapse(&home)
        .args(["delete", first["id"].as_str().unwrap()])
        .assert()
        .success();
    assert_eq!(history_json(&home)["count"], 2);

    lapse(&home)
        .arg("clear")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
    assert_eq!(history_json(&home)["count"], 2);

    lapse(&home).args(["clear", "--force"]).assert().success();
    assert_eq!(history_json(&home)["count"], 0);
}

#[test]
fn test_settings_round_trip() {
    let home = TempDir::new().unwrap();
    lapse(&home).args(["settings", "audio", "ocean"]).assert().success();
    lapse(&home).args(["settings", "fadeout", "30m"]).assert().success();

    let output = lapse(&home)
        .args(["settings", "show", "-o", "json"])
        .output()
        .unwrap();
    let prefs: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(prefs["audio"], "ocean");
    assert_eq!(prefs["fadeout"], "30m");

    lapse(&home)
        .args(["settings", "audio", "thunder"])
        .assert()
        .failure();
}

#[test]
fn test_config_default_output_json() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("config.yaml"),
        "general:\n  default_output: json\nhistory:\n  default_limit: 1\n",
    )
    .unwrap();
    log_session(&home, "2024-03-01T09:00:00Z", "10m", "a");
    log_session(&home, "2024-03-01T11:00:00Z", "10m", "b");

    let output = lapse(&home).args(["history", "--flat"]).output().unwrap();
    let history: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(history["count"], 1);
    assert_eq!(history["items"][0]["description"], "b");
}

#[test]
fn test_config_path_lists_database() {
    let home = TempDir::new().unwrap();
    lapse(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lapse.db"));
}

#[test]
fn test_broken_config_is_an_error() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join("config.yaml"), "general: [not, a, map\n").unwrap();
    lapse(&home)
        .arg("history")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_completions_generate() {
    let home = TempDir::new().unwrap();
    lapse(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lapse"));
}
