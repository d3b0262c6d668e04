//! Tests for the `vwconfig` binary.

use std::process::Command;

use tempfile::TempDir;

fn vwconfig_cmd() -> (Command, TempDir) {
    // Isolate from any real user settings file.
    let home = TempDir::new().expect("Failed to create temp dir");
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_vwconfig"));
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .env_remove("VWCONFIG_LOG")
        .env_remove("RUST_LOG");
    (cmd, home)
}

#[test]
fn test_help_shows_header_option() {
    let (mut cmd, _home) = vwconfig_cmd();
    let output = cmd.arg("--help").output().expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("--header"));
    assert!(stdout.contains("--keep-interactions"));
}

#[test]
fn test_ccb_header_summary() {
    let (mut cmd, _home) = vwconfig_cmd();
    let output = cmd
        .args(["--header", "--dsjson --epsilon 0.2 --ccb_explore_adf --interactions ::"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("learner chain: slates"));
    assert!(stdout.contains("slates model: yes"));
    assert!(stdout.contains("skipped header tokens: --interactions ::"));
    assert!(stdout.contains("  --epsilon 0.2"));
}

#[test]
fn test_json_output_with_current_args() {
    let (mut cmd, _home) = vwconfig_cmd();
    let output = cmd
        .args(["--json", "--keep-interactions", "--header", "--cb_explore_adf --interactions ::"])
        .args(["--", "--epsilon", "0.3"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["learner_chain"], "contextual_bandit");
    assert_eq!(json["is_ccb_model"], false);
    assert_eq!(json["config"]["interactions"][0], "::");
    assert!((json["config"]["epsilon"].as_f64().unwrap() - 0.3).abs() < 1e-6);
}

#[test]
fn test_header_file() {
    let (mut cmd, home) = vwconfig_cmd();
    let header_path = home.path().join("header.txt");
    std::fs::write(&header_path, "--cb_explore_adf -b 22\n").unwrap();

    let output = cmd
        .arg("--header-file")
        .arg(&header_path)
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("learner chain: contextual_bandit"));
    assert!(stdout.contains("  --bit_precision 22"));
}

#[test]
fn test_unknown_option_exits_with_error() {
    let (mut cmd, _home) = vwconfig_cmd();
    let output = cmd
        .args(["--header", "--not_an_option 1"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"), "got: {}", stderr);
    assert!(stderr.contains("--not_an_option"), "got: {}", stderr);
}

#[test]
fn test_settings_file_extends_exclusion() {
    let (mut cmd, home) = vwconfig_cmd();
    let config_path = home.path().join("settings.toml");
    std::fs::write(&config_path, "[merge]\ninteraction_flags = [\"interactions\", \"q\"]\n").unwrap();

    let output = cmd
        .arg("--config")
        .arg(&config_path)
        .args(["--header", "-q ab --cb_explore_adf"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("skipped header tokens: -q ab"));
    assert!(!stdout.contains("--quadratic"));
}

#[test]
fn test_missing_config_file_is_error() {
    let (mut cmd, home) = vwconfig_cmd();
    let output = cmd
        .arg("--config")
        .arg(home.path().join("nope.toml"))
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not found"), "got: {}", stderr);
}

#[test]
fn test_unbalanced_header_quote_is_error() {
    let (mut cmd, _home) = vwconfig_cmd();
    let output = cmd
        .args(["--header", "--interactions \"ab --quiet"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid model header"), "got: {}", stderr);
    assert!(stderr.contains("unbalanced quote"), "got: {}", stderr);
}
