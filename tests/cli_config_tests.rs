//! End-to-end tests for `lazycount config` commands.

use std::fs;

mod fixtures;
use fixtures::*;

// ============================================================================
// Show Command Tests
// ============================================================================

#[test]
fn test_config_show_defaults() {
    let output = run(&["config", "show"]);
    assert_exit(&output, 0);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Narration:"), "stdout: {stdout}");
    assert!(stdout.contains("Speech command: (none)"));
    assert!(stdout.contains("Theme: auto"));
}

#[test]
fn test_config_show_json_schema() {
    let output = run(&["config", "show", "--json"]);
    assert_exit(&output, 0);

    let json = stdout_json(&output);
    assert!(json["narration"].is_object());
    assert!(json["layout"].is_object());
    assert!(json["ui"].is_object());

    assert_eq!(json["narration"]["enabled"], true);
    assert!((json["narration"]["rate"].as_f64().unwrap() - 0.8).abs() < 1e-6);
    assert!((json["narration"]["pitch"].as_f64().unwrap() - 1.1).abs() < 1e-6);
    assert!(json["narration"].get("speech_command").is_none());

    assert_eq!(json["layout"]["line_x0"], 80.0);
    assert_eq!(json["layout"]["circle_cx"], 240.0);
    assert_eq!(json["ui"]["theme"], "auto");
}

#[test]
fn test_config_show_invalid_file() {
    let config = IsolatedConfig::with_config("[narration]\nrate = 99.0\n");
    let output = config.run(&["config", "show"]);
    assert_exit(&output, 1);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("rate"), "stderr: {stderr}");
}

// ============================================================================
// Set Command Tests
// ============================================================================

#[test]
fn test_config_set_persists() {
    let config = IsolatedConfig::new();

    let output = config.run(&[
        "config",
        "set",
        "--rate",
        "1.5",
        "--pitch",
        "0.9",
        "--narration",
        "off",
        "--theme",
        "dark",
    ]);
    assert_exit(&output, 0);
    assert!(config.config_file().exists());

    let output = config.run(&["config", "show", "--json"]);
    assert_exit(&output, 0);
    let json = stdout_json(&output);
    assert_eq!(json["narration"]["enabled"], false);
    assert!((json["narration"]["rate"].as_f64().unwrap() - 1.5).abs() < 1e-6);
    assert!((json["narration"]["pitch"].as_f64().unwrap() - 0.9).abs() < 1e-6);
    assert_eq!(json["ui"]["theme"], "dark");
}

#[test]
fn test_config_set_speech_command_and_clear() {
    let config = IsolatedConfig::new();

    let output = config.run(&[
        "config",
        "set",
        "--speech-command",
        "espeak-ng -s {wpm} -p {pitch}",
    ]);
    assert_exit(&output, 0);

    let saved = fs::read_to_string(config.config_file()).unwrap();
    assert!(saved.contains("espeak-ng"), "saved: {saved}");

    let output = config.run(&["config", "set", "--speech-command", ""]);
    assert_exit(&output, 0);

    let json = stdout_json(&config.run(&["config", "show", "--json"]));
    assert!(json["narration"].get("speech_command").is_none());
}

#[test]
fn test_config_set_keeps_other_values() {
    let config = IsolatedConfig::with_config("[layout]\nline_x0 = 10.0\n");

    let output = config.run(&["config", "set", "--rate", "2.0"]);
    assert_exit(&output, 0);

    let json = stdout_json(&config.run(&["config", "show", "--json"]));
    assert_eq!(json["layout"]["line_x0"], 10.0);
}

#[test]
fn test_config_set_requires_an_option() {
    let output = run(&["config", "set"]);
    assert_exit(&output, 1);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("At least one configuration option"), "stderr: {stderr}");
}

#[test]
fn test_config_set_rejects_out_of_range_rate() {
    let config = IsolatedConfig::new();
    let output = config.run(&["config", "set", "--rate", "50"]);
    assert_exit(&output, 1);
    assert!(!config.config_file().exists());
}

#[test]
fn test_config_set_rejects_unknown_theme() {
    let output = run(&["config", "set", "--theme", "purple"]);
    assert_exit(&output, 1);
}
