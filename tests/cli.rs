//! CLI end-to-end tests.

use std::process::{Command, Output};

const FIXTURE: &str = "tests/fixtures/users.yaml";

fn execute_fake_data_builder(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fake-data-builder"))
        .args(args)
        .env("RUST_LOG", "fake_data_builder=debug")
        .output()
        .expect("Failed to run fake-data-builder")
}

fn assert_cli_success(output: &Output, command_desc: &str) {
    if !output.status.success() {
        panic!(
            "{} failed!\nExit code: {:?}\nStdout: {}\nStderr: {}",
            command_desc,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

fn json_lines(output: &Output) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| serde_json::from_str(line).expect("stdout line is not JSON"))
        .collect()
}

#[test]
fn test_generate_to_stdout() {
    let output = execute_fake_data_builder(&["generate", "--template", FIXTURE, "--count", "4"]);
    assert_cli_success(&output, "generate");

    let users = json_lines(&output);
    assert_eq!(users.len(), 4);
    assert_eq!(users[3]["id"], serde_json::json!(4));
}

#[test]
fn test_generate_with_override_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("admins.jsonl");
    let path_str = path.to_str().unwrap();

    let output = execute_fake_data_builder(&[
        "generate",
        "--template",
        FIXTURE,
        "--override",
        "admin",
        "--count",
        "2",
        "--seed",
        "9",
        "--output",
        path_str,
    ]);
    assert_cli_success(&output, "generate --override admin");
    assert!(output.stdout.is_empty());

    let content = std::fs::read_to_string(&path).unwrap();
    let admins: Vec<serde_json::Value> = content
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(admins.len(), 2);
    assert!(admins.iter().all(|a| a["role"] == "admin"));
}

#[test]
fn test_check_reports_overrides() {
    let output = execute_fake_data_builder(&["check", "--template", FIXTURE]);
    assert_cli_success(&output, "check");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("template: ok"));
    assert!(stdout.contains("override admin: ok"));
}

#[test]
fn test_unknown_override_fails() {
    let output = execute_fake_data_builder(&[
        "generate",
        "--template",
        FIXTURE,
        "--override",
        "nobody",
    ]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: Failed to compile override 'nobody'"));
    assert!(stderr.contains("Override not found: nobody"));
}

#[test]
fn test_missing_template_fails() {
    let output = execute_fake_data_builder(&["check", "--template", "tests/fixtures/missing.yaml"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load template file"));
}
