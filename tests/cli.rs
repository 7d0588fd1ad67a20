//! Exit-code checks for the `delayed-backend` binary.

use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_delayed-backend"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run delayed-backend")
}

#[test]
fn test_non_numeric_port_fails() {
    let output = run(&["not-a-port"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid port"), "stderr: {stderr}");
    assert!(!stderr.contains("listening"), "stderr: {stderr}");
}

#[test]
fn test_port_out_of_range_fails() {
    assert_eq!(run(&["70000"]).status.code(), Some(1));
    assert_eq!(run(&["0"]).status.code(), Some(1));
}

#[test]
fn test_invalid_delay_fails() {
    assert_eq!(run(&["8080", "soon"]).status.code(), Some(1));
    assert_eq!(run(&["8080", "-2"]).status.code(), Some(1));
}

#[test]
fn test_missing_port_is_a_usage_error() {
    let output = run(&[]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("<PORT>"));
}

#[test]
fn test_help_succeeds() {
    let output = run(&["--help"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("[DELAY]"));
}

#[test]
fn test_bind_failure_fails() {
    let occupied = std::net::TcpListener::bind("0.0.0.0:0").unwrap();
    let port = occupied.local_addr().unwrap().port().to_string();

    let output = run(&[&port]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to bind"));
}
