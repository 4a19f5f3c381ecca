//! Fail-fast extraction terminates the process, so each scenario re-runs this
//! test binary as a child with an environment variable selecting the branch
//! that actually exits.

use sovran_optional::{check_exit, line_info, Optional, ABSENT_VALUE_MESSAGE, EXIT_FAILURE};
use std::env;
use std::process::{Command, Output};

const CHILD_VAR: &str = "SOVRAN_OPTIONAL_DEATH_TEST";

fn in_child() -> bool {
    env::var_os(CHILD_VAR).is_some()
}

fn run_child(test_name: &str) -> Output {
    let exe = env::current_exe().expect("test binary path");
    Command::new(exe)
        .args(["--exact", test_name, "--nocapture", "--test-threads=1"])
        .env(CHILD_VAR, "1")
        .output()
        .expect("spawn child test process")
}

#[test]
fn test_value_or_exit_terminates_on_empty() {
    if in_child() {
        let missing: Optional<i32> = Optional::empty();
        let value = missing.value_or_exit(line_info!());
        println!("unreachable: {}", value);
        return;
    }

    let output = run_child("test_value_or_exit_terminates_on_empty");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(EXIT_FAILURE), "stderr: {}", stderr);
    assert!(stderr.contains(ABSENT_VALUE_MESSAGE), "stderr: {}", stderr);
    assert!(stderr.contains("exit_tests.rs("), "stderr: {}", stderr);
    assert!(!String::from_utf8_lossy(&output.stdout).contains("unreachable"));
}

#[test]
fn test_consuming_exit_terminates_on_empty() {
    if in_child() {
        let missing: Optional<String> = Optional::empty();
        let value = missing.into_value_or_exit(line_info!());
        println!("unreachable: {}", value);
        return;
    }

    let output = run_child("test_consuming_exit_terminates_on_empty");
    assert_eq!(output.status.code(), Some(EXIT_FAILURE));
    assert!(String::from_utf8_lossy(&output.stderr).contains(ABSENT_VALUE_MESSAGE));
}

#[test]
fn test_check_exit_reports_location() {
    if in_child() {
        check_exit(line_info!(), true, "never printed");
        check_exit(line_info!(), false, "triplet file is missing");
        println!("unreachable");
        return;
    }

    let output = run_child("test_check_exit_reports_location");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(EXIT_FAILURE));
    assert!(stderr.contains("error: triplet file is missing"), "stderr: {}", stderr);
    assert!(!stderr.contains("never printed"));
}

#[test]
fn test_value_or_exit_on_present_returns() {
    let present = Optional::new(17u16);
    assert_eq!(*present.value_or_exit(line_info!()), 17);
}
