//! A watch that cannot be established ends the run before any server starts.

use crate::common::*;

#[test]
fn missing_watch_directory_is_fatal() {
    let env = TestEnv::new();
    let output = env.run_to_exit(&["master", "--watch", "missing/**/*.rs"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing/**/*.rs"), "stderr: {stderr}");
    assert!(env.starts().is_empty());
}

#[test]
fn glob_matching_nothing_is_fatal() {
    let env = TestEnv::new();
    let output = env.run_to_exit(&["--watch", "src/**/*.go"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("matches no files"), "stderr: {stderr}");
    assert!(env.starts().is_empty());
}

#[test]
fn invalid_config_is_fatal() {
    let env = TestEnv::new();
    env.write_config(&["[server", "command = 1"]);

    let output = env.run_to_exit(&["master"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid configuration"), "stderr: {stderr}");
    assert!(env.starts().is_empty());
}
