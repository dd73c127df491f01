//! The role argument decides the server's flags.

use std::time::Duration;

use crate::common::*;

#[test]
fn master_starts_server_without_extra_flags() {
    let env = TestEnv::new();
    let running = env.spawn(&["master"]);

    assert!(
        wait_until(Duration::from_secs(10), || env.starts().len() == 1),
        "server never started; events: {:?}",
        running.raw_lines()
    );
    assert_eq!(env.starts(), ["start:"]);

    let (status, events) = running.interrupt();
    assert!(status.success(), "exit status: {status:?}");
    assert_eq!(events.first().map(String::as_str), Some("watch_started"));
    assert_eq!(events.last().map(String::as_str), Some("shutdown"));
}

#[test]
fn no_argument_starts_replica_of_local_primary() {
    let env = TestEnv::new();
    let running = env.spawn(&[]);

    assert!(wait_until(Duration::from_secs(10), || env.starts().len() == 1));
    assert_eq!(env.starts(), ["start:--port 6380 --replicaof 127.0.0.1 6379"]);

    let (status, _) = running.interrupt();
    assert!(status.success());
}

#[test]
fn any_other_argument_is_a_replica() {
    let env = TestEnv::new();
    let running = env.spawn(&["primary"]);

    assert!(wait_until(Duration::from_secs(10), || env.starts().len() == 1));
    assert_eq!(env.starts(), ["start:--port 6380 --replicaof 127.0.0.1 6379"]);

    let (status, _) = running.interrupt();
    assert!(status.success());
}

#[test]
fn watch_started_event_reports_role_and_command() {
    let env = TestEnv::new();
    let running = env.spawn(&["master"]);
    assert!(running.wait_for("child_started", 1, Duration::from_secs(10)));

    let first: serde_json::Value = serde_json::from_str(&running.raw_lines()[0]).unwrap();
    assert_eq!(first["event"], "watch_started");
    assert_eq!(first["role"], "master");
    assert_eq!(first["watching"][0], "src/**/*.rs");

    let _ = running.interrupt();
}
