//! Saving a watched file replaces the running server.

use std::time::Duration;

use crate::common::*;

#[test]
fn modifying_a_watched_file_restarts_the_server() {
    let env = TestEnv::new();
    let running = env.spawn(&["master"]);
    assert!(running.wait_for("child_started", 1, Duration::from_secs(10)));

    env.write_project_file("src/main.rs", "fn main() { println!(\"v2\"); }\n");

    assert!(
        running.wait_for("child_started", 2, Duration::from_secs(10)),
        "no restart; events: {:?}",
        running.events()
    );
    assert!(wait_until(Duration::from_secs(5), || env.starts().len() == 2));

    let (status, events) = running.interrupt();
    assert!(status.success());

    // The old server is gone before the new one is started.
    let stopped = events.iter().position(|e| e == "child_stopped").unwrap();
    let second_start = events
        .iter()
        .enumerate()
        .filter(|(_, e)| *e == "child_started")
        .nth(1)
        .map(|(i, _)| i)
        .unwrap();
    let changed = events.iter().position(|e| e == "files_changed").unwrap();
    assert!(changed < stopped);
    assert!(stopped < second_start);
}

#[test]
fn unwatched_files_do_not_restart() {
    let env = TestEnv::new();
    let running = env.spawn(&["master"]);
    assert!(running.wait_for("child_started", 1, Duration::from_secs(10)));

    env.write_project_file("notes.txt", "scratch\n");
    env.write_project_file("src/data.json", "{}\n");
    std::thread::sleep(Duration::from_millis(800));

    assert_eq!(running.count("child_started"), 1);
    assert_eq!(env.starts().len(), 1);
    let _ = running.interrupt();
}

#[test]
fn shutdown_stops_the_server() {
    let env = TestEnv::new();
    let running = env.spawn(&["master"]);
    assert!(running.wait_for("child_started", 1, Duration::from_secs(10)));

    let (status, events) = running.interrupt();
    assert!(status.success());
    let stopped = events.iter().position(|e| e == "child_stopped");
    let shutdown = events.iter().position(|e| e == "shutdown");
    assert!(stopped.is_some() && stopped < shutdown, "events: {events:?}");
}

fn assert_signal_stops_server(sig: &str) {
    let env = TestEnv::new();
    env.use_pid_server();
    let running = env.spawn(&["master"]);
    assert!(running.wait_for("child_started", 1, Duration::from_secs(10)));
    assert!(wait_until(Duration::from_secs(5), || env.server_pid().is_some()));
    let server = env.server_pid().unwrap();
    assert!(process_alive(server));

    let (status, events) = running.signal(sig);

    assert!(status.success(), "SIG{sig} exit status: {status:?}");
    assert_eq!(events.last().map(String::as_str), Some("shutdown"));
    assert!(
        wait_until(Duration::from_secs(5), || !process_alive(server)),
        "server {server} outlived SIG{sig} to the supervisor"
    );
}

#[test]
fn sigterm_stops_the_server() {
    assert_signal_stops_server("TERM");
}

#[test]
fn sighup_stops_the_server() {
    assert_signal_stops_server("HUP");
}
