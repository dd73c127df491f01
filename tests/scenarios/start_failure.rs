//! A server that cannot start is reported and the supervisor keeps watching.

use std::time::Duration;

use crate::common::*;

#[test]
fn nonexistent_command_is_reported_and_loop_continues() {
    let env = TestEnv::new();
    env.write_config(&[
        "[server]",
        "command = [\"redwatch-test-no-such-server\"]",
        "",
        "[watch]",
        "paths = [\"src/**/*.rs\"]",
    ]);

    let mut running = env.spawn(&["master"]);
    assert!(
        running.wait_for("child_start_failed", 1, Duration::from_secs(10)),
        "events: {:?}",
        running.raw_lines()
    );
    std::thread::sleep(Duration::from_millis(300));
    assert!(running.is_alive());

    // Every change retries the start.
    env.write_project_file("src/main.rs", "fn main() { todo!() }\n");
    assert!(running.wait_for("child_start_failed", 2, Duration::from_secs(10)));
    assert!(running.is_alive());

    let line = running
        .raw_lines()
        .into_iter()
        .find(|l| l.contains("child_start_failed"))
        .unwrap();
    assert!(line.contains("redwatch-test-no-such-server"), "{line}");

    let (status, events) = running.interrupt();
    assert!(status.success());
    assert_eq!(events.iter().filter(|e| *e == "child_started").count(), 0);
}
