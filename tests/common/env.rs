//! Test environment for driving the redwatch binary end-to-end.
//!
//! The server under supervision is a small `sh` script that appends its
//! arguments to `starts.log` and then sleeps, so every start is observable
//! from the project directory.

use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Output, Stdio};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use tempfile::TempDir;

pub const STARTS_LOG: &str = "starts.log";

/// Script run as the supervised server: `$@` holds the role flags.
pub const RECORDING_SERVER: &str = "echo \"start:$*\" >> starts.log; exec sleep 30";

pub fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_redwatch")
}

/// Script run as the supervised server: records its own pid in `child.pid`.
pub const PID_SERVER: &str = "echo $$ > child.pid; exec sleep 30";

/// Whether `pid` names a live process. Zombies count as gone.
pub fn process_alive(pid: u32) -> bool {
    match std::fs::read_to_string(format!("/proc/{pid}/stat")) {
        Ok(stat) => stat
            .rsplit(')')
            .next()
            .and_then(|rest| rest.split_whitespace().next())
            .is_some_and(|state| state != "Z" && state != "X"),
        Err(_) if std::path::Path::new("/proc/self").exists() => false,
        Err(_) => Command::new("kill")
            .args(["-0", &pid.to_string()])
            .stderr(Stdio::null())
            .status()
            .is_ok_and(|s| s.success()),
    }
}

/// Poll `cond` until it holds or `timeout` passes.
pub fn wait_until(timeout: Duration, mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        thread::sleep(Duration::from_millis(25));
    }
    cond()
}

pub struct TestEnv {
    pub project_root: TempDir,
    pub home_dir: TempDir,
}

impl TestEnv {
    /// Project with `src/main.rs` and a config running the recording server.
    pub fn new() -> Self {
        let env = Self {
            project_root: tempfile::tempdir().unwrap(),
            home_dir: tempfile::tempdir().unwrap(),
        };
        env.write_project_file("src/main.rs", "fn main() {}\n");
        env.write_config(&[
            "[server]",
            &format!(
                "command = [\"sh\", \"-c\", {:?}, \"server\"]",
                RECORDING_SERVER
            ),
            "",
            "[watch]",
            "paths = [\"src/**/*.rs\"]",
        ]);
        env
    }

    /// Replace the server with one that records its pid.
    pub fn use_pid_server(&self) {
        self.write_config(&[
            "[server]",
            &format!("command = [\"sh\", \"-c\", {:?}]", PID_SERVER),
            "",
            "[watch]",
            "paths = [\"src/**/*.rs\"]",
        ]);
    }

    /// Pid the pid server wrote, once it has started.
    pub fn server_pid(&self) -> Option<u32> {
        std::fs::read_to_string(self.project_path("child.pid"))
            .ok()
            .and_then(|s| s.trim().parse().ok())
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    pub fn write_project_file(&self, relative: &str, content: &str) {
        let full_path = self.project_path(relative);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
    }

    pub fn write_config(&self, lines: &[&str]) {
        self.write_project_file("redwatch.toml", &(lines.join("\n") + "\n"));
    }

    /// Lines the recording server appended, one per start.
    pub fn starts(&self) -> Vec<String> {
        std::fs::read_to_string(self.project_path(STARTS_LOG))
            .map(|s| s.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(bin());
        cmd.current_dir(self.project_root.path())
            .args(args)
            .env("HOME", self.home_dir.path())
            .env("XDG_CONFIG_HOME", self.home_dir.path().join(".config"))
            .env("NO_COLOR", "1")
            .env_remove("REDWATCH_COMMAND")
            .env_remove("REDWATCH_WATCH")
            .env_remove("REDWATCH_DEBOUNCE_MS")
            .env_remove("REDWATCH_STOP_TIMEOUT_MS")
            .env_remove("REDWATCH_REPLICA_PORT")
            .env_remove("REDWATCH_COLOR");
        cmd
    }

    /// Run redwatch to completion (for runs expected to end on their own).
    pub fn run_to_exit(&self, args: &[&str]) -> Output {
        self.command(args).output().expect("Failed to execute redwatch")
    }

    /// Start redwatch with `--json` and collect its events in the background.
    pub fn spawn(&self, args: &[&str]) -> Running {
        let mut full = vec!["--json"];
        full.extend_from_slice(args);
        let mut child = self
            .command(&full)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn redwatch");

        let lines = Arc::new(Mutex::new(Vec::new()));
        let stdout = child.stdout.take().expect("piped stdout");
        let sink = Arc::clone(&lines);
        thread::spawn(move || {
            for line in BufReader::new(stdout).lines().map_while(Result::ok) {
                sink.lock().unwrap().push(line);
            }
        });

        Running { child, lines }
    }
}

/// A live redwatch process.
pub struct Running {
    child: Child,
    lines: Arc<Mutex<Vec<String>>>,
}

impl Running {
    pub fn pid(&self) -> u32 {
        self.child.id()
    }

    /// NDJSON event names seen so far, in order.
    pub fn events(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .filter_map(|line| serde_json::from_str::<serde_json::Value>(line).ok())
            .filter_map(|v| v["event"].as_str().map(str::to_string))
            .collect()
    }

    pub fn raw_lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn count(&self, event: &str) -> usize {
        self.events().iter().filter(|e| *e == event).count()
    }

    pub fn wait_for(&self, event: &str, n: usize, timeout: Duration) -> bool {
        wait_until(timeout, || self.count(event) >= n)
    }

    pub fn is_alive(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(None))
    }

    /// Send SIGINT (Ctrl+C) and wait for the process to exit.
    pub fn interrupt(self) -> (ExitStatus, Vec<String>) {
        self.signal("INT")
    }

    /// Send `sig` (e.g. "TERM") and wait for the process to exit.
    pub fn signal(mut self, sig: &str) -> (ExitStatus, Vec<String>) {
        let _ = Command::new("kill")
            .args([&format!("-{sig}"), &self.pid().to_string()])
            .status();

        let mut status = None;
        wait_until(Duration::from_secs(10), || {
            status = self.child.try_wait().ok().flatten();
            status.is_some()
        });
        let status = match status {
            Some(s) => s,
            None => {
                let _ = self.child.kill();
                self.child.wait().expect("redwatch did not exit")
            }
        };
        // Let the reader thread drain the last lines.
        thread::sleep(Duration::from_millis(100));
        let events = self.events();
        (status, events)
    }
}

impl Drop for Running {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
