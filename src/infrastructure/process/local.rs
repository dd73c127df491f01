//! Local OS process launcher

use std::io;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

use crate::domain::ports::{ChildExit, Launcher, RunningChild};
use crate::domain::Invocation;
use crate::error::{RedwatchError, RedwatchResult};

/// Starts the invocation as a real child process.
///
/// stdout/stderr are inherited so build errors and server logs reach the
/// operator directly; the environment is passed through untouched.
#[derive(Debug, Clone, Default)]
pub struct ProcessLauncher {
    working_dir: Option<PathBuf>,
}

impl ProcessLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
}

impl Launcher for ProcessLauncher {
    type Child = ProcessChild;

    fn launch(&mut self, invocation: &Invocation) -> RedwatchResult<ProcessChild> {
        let mut cmd = Command::new(invocation.program());
        cmd.args(invocation.args()).stdin(Stdio::null());

        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        // Own process group: `cargo run` forks the actual server, and both
        // must go down together or the port stays bound.
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }

        let child = cmd.spawn().map_err(|e| RedwatchError::ChildStart {
            command: invocation.to_string(),
            reason: match e.kind() {
                io::ErrorKind::NotFound => format!("{}: command not found", invocation.program()),
                io::ErrorKind::PermissionDenied => {
                    format!("{}: permission denied", invocation.program())
                }
                _ => e.to_string(),
            },
        })?;

        Ok(ProcessChild { child })
    }
}

/// A spawned child process. Killed on drop if still running.
///
/// Drop never blocks: a child that survives the kill is left unreaped.
#[derive(Debug)]
pub struct ProcessChild {
    child: Child,
}

impl RunningChild for ProcessChild {
    fn id(&self) -> u32 {
        self.child.id()
    }

    fn kill(&mut self) -> io::Result<()> {
        kill_process_tree(&mut self.child)
    }

    fn try_wait(&mut self) -> io::Result<Option<ChildExit>> {
        Ok(self.child.try_wait()?.map(ChildExit::from))
    }
}

impl Drop for ProcessChild {
    fn drop(&mut self) {
        if let Ok(None) = self.child.try_wait() {
            let _ = kill_process_tree(&mut self.child);
            let _ = self.child.try_wait();
        }
    }
}

#[cfg(unix)]
fn kill_process_tree(child: &mut Child) -> io::Result<()> {
    // Group leader, so the group id is the pid.
    let group = format!("-{}", child.id());
    let status = Command::new("kill")
        .args(["-KILL", "--", &group])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match status {
        Ok(status) if status.success() => Ok(()),
        _ => child.kill(),
    }
}

#[cfg(not(unix))]
fn kill_process_tree(child: &mut Child) -> io::Result<()> {
    child.kill()
}
