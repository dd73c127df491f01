//! Launcher port - start/stop capability for the supervised process
//!
//! The supervisor only ever talks to these traits, so the restart loop can be
//! exercised against an in-memory fake as well as real OS processes.

use std::fmt;
use std::io;

use serde::Serialize;

use crate::domain::Invocation;
use crate::error::RedwatchResult;

/// How a child process ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChildExit {
    /// Exit code, `None` when the process was killed by a signal
    pub code: Option<i32>,
}

impl ChildExit {
    pub fn code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn signaled() -> Self {
        Self { code: None }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::ExitStatus> for ChildExit {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

impl fmt::Display for ChildExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {}", code),
            None => write!(f, "signal"),
        }
    }
}

/// Handle to one live child process
pub trait RunningChild {
    /// OS process id
    fn id(&self) -> u32;

    /// Request termination. Does not wait for the process to exit.
    fn kill(&mut self) -> io::Result<()>;

    /// Non-blocking exit check; `Some` once the process is gone and reaped.
    fn try_wait(&mut self) -> io::Result<Option<ChildExit>>;
}

/// Starts child processes from an [`Invocation`]
///
/// Implementations:
/// - `ProcessLauncher` - real OS processes
/// - test fakes that record start/stop ordering
pub trait Launcher {
    type Child: RunningChild;

    /// Start a new child. Fails with `ChildStart` when the program cannot be spawned.
    fn launch(&mut self, invocation: &Invocation) -> RedwatchResult<Self::Child>;
}
