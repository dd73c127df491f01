//! Supervisor event types for NDJSON and human output

use serde::Serialize;

/// Everything the supervisor reports while running.
///
/// Errors that the loop absorbs (failed starts, stuck children) are events
/// too; only watch setup failures surface as `Err`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SupervisorEvent {
    WatchStarted {
        role: String,
        command: String,
        watching: Vec<String>,
    },
    FilesChanged {
        paths: Vec<String>,
    },
    ChildStarted {
        pid: u32,
        command: String,
    },
    ChildStopping {
        pid: u32,
    },
    ChildStopped {
        pid: u32,
        code: Option<i32>,
    },
    /// The child ended on its own while running
    ChildExited {
        pid: u32,
        code: Option<i32>,
    },
    ChildStartFailed {
        message: String,
    },
    ChildTerminationFailed {
        pid: u32,
        message: String,
    },
    Shutdown,
}

impl SupervisorEvent {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self,
            SupervisorEvent::ChildStartFailed { .. } | SupervisorEvent::ChildTerminationFailed { .. }
        )
    }
}
