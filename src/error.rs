//! Error types for redwatch
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for redwatch operations
pub type RedwatchResult<T> = Result<T, RedwatchError>;

/// Main error type for redwatch operations
#[derive(Error, Debug)]
pub enum RedwatchError {
    /// The watch set cannot be monitored. Fatal: there is nothing to supervise.
    #[error("cannot watch '{pattern}': {reason}")]
    WatchSetup { pattern: String, reason: String },

    /// The supervised command failed to launch or died while building
    #[error("failed to start '{command}': {reason}")]
    ChildStart { command: String, reason: String },

    /// The outgoing child ignored the termination request
    #[error("process {pid} did not exit: {reason}")]
    ChildTermination { pid: u32, reason: String },

    /// Configuration file could not be parsed or holds unusable values
    #[error("invalid configuration in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RedwatchError {
    /// Only watch setup failures end the process; everything else is reported
    /// and the control loop carries on.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RedwatchError::WatchSetup { .. } | RedwatchError::InvalidConfig { .. }
        )
    }

    pub(crate) fn watch_setup(pattern: impl Into<String>, reason: impl ToString) -> Self {
        RedwatchError::WatchSetup {
            pattern: pattern.into(),
            reason: reason.to_string(),
        }
    }
}
