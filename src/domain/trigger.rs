//! Restart triggers

use std::path::{Path, PathBuf};

/// Notification that something in the watch set changed.
///
/// The changed paths are carried for diagnostics only; the supervisor treats
/// every trigger the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trigger {
    changed: Vec<PathBuf>,
}

impl Trigger {
    pub fn new(changed: Vec<PathBuf>) -> Self {
        Self { changed }
    }

    pub fn changed(&self) -> &[PathBuf] {
        &self.changed
    }

    pub fn mentions(&self, path: &Path) -> bool {
        self.changed.iter().any(|p| p == path)
    }
}

/// Outcome of waiting a bounded amount of time for a trigger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerPoll {
    /// A change was detected (possibly several coalesced)
    Trigger(Trigger),
    /// Nothing happened within the wait slice
    Idle,
    /// The source is gone and will never produce another trigger
    Closed,
}
