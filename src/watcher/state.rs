//! Debounce state

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use sha2::{Digest, Sha256};

/// Debounce duration in milliseconds
pub const DEBOUNCE_MS: u64 = 100;

/// Events arriving right after registration are drained for this long
pub const STARTUP_COOLDOWN_MS: u64 = 500;

/// Watcher state for debouncing
#[derive(Debug, Default)]
pub struct WatcherState {
    pending_changes: HashSet<PathBuf>,
    last_change: Option<Instant>,
}

impl WatcherState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_change(&mut self, path: PathBuf) {
        self.pending_changes.insert(path);
        self.last_change = Some(Instant::now());
    }

    pub fn has_pending(&self) -> bool {
        !self.pending_changes.is_empty()
    }

    /// True once changes are pending and the tree has been quiet for `debounce`
    pub fn should_fire(&self, debounce: Duration) -> bool {
        match self.last_change {
            Some(last) => self.has_pending() && last.elapsed() >= debounce,
            None => false,
        }
    }

    /// Drain pending changes, sorted for stable output
    pub fn take_changes(&mut self) -> Vec<PathBuf> {
        let mut changes: Vec<_> = self.pending_changes.drain().collect();
        changes.sort();
        self.last_change = None;
        changes
    }
}

/// SHA-256 of file content, hex encoded
pub fn compute_content_hash(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{:x}", hasher.finalize())
}
