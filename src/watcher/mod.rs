//! File watcher that drives restarts
//!
//! - Watch set resolution (literal paths and globs, validated at startup)
//! - Debouncing (100ms)
//! - Content-hash filtering of no-op saves

mod file_watcher;
mod state;
mod watch_set;

pub use file_watcher::{FileWatcher, WatcherOptions};
pub use state::{compute_content_hash, WatcherState, DEBOUNCE_MS, STARTUP_COOLDOWN_MS};
pub use watch_set::{WatchSet, WatchTarget};
