//! redwatch - development-loop supervisor for a replicated server
//!
//! redwatch watches the server's sources and restarts the server on every
//! change, running it either as the primary (`master`) or as a replica of a
//! configured peer.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod watcher;

// Re-exports for convenience
pub use application::{Supervisor, SupervisorEvent, SupervisorOptions, SupervisorState};
pub use config::{Config, ResolvedConfig};
pub use domain::{Invocation, Role, Trigger, TriggerPoll};
pub use error::{RedwatchError, RedwatchResult};
pub use infrastructure::ProcessLauncher;
pub use watcher::{FileWatcher, WatchSet, WatcherOptions};
