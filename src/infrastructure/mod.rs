//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all OS interaction.
//!
//! ## Structure
//!
//! - `process/` - Launcher for real child processes
//!
//! The file watcher lives in the top-level `watcher` module.

pub mod process;

pub use process::{ProcessChild, ProcessLauncher};
