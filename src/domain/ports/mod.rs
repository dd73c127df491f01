//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod launcher;
pub mod trigger_source;

pub use launcher::{ChildExit, Launcher, RunningChild};
pub use trigger_source::TriggerSource;
