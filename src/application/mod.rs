//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (role, invocation, ports)
//! - Does NOT touch the OS directly (that is Infrastructure)
//!
//! ## Use Cases
//!
//! - `Supervisor` - Restarts the supervised server on every trigger

pub mod supervisor;

pub use supervisor::{Supervisor, SupervisorEvent, SupervisorOptions, SupervisorState};
