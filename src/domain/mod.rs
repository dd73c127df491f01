//! Domain Layer
//!
//! Pure supervisor vocabulary without I/O dependencies.
//!
//! ## Structure
//!
//! - `role` / `invocation` - Role selection and the command line it implies
//! - `trigger` - Abstract "something changed" notification
//! - `ports/` - Interface definitions for infrastructure (process launching, trigger sources)

pub mod invocation;
pub mod ports;
pub mod role;
pub mod trigger;

pub use invocation::{Invocation, DEFAULT_REPLICA_PORT};
pub use role::{Role, DEFAULT_PRIMARY_HOST, DEFAULT_PRIMARY_PORT, PRIMARY_ARG};
pub use trigger::{Trigger, TriggerPoll};
