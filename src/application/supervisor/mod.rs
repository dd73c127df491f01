//! Supervisor Use Case
//!
//! Keeps exactly one child process alive and restarts it whenever the trigger
//! source fires:
//! - initial start (synthetic first trigger)
//! - stop-then-start on every trigger, strictly sequential
//! - failed starts and stuck children are reported, never fatal
//!
//! ## Usage
//!
//! ```ignore
//! let mut supervisor = Supervisor::new(ProcessLauncher::new(), invocation, options);
//! supervisor.run(&mut watcher, &running, |event| { ... });
//! ```

mod event;
mod use_case;


pub use event::SupervisorEvent;
pub use use_case::{Supervisor, SupervisorOptions, SupervisorState};
