//! Process launching implementations

mod local;

pub use local::{ProcessChild, ProcessLauncher};
