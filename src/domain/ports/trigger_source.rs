//! TriggerSource port - where restart triggers come from

use std::time::Duration;

use crate::domain::TriggerPoll;

/// A lazy, non-restartable stream of restart triggers.
pub trait TriggerSource {
    /// Block for at most `timeout` waiting for the next trigger.
    fn poll_trigger(&mut self, timeout: Duration) -> TriggerPoll;
}
