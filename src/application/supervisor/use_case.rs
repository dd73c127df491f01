//! Restart loop

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crate::config::SupervisorConfig;
use crate::domain::ports::{ChildExit, Launcher, RunningChild, TriggerSource};
use crate::domain::{Invocation, TriggerPoll};
use crate::error::{RedwatchError, RedwatchResult};

use super::event::SupervisorEvent;

/// How often a killed child is checked for exit
const STOP_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Lifecycle of the single child slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorState {
    /// No child
    Idle,
    /// One child alive
    Running,
    /// Termination requested, waiting for exit
    Stopping,
}

/// Supervisor options
#[derive(Debug, Clone)]
pub struct SupervisorOptions {
    /// Upper bound on waiting for a killed child to go away
    pub stop_timeout: Duration,
    /// Failing exits within this window after start count as failed starts
    pub startup_grace: Duration,
    /// Wait slice handed to the trigger source; also the exit/shutdown check cadence
    pub poll_interval: Duration,
}

impl Default for SupervisorOptions {
    fn default() -> Self {
        Self::from(&SupervisorConfig::default())
    }
}

impl From<&SupervisorConfig> for SupervisorOptions {
    fn from(config: &SupervisorConfig) -> Self {
        Self {
            stop_timeout: Duration::from_millis(config.stop_timeout_ms),
            startup_grace: Duration::from_millis(config.startup_grace_ms),
            poll_interval: Duration::from_millis(50),
        }
    }
}

struct Tracked<C> {
    child: C,
    started_at: Instant,
}

/// Supervisor
///
/// Owns the only child slot and restarts the child on every trigger. A new
/// child is never launched while the previous one is still in the slot.
pub struct Supervisor<L: Launcher> {
    launcher: L,
    invocation: Invocation,
    options: SupervisorOptions,
    slot: Option<Tracked<L::Child>>,
    state: SupervisorState,
}

impl<L: Launcher> Supervisor<L> {
    pub fn new(launcher: L, invocation: Invocation, options: SupervisorOptions) -> Self {
        Self {
            launcher,
            invocation,
            options,
            slot: None,
            state: SupervisorState::Idle,
        }
    }

    pub fn state(&self) -> SupervisorState {
        self.state
    }

    pub fn invocation(&self) -> &Invocation {
        &self.invocation
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    pub fn current_pid(&self) -> Option<u32> {
        self.slot.as_ref().map(|t| t.child.id())
    }

    /// Run until `running` is cleared or the trigger source closes (blocking).
    ///
    /// Starts the child once up front, then restarts it for every trigger.
    /// The child is stopped before returning.
    pub fn run<S, F>(&mut self, source: &mut S, running: &AtomicBool, on_event: F)
    where
        S: TriggerSource,
        F: Fn(SupervisorEvent),
    {
        self.start(&on_event);

        while running.load(Ordering::SeqCst) {
            match source.poll_trigger(self.options.poll_interval) {
                TriggerPoll::Trigger(trigger) => {
                    if !trigger.changed().is_empty() {
                        on_event(SupervisorEvent::FilesChanged {
                            paths: trigger
                                .changed()
                                .iter()
                                .map(|p| p.display().to_string())
                                .collect(),
                        });
                    }
                    self.restart(&on_event);
                }
                TriggerPoll::Idle => self.observe_exit(&on_event),
                TriggerPoll::Closed => break,
            }
        }

        self.stop(&on_event);
        on_event(SupervisorEvent::Shutdown);
    }

    /// Stop the current child (waiting for it to exit), then start a new one.
    pub fn restart(&mut self, on_event: &impl Fn(SupervisorEvent)) {
        self.stop(on_event);
        self.start(on_event);
    }

    /// Start a child. A failed launch is reported and leaves the slot empty.
    pub fn start(&mut self, on_event: &impl Fn(SupervisorEvent)) {
        if self.slot.is_some() {
            self.stop(on_event);
        }

        match self.launcher.launch(&self.invocation) {
            Ok(child) => {
                on_event(SupervisorEvent::ChildStarted {
                    pid: child.id(),
                    command: self.invocation.to_string(),
                });
                self.slot = Some(Tracked {
                    child,
                    started_at: Instant::now(),
                });
                self.state = SupervisorState::Running;
            }
            Err(e) => {
                on_event(SupervisorEvent::ChildStartFailed {
                    message: e.to_string(),
                });
                self.state = SupervisorState::Idle;
            }
        }
    }

    /// Terminate the current child and wait for it to exit. No-op when idle.
    pub fn stop(&mut self, on_event: &impl Fn(SupervisorEvent)) {
        let Some(mut tracked) = self.slot.take() else {
            self.state = SupervisorState::Idle;
            return;
        };

        let pid = tracked.child.id();
        self.state = SupervisorState::Stopping;
        on_event(SupervisorEvent::ChildStopping { pid });

        match self.terminate(&mut tracked.child) {
            Ok(exit) => on_event(SupervisorEvent::ChildStopped {
                pid,
                code: exit.code,
            }),
            // Abandoned: dropping the handle kills again but never waits.
            Err(e) => on_event(SupervisorEvent::ChildTerminationFailed {
                pid,
                message: e.to_string(),
            }),
        }

        self.state = SupervisorState::Idle;
    }

    fn terminate(&self, child: &mut L::Child) -> RedwatchResult<ChildExit> {
        let pid = child.id();

        if let Ok(Some(exit)) = child.try_wait() {
            // The leader is gone but whatever it forked may still hold the port.
            let _ = child.kill();
            return Ok(exit);
        }

        if let Err(e) = child.kill() {
            // Lost a race with a natural exit
            if let Ok(Some(exit)) = child.try_wait() {
                return Ok(exit);
            }
            return Err(RedwatchError::ChildTermination {
                pid,
                reason: e.to_string(),
            });
        }

        let deadline = Instant::now() + self.options.stop_timeout;
        loop {
            match child.try_wait() {
                Ok(Some(exit)) => return Ok(exit),
                Ok(None) => {}
                Err(e) => {
                    return Err(RedwatchError::ChildTermination {
                        pid,
                        reason: e.to_string(),
                    })
                }
            }

            if Instant::now() >= deadline {
                return Err(RedwatchError::ChildTermination {
                    pid,
                    reason: format!(
                        "still running {}ms after kill",
                        self.options.stop_timeout.as_millis()
                    ),
                });
            }
            thread::sleep(STOP_POLL_INTERVAL);
        }
    }

    /// Notice a child that exited on its own. It is not restarted until the
    /// next trigger.
    fn observe_exit(&mut self, on_event: &impl Fn(SupervisorEvent)) {
        let Some(tracked) = self.slot.as_mut() else {
            return;
        };
        let Ok(Some(exit)) = tracked.child.try_wait() else {
            return;
        };

        let _ = tracked.child.kill();

        let pid = tracked.child.id();
        let during_startup = tracked.started_at.elapsed() < self.options.startup_grace;
        self.slot = None;
        self.state = SupervisorState::Idle;

        if during_startup && !exit.success() {
            let err = RedwatchError::ChildStart {
                command: self.invocation.to_string(),
                reason: format!("exited during startup with {}", exit),
            };
            on_event(SupervisorEvent::ChildStartFailed {
                message: err.to_string(),
            });
        } else {
            on_event(SupervisorEvent::ChildExited {
                pid,
                code: exit.code,
            });
        }
    }
}
