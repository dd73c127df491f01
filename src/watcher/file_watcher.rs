//! notify-backed trigger source

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::domain::ports::TriggerSource;
use crate::domain::{Trigger, TriggerPoll};
use crate::error::{RedwatchError, RedwatchResult};

use super::state::{compute_content_hash, WatcherState, DEBOUNCE_MS, STARTUP_COOLDOWN_MS};
use super::watch_set::WatchSet;

/// Watcher options
#[derive(Debug, Clone)]
pub struct WatcherOptions {
    /// Quiet period that turns a burst of events into one trigger
    pub debounce: Duration,
    /// Drop events for files whose content hash did not change
    pub ignore_unchanged: bool,
    /// Startup window during which raw events are discarded
    pub cooldown: Duration,
}

impl Default for WatcherOptions {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEBOUNCE_MS),
            ignore_unchanged: true,
            cooldown: Duration::from_millis(STARTUP_COOLDOWN_MS),
        }
    }
}

/// Live file watcher over a [`WatchSet`].
///
/// Raw notify events are funneled through a channel; [`TriggerSource::poll_trigger`]
/// folds them into debounced triggers.
pub struct FileWatcher {
    watch_set: WatchSet,
    options: WatcherOptions,
    rx: Receiver<notify::Result<Event>>,
    state: WatcherState,
    content_hashes: HashMap<PathBuf, String>,
    // Dropping the watcher stops event delivery.
    _watcher: RecommendedWatcher,
}

impl FileWatcher {
    /// Register every target of `watch_set` with the OS and settle.
    pub fn start(watch_set: WatchSet, options: WatcherOptions) -> RedwatchResult<Self> {
        let (tx, rx) = channel();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| {
                let _ = tx.send(res);
            },
            Config::default(),
        )
        .map_err(|e| RedwatchError::watch_setup(watch_set.to_string(), e))?;

        for target in watch_set.targets() {
            let mode = if target.recursive {
                RecursiveMode::Recursive
            } else {
                RecursiveMode::NonRecursive
            };
            watcher
                .watch(&target.path, mode)
                .map_err(|e| RedwatchError::watch_setup(target.path.display().to_string(), e))?;
        }

        // Seeded from disk so saves that leave content untouched never fire.
        let content_hashes = if options.ignore_unchanged {
            watch_set
                .files()
                .iter()
                .filter_map(|path| {
                    fs::read(path)
                        .ok()
                        .map(|content| (path.clone(), compute_content_hash(&content)))
                })
                .collect()
        } else {
            HashMap::new()
        };

        // notify sometimes reports existing files when a watch is first registered
        let cooldown_end = Instant::now() + options.cooldown;
        while Instant::now() < cooldown_end {
            let _ = rx.recv_timeout(Duration::from_millis(50));
        }

        Ok(Self {
            watch_set,
            options,
            rx,
            state: WatcherState::new(),
            content_hashes,
            _watcher: watcher,
        })
    }

    pub fn watch_set(&self) -> &WatchSet {
        &self.watch_set
    }

    fn absorb(&mut self, res: notify::Result<Event>) {
        let Ok(event) = res else {
            return;
        };
        // Reads by the build tool must not look like edits
        if matches!(event.kind, EventKind::Access(_)) {
            return;
        }
        for path in event.paths {
            self.absorb_path(path);
        }
    }

    fn absorb_path(&mut self, path: PathBuf) {
        if !self.watch_set.matches(&path) || path.is_dir() {
            return;
        }

        match fs::read(&path) {
            Ok(content) => {
                if self.options.ignore_unchanged {
                    let new_hash = compute_content_hash(&content);
                    if self.content_hashes.get(&path) == Some(&new_hash) {
                        return;
                    }
                    self.content_hashes.insert(path.clone(), new_hash);
                }
                self.state.add_change(path);
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.content_hashes.remove(&path);
                self.state.add_change(path);
            }
            // Half-written or locked; the follow-up event will catch it.
            Err(_) => {}
        }
    }
}

impl TriggerSource for FileWatcher {
    fn poll_trigger(&mut self, timeout: Duration) -> TriggerPoll {
        match self.rx.recv_timeout(timeout) {
            Ok(res) => {
                self.absorb(res);
                while let Ok(res) = self.rx.try_recv() {
                    self.absorb(res);
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                if !self.state.has_pending() {
                    return TriggerPoll::Closed;
                }
            }
        }

        if self.state.should_fire(self.options.debounce) {
            TriggerPoll::Trigger(Trigger::new(self.state.take_changes()))
        } else {
            TriggerPoll::Idle
        }
    }
}
