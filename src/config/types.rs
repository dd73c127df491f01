//! Configuration type definitions

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::{DEFAULT_PRIMARY_HOST, DEFAULT_PRIMARY_PORT, DEFAULT_REPLICA_PORT};
use crate::error::RedwatchResult;

use super::loader::{self, ConfigWarning};

/// Supervised server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Build-and-run command; role arguments are appended to it
    #[serde(default = "default_command")]
    pub command: Vec<String>,

    /// Own listening port when running as a replica
    #[serde(default = "default_replica_port")]
    pub replica_port: u16,

    /// Primary a replica follows
    #[serde(default = "default_primary_host")]
    pub primary_host: String,

    #[serde(default = "default_primary_port")]
    pub primary_port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            replica_port: default_replica_port(),
            primary_host: default_primary_host(),
            primary_port: default_primary_port(),
        }
    }
}

fn default_command() -> Vec<String> {
    ["cargo", "run", "--quiet", "--"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_replica_port() -> u16 {
    DEFAULT_REPLICA_PORT
}

fn default_primary_host() -> String {
    DEFAULT_PRIMARY_HOST.to_string()
}

fn default_primary_port() -> u16 {
    DEFAULT_PRIMARY_PORT
}

/// Watch configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Paths or globs, relative to the project root
    #[serde(default = "default_watch_paths")]
    pub paths: Vec<String>,

    /// Quiet period before a burst of events becomes one trigger
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Drop events for files whose content did not change
    #[serde(default = "default_true")]
    pub ignore_unchanged: bool,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            paths: default_watch_paths(),
            debounce_ms: default_debounce_ms(),
            ignore_unchanged: true,
        }
    }
}

impl WatchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

fn default_watch_paths() -> Vec<String> {
    vec!["src/**/*.rs".to_string()]
}

fn default_debounce_ms() -> u64 {
    100
}

fn default_true() -> bool {
    true
}

/// Restart loop configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupervisorConfig {
    /// How long to wait for a killed child to exit before giving up on it
    #[serde(default = "default_stop_timeout_ms")]
    pub stop_timeout_ms: u64,

    /// A failing exit within this window counts as a failed start (0 = off)
    #[serde(default)]
    pub startup_grace_ms: u64,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            stop_timeout_ms: default_stop_timeout_ms(),
            startup_grace_ms: 0,
        }
    }
}

fn default_stop_timeout_ms() -> u64 {
    5000
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorMode,
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub watch: WatchConfig,

    #[serde(default)]
    pub supervisor: SupervisorConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> RedwatchResult<Self> {
        Ok(loader::load_with_warnings(path)?.0)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> RedwatchResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }
}
