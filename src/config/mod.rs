//! Configuration module for redwatch
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (REDWATCH_*)
//! 3. Project config (./redwatch.toml) or an explicit `--config` file
//! 4. User config (~/.config/redwatch/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{
    load_with_warnings, resolve, user_config_path, ConfigWarning, ResolvedConfig,
    PROJECT_CONFIG_FILE,
};
pub use types::{ColorMode, Config, OutputConfig, ServerConfig, SupervisorConfig, WatchConfig};
