//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{RedwatchError, RedwatchResult};

use super::types::{ColorMode, Config};

/// Project-level config file name, looked up in the project root
pub const PROJECT_CONFIG_FILE: &str = "redwatch.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Effective configuration plus where it came from
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: Config,
    /// File the config was read from, `None` for built-in defaults
    pub source: Option<PathBuf>,
    pub warnings: Vec<ConfigWarning>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> RedwatchResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|e| RedwatchError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| RedwatchError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Resolve the effective configuration.
///
/// Priority: explicit `--config` file, then `<project_root>/redwatch.toml`,
/// then the user config, then defaults. `REDWATCH_*` environment overrides
/// are applied on top of whichever was found.
pub fn resolve(project_root: &Path, explicit: Option<&Path>) -> RedwatchResult<ResolvedConfig> {
    resolve_with_env(project_root, explicit, user_config_path(), |key| {
        std::env::var(key).ok()
    })
}

pub(crate) fn resolve_with_env(
    project_root: &Path,
    explicit: Option<&Path>,
    user_config: Option<PathBuf>,
    get_env: impl Fn(&str) -> Option<String>,
) -> RedwatchResult<ResolvedConfig> {
    let candidate = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let project = project_root.join(PROJECT_CONFIG_FILE);
            if project.is_file() {
                Some(project)
            } else {
                user_config.filter(|p| p.is_file())
            }
        }
    };

    let (config, warnings) = match &candidate {
        Some(path) => load_with_warnings(path)?,
        None => (Config::default(), Vec::new()),
    };

    Ok(ResolvedConfig {
        config: apply_env_overrides(config, get_env),
        source: candidate,
        warnings,
    })
}

/// Apply environment variable overrides (REDWATCH_* prefix)
pub(crate) fn apply_env_overrides(
    mut config: Config,
    get_env: impl Fn(&str) -> Option<String>,
) -> Config {
    // REDWATCH_COMMAND (whitespace-separated)
    if let Some(command) = get_env("REDWATCH_COMMAND") {
        let parts: Vec<String> = command.split_whitespace().map(str::to_string).collect();
        if !parts.is_empty() {
            config.server.command = parts;
        }
    }

    // REDWATCH_WATCH (comma-separated)
    if let Some(paths) = get_env("REDWATCH_WATCH") {
        let parsed: Vec<String> = paths
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if !parsed.is_empty() {
            config.watch.paths = parsed;
        }
    }

    if let Some(ms) = get_env("REDWATCH_DEBOUNCE_MS").and_then(|v| v.trim().parse().ok()) {
        config.watch.debounce_ms = ms;
    }

    if let Some(ms) = get_env("REDWATCH_STOP_TIMEOUT_MS").and_then(|v| v.trim().parse().ok()) {
        config.supervisor.stop_timeout_ms = ms;
    }

    if let Some(port) = get_env("REDWATCH_REPLICA_PORT").and_then(|v| v.trim().parse().ok()) {
        config.server.replica_port = port;
    }

    // REDWATCH_COLOR
    if let Some(color) = get_env("REDWATCH_COLOR") {
        config.output.color = match color.to_lowercase().as_str() {
            "always" => ColorMode::Always,
            "never" => ColorMode::Never,
            _ => ColorMode::Auto,
        };
    }

    config
}

/// `$XDG_CONFIG_HOME/redwatch/config.toml`, falling back to `~/.config`
pub fn user_config_path() -> Option<PathBuf> {
    dirs_config_dir().map(|dir| dir.join("redwatch/config.toml"))
}

fn dirs_config_dir() -> Option<PathBuf> {
    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

pub(crate) fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "server",
        "command",
        "replica_port",
        "primary_host",
        "primary_port",
        "watch",
        "paths",
        "debounce_ms",
        "ignore_unchanged",
        "supervisor",
        "stop_timeout_ms",
        "startup_grace_ms",
        "output",
        "color",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_bytes.len()]
}
