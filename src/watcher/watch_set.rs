//! Resolution of configured paths/globs into concrete watch registrations

use std::fmt;
use std::fs;
use std::path::{Component, Path, PathBuf};

use ignore::overrides::{Override, OverrideBuilder};
use ignore::WalkBuilder;

use crate::error::{RedwatchError, RedwatchResult};

const GLOB_META: &[char] = &['*', '?', '[', '{'];

/// One directory registered with the OS watcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchTarget {
    pub path: PathBuf,
    pub recursive: bool,
}

/// The set of watched paths, resolved and validated once at startup.
#[derive(Debug, Clone)]
pub struct WatchSet {
    root: PathBuf,
    patterns: Vec<String>,
    matcher: Override,
    targets: Vec<WatchTarget>,
    files: Vec<PathBuf>,
}

impl WatchSet {
    /// Resolve `patterns` relative to `root`.
    ///
    /// A literal path must exist and be readable. A glob must have an existing
    /// base directory and match at least one file. Anything else is a
    /// `WatchSetup` error.
    pub fn resolve(root: &Path, patterns: &[String]) -> RedwatchResult<Self> {
        if patterns.is_empty() {
            return Err(RedwatchError::watch_setup("", "no paths configured"));
        }

        let root = root
            .canonicalize()
            .map_err(|e| RedwatchError::watch_setup(root.display().to_string(), e))?;

        let mut builder = OverrideBuilder::new(&root);
        let mut targets: Vec<WatchTarget> = Vec::new();
        let mut files: Vec<PathBuf> = Vec::new();
        let mut normalized = Vec::with_capacity(patterns.len());

        for raw in patterns {
            let pattern = normalize(&root, raw)?;

            match glob_base(&pattern) {
                None => {
                    let path = root.join(&pattern);
                    let meta = fs::metadata(&path).map_err(|e| setup_error(raw, &path, e))?;

                    if meta.is_dir() {
                        fs::read_dir(&path).map_err(|e| setup_error(raw, &path, e))?;
                        add_glob(&mut builder, raw, &format!("/{}/**", pattern))?;
                        files.extend(walk_files(&path, None));
                        targets.push(WatchTarget {
                            path,
                            recursive: true,
                        });
                    } else {
                        fs::File::open(&path).map_err(|e| setup_error(raw, &path, e))?;
                        add_glob(&mut builder, raw, &format!("/{}", pattern))?;
                        let parent = path.parent().unwrap_or(&root).to_path_buf();
                        files.push(path);
                        targets.push(WatchTarget {
                            path: parent,
                            recursive: false,
                        });
                    }
                }
                Some(base) => {
                    let base_path = root.join(&base);
                    if !base_path.is_dir() {
                        return Err(RedwatchError::watch_setup(
                            raw.as_str(),
                            format!("directory not found: {}", base_path.display()),
                        ));
                    }
                    fs::read_dir(&base_path).map_err(|e| setup_error(raw, &base_path, e))?;

                    let single = OverrideBuilder::new(&root)
                        .add(&pattern)
                        .and_then(|b| b.build())
                        .map_err(|e| RedwatchError::watch_setup(raw.as_str(), e))?;
                    let matched = walk_files(&base_path, Some(&single));
                    if matched.is_empty() {
                        return Err(RedwatchError::watch_setup(
                            raw.as_str(),
                            "pattern matches no files",
                        ));
                    }

                    add_glob(&mut builder, raw, &pattern)?;
                    files.extend(matched);
                    targets.push(WatchTarget {
                        path: base_path,
                        recursive: true,
                    });
                }
            }

            normalized.push(pattern);
        }

        let matcher = builder
            .build()
            .map_err(|e| RedwatchError::watch_setup(patterns.join(", "), e))?;

        files.sort();
        files.dedup();

        Ok(Self {
            root,
            patterns: normalized,
            matcher,
            targets: merge_targets(targets),
            files,
        })
    }

    /// Whether a (possibly already removed) path belongs to the watch set
    pub fn matches(&self, path: &Path) -> bool {
        path.starts_with(&self.root) && self.matcher.matched(path, false).is_whitelist()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn targets(&self) -> &[WatchTarget] {
        &self.targets
    }

    /// Files that matched at startup
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }
}

impl fmt::Display for WatchSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.patterns.join(", "))
    }
}

fn normalize(root: &Path, raw: &str) -> RedwatchResult<String> {
    let trimmed = raw.trim();
    let path = Path::new(trimmed);

    let relative = if path.is_absolute() {
        path.strip_prefix(root)
            .map_err(|_| RedwatchError::watch_setup(raw, "path is outside the project root"))?
            .to_string_lossy()
            .into_owned()
    } else {
        trimmed.to_string()
    };

    let relative = relative.trim_start_matches("./").trim_end_matches('/');
    if relative.is_empty() {
        return Err(RedwatchError::watch_setup(raw, "empty path"));
    }
    if Path::new(relative)
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        return Err(RedwatchError::watch_setup(raw, "path is outside the project root"));
    }

    Ok(relative.to_string())
}

/// Literal directory prefix of a glob, `None` when the pattern has no glob syntax.
fn glob_base(pattern: &str) -> Option<String> {
    if !pattern.contains(GLOB_META) {
        return None;
    }

    let base: Vec<&str> = pattern
        .split('/')
        .take_while(|segment| !segment.contains(GLOB_META))
        .collect();
    Some(base.join("/"))
}

fn add_glob(builder: &mut OverrideBuilder, raw: &str, glob: &str) -> RedwatchResult<()> {
    builder
        .add(glob)
        .map(|_| ())
        .map_err(|e| RedwatchError::watch_setup(raw, e))
}

fn walk_files(base: &Path, matcher: Option<&Override>) -> Vec<PathBuf> {
    WalkBuilder::new(base)
        .standard_filters(false)
        .build()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|entry| entry.into_path())
        .filter(|path| matcher.map_or(true, |m| m.matched(path, false).is_whitelist()))
        .collect()
}

fn setup_error(raw: &str, path: &Path, err: std::io::Error) -> RedwatchError {
    let reason = match err.kind() {
        std::io::ErrorKind::NotFound => format!("not found: {}", path.display()),
        std::io::ErrorKind::PermissionDenied => format!("permission denied: {}", path.display()),
        _ => err.to_string(),
    };
    RedwatchError::watch_setup(raw, reason)
}

/// One registration per directory; recursive wins over non-recursive.
fn merge_targets(mut targets: Vec<WatchTarget>) -> Vec<WatchTarget> {
    targets.sort_by(|a, b| a.path.cmp(&b.path).then(b.recursive.cmp(&a.recursive)));
    targets.dedup_by(|later, earlier| later.path == earlier.path);
    targets
}
