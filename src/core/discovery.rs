// LogSift - core/discovery.rs
//
// Recursive directory traversal and log file discovery.
//
// Architecture note: this module uses `walkdir` for directory traversal as an
// OS abstraction. It reads only directory entries and file types, never file
// contents; that boundary is owned by the scan engine.
//
// Error policy:
//   - An unusable root (missing, not a directory, access denied) is fatal.
//   - Unreadable entries below the root are non-fatal and surface as warnings.
//   - Symlinks are not followed; walkdir's own loop handling is relied upon.

use crate::util::constants;
use crate::util::error::DiscoveryError;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for a discovery operation.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryConfig {
    /// Exact basenames to restrict the walk to. `None` or an empty list means
    /// every file passing the name filter is yielded.
    pub allow_list: Option<Vec<String>>,

    /// Maximum directory recursion depth (root = 0). `None` = unbounded.
    pub max_depth: Option<usize>,
}

impl DiscoveryConfig {
    /// Restrict discovery to the given basenames.
    pub fn with_allow_list<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allow_list = Some(names.into_iter().map(Into::into).collect());
        self
    }
}

// =============================================================================
// Name filter
// =============================================================================

/// Returns true if a basename marks a log file candidate.
///
/// The `.log` suffix branch is subsumed by the substring branch for every
/// realistic name; both are kept so the documented rule stays literal.
pub fn is_log_candidate(file_name: &str) -> bool {
    file_name.ends_with(constants::LOG_FILE_SUFFIX) || file_name.contains(constants::LOG_NAME_MARKER)
}

// =============================================================================
// Walk
// =============================================================================

/// One step of a discovery walk.
#[derive(Debug)]
pub enum WalkItem {
    /// A candidate log file.
    File(PathBuf),

    /// An entry below the root that could not be read.
    Warning(String),
}

/// Lazy iterator over candidate log files under a root.
///
/// Entries within a directory are visited in file-name order so repeated
/// walks of an unchanged tree yield the same sequence. Start a fresh walk by
/// calling `walk_log_files` again.
pub struct LogFileWalk {
    inner: walkdir::IntoIter,
    allow_list: Option<HashSet<String>>,
}

impl Iterator for LogFileWalk {
    type Item = WalkItem;

    fn next(&mut self) -> Option<WalkItem> {
        loop {
            let entry = match self.inner.next()? {
                Ok(e) => e,
                Err(e) => {
                    let path_str = e
                        .path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "<unknown>".to_string());
                    let msg = format!("Cannot access '{path_str}': {e}");
                    tracing::debug!(warning = %msg, "Discovery warning");
                    return Some(WalkItem::Warning(msg));
                }
            };

            if is_directory(&entry) {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy();
            if !is_log_candidate(&file_name) {
                tracing::trace!(file = %file_name, "Not a log file name");
                continue;
            }
            if let Some(allowed) = &self.allow_list {
                if !allowed.contains(&*file_name) {
                    tracing::trace!(file = %file_name, "Not in allow-list");
                    continue;
                }
            }

            return Some(WalkItem::File(entry.into_path()));
        }
    }
}

/// Directories, including symlinks that point at one, are never yielded.
fn is_directory(entry: &walkdir::DirEntry) -> bool {
    let file_type = entry.file_type();
    if file_type.is_dir() {
        return true;
    }
    file_type.is_symlink() && entry.path().is_dir()
}

/// Start a lazy walk for log files under `root`.
///
/// # Fatal errors
/// Returns `Err` only if the root itself is unusable.
pub fn walk_log_files(root: &Path, config: &DiscoveryConfig) -> Result<LogFileWalk, DiscoveryError> {
    check_root(root)?;

    let allow_list: Option<HashSet<String>> = config
        .allow_list
        .as_ref()
        .filter(|names| !names.is_empty())
        .map(|names| names.iter().cloned().collect());

    let mut walker = walkdir::WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name();
    if let Some(depth) = config.max_depth {
        walker = walker.max_depth(depth.min(constants::ABSOLUTE_MAX_DEPTH));
    }

    tracing::debug!(
        root = %root.display(),
        max_depth = ?config.max_depth,
        allow_list = ?allow_list,
        "Discovery starting"
    );

    Ok(LogFileWalk {
        inner: walker.into_iter(),
        allow_list,
    })
}

/// Walk `root` to completion, collecting candidate files and warnings.
///
/// Warnings beyond `MAX_WARNINGS` are logged but not returned.
pub fn discover_files(
    root: &Path,
    config: &DiscoveryConfig,
) -> Result<(Vec<PathBuf>, Vec<String>), DiscoveryError> {
    let mut files = Vec::new();
    let mut warnings = Vec::new();

    for item in walk_log_files(root, config)? {
        match item {
            WalkItem::File(path) => files.push(path),
            WalkItem::Warning(msg) => {
                if warnings.len() < constants::MAX_WARNINGS {
                    warnings.push(msg);
                } else {
                    tracing::warn!(warning = %msg, "Discovery warning (not recorded, cap reached)");
                }
            }
        }
    }

    tracing::info!(
        root = %root.display(),
        files = files.len(),
        warnings = warnings.len(),
        "Discovery complete"
    );

    Ok((files, warnings))
}

/// Validate the root before walking.
///
/// `fs::metadata` is used rather than `Path::is_dir` so that access-denied is
/// distinguishable from not-found.
fn check_root(root: &Path) -> Result<(), DiscoveryError> {
    match std::fs::metadata(root) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(DiscoveryError::NotADirectory {
            path: root.to_path_buf(),
        }),
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            Err(DiscoveryError::PermissionDenied {
                path: root.to_path_buf(),
                source: e,
            })
        }
        Err(_) => Err(DiscoveryError::RootNotFound {
            path: root.to_path_buf(),
        }),
    }
}
