// LogSift - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

// =============================================================================
// Log type
// =============================================================================

/// Line format of a log file, decided once per file from its name.
///
/// The set is closed: every variant has exactly one entry in
/// `core::registry`, and anything unrecognised is treated as `Default`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum LogType {
    /// Application logs starting with `YYYY-MM-DD HH:MM:SS`.
    #[default]
    Default,
    /// Nginx access/error logs with a `[DD/Mon/YYYY:HH:MM:SS +ZZZZ]` group.
    Nginx,
    /// Grafana JSON lines carrying the timestamp in key `t`.
    Grafana,
    /// BSD syslog lines starting with `Mon DD HH:MM:SS`.
    Linux,
}

impl LogType {
    /// Returns all variants in registry order.
    pub fn all() -> &'static [LogType] {
        &[
            LogType::Default,
            LogType::Nginx,
            LogType::Grafana,
            LogType::Linux,
        ]
    }

    /// Stable lowercase tag used in output, config, and export.
    pub fn tag(&self) -> &'static str {
        match self {
            LogType::Default => "default",
            LogType::Nginx => "nginx",
            LogType::Grafana => "grafana",
            LogType::Linux => "linux",
        }
    }

    /// Resolve a tag string. Unknown tags fall back to `Default`.
    pub fn from_tag(tag: &str) -> LogType {
        let tag = tag.trim();
        LogType::all()
            .iter()
            .copied()
            .find(|t| t.tag().eq_ignore_ascii_case(tag))
            .unwrap_or_default()
    }
}

impl FromStr for LogType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(LogType::from_tag(s))
    }
}

impl std::fmt::Display for LogType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

// =============================================================================
// Log file handle
// =============================================================================

/// A discovered log file together with its fixed log type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFile {
    path: PathBuf,
    log_type: LogType,
}

impl LogFile {
    /// Build a handle, classifying the file from its path.
    pub fn classify(path: PathBuf) -> Self {
        let log_type = crate::core::classify::classify(&path);
        Self { path, log_type }
    }

    /// Build a handle with an explicit log type, bypassing name classification.
    pub fn with_type(path: PathBuf, log_type: LogType) -> Self {
        Self { path, log_type }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn log_type(&self) -> LogType {
        self.log_type
    }
}

// =============================================================================
// Time range
// =============================================================================

/// Optional inclusive bounds on line timestamps.
///
/// `start <= end` is not enforced; an inverted range simply admits no
/// timestamped line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeRange {
    /// Inclusive lower bound. None = no lower bound.
    pub start: Option<NaiveDateTime>,

    /// Inclusive upper bound. None = no upper bound.
    pub end: Option<NaiveDateTime>,
}

impl TimeRange {
    pub fn new(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> Self {
        Self { start, end }
    }

    /// Returns true if at least one bound is set.
    pub fn is_active(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    /// Returns true if `ts` is not before `start` and not after `end`.
    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        if let Some(start) = self.start {
            if ts < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if ts > end {
                return false;
            }
        }
        true
    }
}

/// What a time range does with lines that carry no parseable timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UntimedLines {
    /// Untimed lines skip the time check and go straight to the keyword check.
    #[default]
    Include,

    /// Untimed lines are dropped whenever a time range is active.
    Exclude,
}

// =============================================================================
// Match record
// =============================================================================

/// One line that passed the time and keyword filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    /// File the line came from.
    pub path: PathBuf,

    /// 1-based line number within the file.
    pub line_number: u64,

    /// Log type the file was scanned as.
    pub log_type: LogType,

    /// Timestamp extracted from the line, if any.
    pub timestamp: Option<NaiveDateTime>,

    /// Line text without its line terminator.
    pub line: String,
}

// =============================================================================
// Scan summary
// =============================================================================

/// Summary statistics for a completed scan operation.
#[derive(Debug, Clone, Default)]
pub struct ScanSummary {
    /// Files the engine tried to open.
    pub files_attempted: usize,

    /// Files that could not be opened or read to the end.
    pub files_failed: usize,

    /// Total lines read across all files.
    pub lines_read: u64,

    /// Lines for which no timestamp could be extracted.
    pub untimed_lines: u64,

    /// Lines dropped by the time range.
    pub lines_out_of_range: u64,

    /// Lines emitted as matches.
    pub matches: u64,

    /// Wall-clock scan duration.
    pub duration: Duration,

    /// Set when the progress consumer ended the scan before the last file.
    pub stopped: bool,
}

/// Per-file counters produced by scanning one reader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileStats {
    pub lines_read: u64,
    pub untimed_lines: u64,
    pub lines_out_of_range: u64,
    pub matches: u64,
}

impl ScanSummary {
    /// Fold one file's counters into the totals.
    pub fn absorb(&mut self, stats: &FileStats) {
        self.lines_read += stats.lines_read;
        self.untimed_lines += stats.untimed_lines;
        self.lines_out_of_range += stats.lines_out_of_range;
        self.matches += stats.matches;
    }
}

// =============================================================================
// Scan progress
// =============================================================================

/// Events emitted by the scan engine, in file and line order.
#[derive(Debug)]
pub enum ScanProgress<'a> {
    /// A file is about to be opened.
    FileStarted { file: &'a LogFile },

    /// A line passed both filters.
    Matched { record: &'a MatchRecord },

    /// The file could not be opened, or reading stopped early.
    FileFailed { error: &'a crate::util::error::ScanError },

    /// The file was read (completely, or up to a read failure).
    FileCompleted { file: &'a LogFile, stats: FileStats },
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 10, 10)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_from_tag_known_and_unknown() {
        assert_eq!(LogType::from_tag("nginx"), LogType::Nginx);
        assert_eq!(LogType::from_tag("Grafana"), LogType::Grafana);
        assert_eq!(LogType::from_tag(" linux "), LogType::Linux);
        assert_eq!(LogType::from_tag("apache"), LogType::Default);
        assert_eq!(LogType::from_tag(""), LogType::Default);
        assert_eq!("syslog".parse::<LogType>(), Ok(LogType::Default));
    }

    #[test]
    fn test_tag_round_trips_for_every_variant() {
        for t in LogType::all() {
            assert_eq!(LogType::from_tag(t.tag()), *t);
            assert_eq!(t.to_string(), t.tag());
        }
    }

    #[test]
    fn test_time_range_bounds_are_inclusive() {
        let range = TimeRange::new(Some(at(10, 0, 0)), Some(at(12, 0, 0)));
        assert!(range.is_active());
        assert!(range.contains(at(10, 0, 0)));
        assert!(range.contains(at(12, 0, 0)));
        assert!(!range.contains(at(9, 59, 59)));
        assert!(!range.contains(at(12, 0, 1)));
    }

    #[test]
    fn test_time_range_open_ends() {
        assert!(!TimeRange::default().is_active());
        assert!(TimeRange::default().contains(at(0, 0, 0)));

        let start_only = TimeRange::new(Some(at(10, 0, 0)), None);
        assert!(start_only.contains(at(23, 59, 59)));
        assert!(!start_only.contains(at(9, 0, 0)));

        let end_only = TimeRange::new(None, Some(at(10, 0, 0)));
        assert!(end_only.contains(at(0, 0, 0)));
        assert!(!end_only.contains(at(10, 0, 1)));
    }

    #[test]
    fn test_inverted_range_admits_nothing() {
        let range = TimeRange::new(Some(at(12, 0, 0)), Some(at(10, 0, 0)));
        for h in 0..24 {
            assert!(!range.contains(at(h, 0, 0)), "hour {h} should be rejected");
        }
    }

    #[test]
    fn test_log_file_classifies_once_from_path() {
        let file = LogFile::classify(PathBuf::from("/srv/nginx/access.log"));
        assert_eq!(file.log_type(), LogType::Nginx);
        assert_eq!(file.path(), Path::new("/srv/nginx/access.log"));

        let forced = LogFile::with_type(PathBuf::from("/srv/nginx/access.log"), LogType::Linux);
        assert_eq!(forced.log_type(), LogType::Linux);
    }
}
