// LogSift - core/filter.rs
//
// Per-line filter decision: time range first, then keyword.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::model::{TimeRange, UntimedLines};
use chrono::NaiveDateTime;

/// Complete filter state for a scan. Both checks are AND-combined.
#[derive(Debug, Clone, Default)]
pub struct LineFilter {
    /// Case-sensitive literal substring. Empty matches every line.
    pub keyword: String,

    /// Time bounds; inactive when neither end is set.
    pub time_range: TimeRange,

    /// Treatment of lines without a parseable timestamp.
    pub untimed: UntimedLines,
}

/// Outcome of checking one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The line passed both checks.
    Match,

    /// The line was dropped by the time range.
    OutOfRange,

    /// The line passed the time check but lacks the keyword.
    NoKeyword,
}

impl LineFilter {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            ..Default::default()
        }
    }

    pub fn with_time_range(mut self, time_range: TimeRange) -> Self {
        self.time_range = time_range;
        self
    }

    pub fn with_untimed(mut self, untimed: UntimedLines) -> Self {
        self.untimed = untimed;
        self
    }

    /// Decide whether `line`, carrying `timestamp`, should be emitted.
    pub fn check(&self, line: &str, timestamp: Option<NaiveDateTime>) -> Verdict {
        if !self.passes_time(timestamp) {
            return Verdict::OutOfRange;
        }
        if line.contains(self.keyword.as_str()) {
            Verdict::Match
        } else {
            Verdict::NoKeyword
        }
    }

    fn passes_time(&self, timestamp: Option<NaiveDateTime>) -> bool {
        if !self.time_range.is_active() {
            return true;
        }
        match timestamp {
            Some(ts) => self.time_range.contains(ts),
            None => self.untimed == UntimedLines::Include,
        }
    }
}
