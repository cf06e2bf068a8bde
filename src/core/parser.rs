// LogSift - core/parser.rs
//
// Per-line timestamp extraction, dispatched on the file's log type.
// Core layer: operates on line text only, never touches the filesystem.
//
// Every failure (too few tokens, no bracket group, bad JSON, layout mismatch)
// collapses to `None`. Callers decide what an untimed line means.

use crate::core::model::LogType;
use crate::core::registry::{Extraction, TimestampPattern};
use chrono::{Datelike, Local, NaiveDateTime};
use regex::Regex;
use std::sync::OnceLock;

/// Extracts timestamps from raw lines.
///
/// Holds the one piece of context the fixed registry cannot supply: the year
/// assumed for year-less layouts (BSD syslog).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampExtractor {
    syslog_year: i32,
}

impl Default for TimestampExtractor {
    /// Assume the current local year for year-less timestamps.
    fn default() -> Self {
        Self {
            syslog_year: Local::now().year(),
        }
    }
}

impl TimestampExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `year` for year-less timestamps instead of the current year.
    pub fn with_syslog_year(year: i32) -> Self {
        Self { syslog_year: year }
    }

    pub fn syslog_year(&self) -> i32 {
        self.syslog_year
    }

    /// Extract and parse the timestamp of `line` according to `log_type`.
    pub fn extract(&self, line: &str, log_type: LogType) -> Option<NaiveDateTime> {
        let pattern = log_type.pattern();
        let raw = locate(line, pattern)?;
        self.parse(&raw, pattern)
    }

    fn parse(&self, raw: &str, pattern: &TimestampPattern) -> Option<NaiveDateTime> {
        if pattern.yearless {
            let with_year = format!("{} {raw}", self.syslog_year);
            let year_layout = format!("%Y {}", pattern.layout);
            NaiveDateTime::parse_from_str(&with_year, &year_layout).ok()
        } else {
            NaiveDateTime::parse_from_str(raw, pattern.layout).ok()
        }
    }
}

/// Extract a timestamp using a default extractor (current year for syslog).
pub fn extract_timestamp(line: &str, log_type: LogType) -> Option<NaiveDateTime> {
    TimestampExtractor::default().extract(line, log_type)
}

/// Locate the timestamp substring of `line` according to the pattern's rule.
fn locate(line: &str, pattern: &TimestampPattern) -> Option<String> {
    match pattern.extraction {
        Extraction::LeadingTokens(n) => leading_tokens(line, n),
        Extraction::BracketedGroup => bracketed_token(line).map(str::to_owned),
        Extraction::JsonField(key) => json_string_field(line, key),
    }
}

/// First `n` whitespace-delimited tokens joined by single spaces.
/// `None` if the line has fewer than `n` tokens.
fn leading_tokens(line: &str, n: usize) -> Option<String> {
    let tokens: Vec<&str> = line.split_whitespace().take(n).collect();
    if tokens.len() < n {
        return None;
    }
    Some(tokens.join(" "))
}

/// First whitespace token inside the first `[...]` group.
fn bracketed_token(line: &str) -> Option<&str> {
    static BRACKETS: OnceLock<Regex> = OnceLock::new();
    let re = BRACKETS
        .get_or_init(|| Regex::new(r"\[(.*?)\]").expect("bracket regex is a valid literal"));

    let group = re.captures(line)?.get(1)?.as_str();
    group.split_whitespace().next()
}

/// String value of top-level `key` when `line` is a JSON object.
fn json_string_field(line: &str, key: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(line).ok()?;
    match value.as_object()?.get(key)? {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}
