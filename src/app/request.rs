// LogSift - app/request.rs
//
// Turns raw command-line values plus the loaded config into a validated scan
// request. All argument validation happens here, before any filesystem I/O.
//
// Precedence: explicit CLI values > config.toml > built-in defaults.

use crate::core::discovery::DiscoveryConfig;
use crate::core::filter::LineFilter;
use crate::core::model::{TimeRange, UntimedLines};
use crate::core::parser::TimestampExtractor;
use crate::platform::config::AppConfig;
use crate::util::constants;
use crate::util::error::{TimeBound, TimeRangeError};
use chrono::NaiveDateTime;
use std::path::PathBuf;

/// Parse one `--start-time` / `--end-time` value.
pub fn parse_time_arg(bound: TimeBound, value: &str) -> Result<NaiveDateTime, TimeRangeError> {
    NaiveDateTime::parse_from_str(value.trim(), constants::TIME_ARG_FORMAT).map_err(|source| {
        TimeRangeError::InvalidFormat {
            bound,
            value: value.to_string(),
            source,
        }
    })
}

/// Parse both optional bounds. An inverted range is accepted as-is.
pub fn parse_time_range(
    start: Option<&str>,
    end: Option<&str>,
) -> Result<TimeRange, TimeRangeError> {
    let start = start
        .map(|s| parse_time_arg(TimeBound::Start, s))
        .transpose()?;
    let end = end.map(|s| parse_time_arg(TimeBound::End, s)).transpose()?;

    if let (Some(s), Some(e)) = (start, end) {
        if s > e {
            tracing::warn!(start = %s, end = %e, "Start time is after end time; no timed line can match");
        }
    }
    Ok(TimeRange::new(start, end))
}

// =============================================================================
// Scan request
// =============================================================================

/// Raw values as received from the command line.
#[derive(Debug, Clone, Default)]
pub struct RequestArgs {
    pub root: PathBuf,
    pub keyword: String,
    /// Exact basenames; empty = no restriction.
    pub files: Vec<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub strict_time: bool,
    pub syslog_year: Option<i32>,
    pub max_depth: Option<usize>,
}

/// Everything the discovery and scan stages need.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    pub root: PathBuf,
    pub discovery: DiscoveryConfig,
    pub filter: LineFilter,
    pub extractor: TimestampExtractor,
}

impl ScanRequest {
    /// Validate `args` and merge them over `config`.
    pub fn build(args: RequestArgs, config: &AppConfig) -> Result<Self, TimeRangeError> {
        let time_range = parse_time_range(args.start_time.as_deref(), args.end_time.as_deref())?;

        let untimed = if args.strict_time || config.strict_time {
            UntimedLines::Exclude
        } else {
            UntimedLines::Include
        };

        let extractor = match args.syslog_year.or(config.syslog_year) {
            Some(year) => TimestampExtractor::with_syslog_year(year),
            None => TimestampExtractor::default(),
        };

        let mut discovery = DiscoveryConfig {
            max_depth: args.max_depth.or(config.max_depth),
            ..Default::default()
        };
        let names: Vec<String> = args
            .files
            .into_iter()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();
        if !names.is_empty() {
            discovery = discovery.with_allow_list(names);
        }

        let request = Self {
            root: args.root,
            discovery,
            filter: LineFilter::new(args.keyword)
                .with_time_range(time_range)
                .with_untimed(untimed),
            extractor,
        };

        tracing::debug!(
            root = %request.root.display(),
            keyword = %request.filter.keyword,
            range_active = request.filter.time_range.is_active(),
            untimed = ?request.filter.untimed,
            syslog_year = request.extractor.syslog_year(),
            max_depth = ?request.discovery.max_depth,
            "Scan request built"
        );
        Ok(request)
    }
}
