// LogSift - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LogSift";

/// Application identifier used for config directories.
pub const APP_ID: &str = "LogSift";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Discovery
// =============================================================================

/// Filename suffix that always marks a file as a log candidate.
pub const LOG_FILE_SUFFIX: &str = ".log";

/// Substring that marks a file as a log candidate anywhere in its name.
pub const LOG_NAME_MARKER: &str = "log";

/// Hard upper bound on a configured max depth (prevents configuration mistakes).
pub const ABSOLUTE_MAX_DEPTH: usize = 256;

// =============================================================================
// Time arguments
// =============================================================================

/// Layout of the `--start-time` / `--end-time` arguments.
pub const TIME_ARG_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Human-readable form of `TIME_ARG_FORMAT` used in error messages.
pub const TIME_ARG_HINT: &str = "YYYY-MM-DD HH:MM:SS";

/// Accepted range for an explicitly configured syslog year.
pub const MIN_SYSLOG_YEAR: i32 = 1970;
pub const MAX_SYSLOG_YEAR: i32 = 9999;

// =============================================================================
// Scanning
// =============================================================================

/// Capacity of the per-file line buffer.
pub const LINE_BUFFER_CAPACITY: usize = 1024;

/// Maximum number of discovery warnings kept before the rest are only logged.
pub const MAX_WARNINGS: usize = 1_000;

/// Maximum length of a log line included in debug output.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

// =============================================================================
// Export
// =============================================================================

/// Maximum number of matches that can be exported in a single operation.
pub const MAX_EXPORT_MATCHES: usize = 5_000_000;

// =============================================================================
// Output
// =============================================================================

/// Accepted values of `--color` and `[output] color`.
pub const COLOR_MODES: [&str; 3] = ["auto", "always", "never"];

// =============================================================================
// Logging
// =============================================================================

/// Default log level. Diagnostics go to stderr; matches go to stdout.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

// =============================================================================
// Exit codes
// =============================================================================

/// The scan ran to completion (with or without matches).
pub const EXIT_OK: i32 = 0;

/// No candidate log files were found under the root.
pub const EXIT_NO_FILES: i32 = 1;

/// Invalid arguments, unusable root directory, or a failed export.
pub const EXIT_FAILURE: i32 = 2;
