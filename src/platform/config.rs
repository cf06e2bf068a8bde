// LogSift - platform/config.rs
//
// Config directory resolution and config.toml loading with startup
// validation. Uses the `directories` crate for XDG (Linux), AppData
// (Windows), Library (macOS) compliance.
//
// Every problem with the file is non-fatal: the offending value falls back
// to its default and a ConfigError is returned for the caller to report.
//
// Values are validated here but kept in platform-neutral form; the app and
// entry point map them onto scan and presentation types.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Default location of `config.toml`.
///
/// Falls back to the current directory if platform dirs cannot be determined.
pub fn default_config_path() -> PathBuf {
    match ProjectDirs::from("", "", constants::APP_ID) {
        Some(dirs) => dirs.config_dir().join(constants::CONFIG_FILE_NAME),
        None => {
            tracing::warn!("Could not determine platform directories, using current directory");
            PathBuf::from(".").join(constants::CONFIG_FILE_NAME)
        }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    pub discovery: DiscoverySection,
    pub filter: FilterSection,
    pub parsing: ParsingSection,
    pub output: OutputSection,
    pub logging: LoggingSection,
}

/// `[discovery]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct DiscoverySection {
    /// Maximum directory recursion depth.
    pub max_depth: Option<usize>,
}

/// `[filter]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct FilterSection {
    /// "include" or "exclude".
    pub untimed_lines: Option<String>,
}

/// `[parsing]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ParsingSection {
    /// Year assumed for syslog timestamps.
    pub syslog_year: Option<i32>,
}

/// `[output]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// "auto", "always" or "never".
    pub color: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub max_depth: Option<usize>,
    /// `untimed_lines = "exclude"`: drop untimed lines while a range is active.
    pub strict_time: bool,
    /// None = current year.
    pub syslog_year: Option<i32>,
    /// Lowercased, one of `COLOR_MODES`. None = auto.
    pub color: Option<String>,
    pub log_level: Option<String>,
}

/// Load and validate `config.toml` at `config_path`.
///
/// A missing file yields defaults silently unless `explicit` is set (the user
/// named the file on the command line), in which case it is reported.
pub fn load_config(config_path: &Path, explicit: bool) -> (AppConfig, Vec<ConfigError>) {
    let mut problems: Vec<ConfigError> = Vec::new();

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && !explicit => {
            tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
            return (AppConfig::default(), problems);
        }
        Err(e) => {
            problems.push(ConfigError::Io {
                path: config_path.to_path_buf(),
                source: e,
            });
            return (AppConfig::default(), problems);
        }
    };

    let (config, mut value_problems) = match parse_config(&content) {
        Ok(parsed) => parsed,
        Err(source) => {
            problems.push(ConfigError::TomlParse {
                path: config_path.to_path_buf(),
                source,
            });
            return (AppConfig::default(), problems);
        }
    };
    problems.append(&mut value_problems);

    tracing::info!(
        path = %config_path.display(),
        problems = problems.len(),
        "Loaded config.toml"
    );
    (config, problems)
}

/// Parse and validate config text.
///
/// Returns `Err` only when the TOML itself is malformed; out-of-range values
/// are reported alongside the (defaulted) config.
pub fn parse_config(content: &str) -> Result<(AppConfig, Vec<ConfigError>), toml::de::Error> {
    let raw: RawConfig = toml::from_str(content)?;
    let mut problems = Vec::new();
    let mut config = AppConfig::default();

    if let Some(depth) = raw.discovery.max_depth {
        if (1..=constants::ABSOLUTE_MAX_DEPTH).contains(&depth) {
            config.max_depth = Some(depth);
        } else {
            problems.push(out_of_range(
                "discovery.max_depth",
                depth,
                format!("1-{}", constants::ABSOLUTE_MAX_DEPTH),
            ));
        }
    }

    if let Some(ref mode) = raw.filter.untimed_lines {
        match mode.to_lowercase().as_str() {
            "include" => config.strict_time = false,
            "exclude" => config.strict_time = true,
            _ => problems.push(out_of_range(
                "filter.untimed_lines",
                mode,
                "\"include\" or \"exclude\"".to_string(),
            )),
        }
    }

    if let Some(year) = raw.parsing.syslog_year {
        if (constants::MIN_SYSLOG_YEAR..=constants::MAX_SYSLOG_YEAR).contains(&year) {
            config.syslog_year = Some(year);
        } else {
            problems.push(out_of_range(
                "parsing.syslog_year",
                year,
                format!("{}-{}", constants::MIN_SYSLOG_YEAR, constants::MAX_SYSLOG_YEAR),
            ));
        }
    }

    if let Some(ref color) = raw.output.color {
        let color = color.trim().to_lowercase();
        if constants::COLOR_MODES.contains(&color.as_str()) {
            config.color = Some(color);
        } else {
            problems.push(out_of_range(
                "output.color",
                color,
                constants::COLOR_MODES.join(", "),
            ));
        }
    }

    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            problems.push(out_of_range(
                "logging.level",
                level,
                "error, warn, info, debug, trace".to_string(),
            ));
        }
    }

    Ok((config, problems))
}

fn out_of_range(field: &str, value: impl ToString, expected: String) -> ConfigError {
    ConfigError::ValueOutOfRange {
        field: field.to_string(),
        value: value.to_string(),
        expected,
    }
}
