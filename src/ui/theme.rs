// LogSift - ui/theme.rs
//
// Terminal colour scheme and the colour on/off decision.
// No dependencies on app state or business logic.

use std::str::FromStr;

/// ANSI escape sequences.
pub const RESET: &str = "\x1b[0m";
/// Bright magenta: progress headers and summaries.
pub const HEADER: &str = "\x1b[95m";
/// Bright red: per-file errors and fatal messages.
pub const ERROR: &str = "\x1b[91m";
/// Yellow: non-fatal warnings.
pub const WARNING: &str = "\x1b[33m";

/// When to colour output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Colour only when writing to a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve against whether the destination is a terminal.
    pub fn enabled(self, is_terminal: bool) -> bool {
        match self {
            ColorMode::Auto => is_terminal,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            other => Err(format!(
                "unknown colour mode '{other}' (expected auto, always or never)"
            )),
        }
    }
}

/// Wrap `text` in `style` when `enabled`.
pub fn paint(text: &str, style: &str, enabled: bool) -> String {
    if enabled {
        format!("{style}{text}{RESET}")
    } else {
        text.to_string()
    }
}
