// LogSift - core/registry.rs
//
// Fixed table of timestamp patterns, one per log type.
// Compiled in; there is no runtime registration.

use crate::core::model::LogType;

/// Where in a line the timestamp text lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extraction {
    /// The first `n` whitespace-delimited tokens, joined by single spaces.
    LeadingTokens(usize),

    /// The first whitespace token inside the first `[...]` group.
    BracketedGroup,

    /// The string value of a top-level key of a JSON object line.
    JsonField(&'static str),
}

/// Layout and extraction rule for one log type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampPattern {
    pub log_type: LogType,

    /// chrono format string the extracted text must match exactly.
    pub layout: &'static str,

    pub extraction: Extraction,

    /// True when the layout carries no year and one must be assumed.
    pub yearless: bool,
}

static PATTERNS: [TimestampPattern; 4] = [
    TimestampPattern {
        log_type: LogType::Default,
        layout: "%Y-%m-%d %H:%M:%S",
        extraction: Extraction::LeadingTokens(2),
        yearless: false,
    },
    // The "+ZZZZ" offset after the space is never part of the extracted token.
    TimestampPattern {
        log_type: LogType::Nginx,
        layout: "%d/%b/%Y:%H:%M:%S",
        extraction: Extraction::BracketedGroup,
        yearless: false,
    },
    TimestampPattern {
        log_type: LogType::Grafana,
        layout: "%Y-%m-%dT%H:%M:%SZ",
        extraction: Extraction::JsonField("t"),
        yearless: false,
    },
    TimestampPattern {
        log_type: LogType::Linux,
        layout: "%b %d %H:%M:%S",
        extraction: Extraction::LeadingTokens(3),
        yearless: true,
    },
];

/// Look up the pattern for a log type.
pub fn pattern_for(log_type: LogType) -> &'static TimestampPattern {
    match log_type {
        LogType::Default => &PATTERNS[0],
        LogType::Nginx => &PATTERNS[1],
        LogType::Grafana => &PATTERNS[2],
        LogType::Linux => &PATTERNS[3],
    }
}

impl LogType {
    /// Shorthand for `registry::pattern_for(self)`.
    pub fn pattern(self) -> &'static TimestampPattern {
        pattern_for(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_log_type_has_its_own_pattern() {
        for t in LogType::all() {
            assert_eq!(pattern_for(*t).log_type, *t);
        }
        assert_eq!(PATTERNS.len(), LogType::all().len());
    }

    #[test]
    fn test_only_linux_is_yearless() {
        for p in LogType::all().iter().map(|t| t.pattern()) {
            assert_eq!(p.yearless, p.log_type == LogType::Linux);
            assert_eq!(p.yearless, !p.layout.contains("%Y"));
        }
    }

    #[test]
    fn test_unknown_tag_resolves_to_default_pattern() {
        let p = LogType::from_tag("apache").pattern();
        assert_eq!(p.layout, "%Y-%m-%d %H:%M:%S");
        assert_eq!(p.extraction, Extraction::LeadingTokens(2));
    }
}
