// LogSift - core/classify.rs
//
// Filename-based log type classification. No file contents are read: two
// files with identical content but different names may get different types.

use crate::core::model::LogType;
use std::path::Path;

/// Ordered rules: the first rule with any matching marker wins.
const RULES: &[(&[&str], LogType)] = &[
    (&["nginx"], LogType::Nginx),
    (&["grafana"], LogType::Grafana),
    (&["syslog", "auth.log"], LogType::Linux),
];

/// Infer the log type of a file from its full path (case-insensitive).
pub fn classify(path: &Path) -> LogType {
    let lower = path.to_string_lossy().to_lowercase();
    RULES
        .iter()
        .find(|(markers, _)| markers.iter().any(|m| lower.contains(m)))
        .map(|(_, log_type)| *log_type)
        .unwrap_or_default()
}
