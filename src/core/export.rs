// LogSift - core/export.rs
//
// CSV and JSON export of match records.
// Core layer: writes to any Write trait object; creating the file is the
// app layer's job (app::export).

use crate::core::model::MatchRecord;
use crate::util::constants;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Output format for an export file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// `.json` (any case) selects JSON; everything else is CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Csv,
        }
    }
}

/// Export match records to CSV.
///
/// Writes: file, line, type, timestamp, text
pub fn export_csv<W: Write>(
    matches: &[MatchRecord],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    check_size(matches)?;
    let csv_err = |source| ExportError::Csv {
        path: export_path.to_path_buf(),
        source,
    };

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(["file", "line", "type", "timestamp", "text"])
        .map_err(csv_err)?;

    for record in matches {
        let ts = record
            .timestamp
            .map(|t| t.format("%Y-%m-%dT%H:%M:%S").to_string())
            .unwrap_or_default();

        let path = record.path.display().to_string();
        let line_number = record.line_number.to_string();

        csv_writer
            .write_record([
                path.as_str(),
                line_number.as_str(),
                record.log_type.tag(),
                ts.as_str(),
                record.line.as_str(),
            ])
            .map_err(csv_err)?;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(matches.len())
}

/// Export match records to JSON (array of objects).
pub fn export_json<W: Write>(
    matches: &[MatchRecord],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    check_size(matches)?;
    serde_json::to_writer_pretty(writer, matches).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(matches.len())
}

fn check_size(matches: &[MatchRecord]) -> Result<(), ExportError> {
    if matches.len() > constants::MAX_EXPORT_MATCHES {
        return Err(ExportError::TooManyMatches {
            count: matches.len(),
            max: constants::MAX_EXPORT_MATCHES,
        });
    }
    Ok(())
}
