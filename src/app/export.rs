// LogSift - app/export.rs
//
// Writes collected matches to an export file. The format follows the file
// extension; serialisation itself lives in core::export.

use crate::core::export::{export_csv, export_json, ExportFormat};
use crate::core::model::MatchRecord;
use crate::platform::fs;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Create `path` and export `matches` into it. Returns the number written.
pub fn export_to_file(matches: &[MatchRecord], path: &Path) -> Result<usize, ExportError> {
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = fs::create_output(path).map_err(io_err)?;
    let format = ExportFormat::from_path(path);
    let count = match format {
        ExportFormat::Csv => export_csv(matches, &mut writer, path)?,
        ExportFormat::Json => export_json(matches, &mut writer, path)?,
    };
    writer.flush().map_err(io_err)?;

    tracing::info!(path = %path.display(), ?format, count, "Export written");
    Ok(count)
}
