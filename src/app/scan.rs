// LogSift - app/scan.rs
//
// Per-file scan orchestration. Opens each classified file in order, hands it
// to the line loop in core::scan, and reports every step to a progress
// consumer.
//
// Error policy:
//   - Open and read failures are per-file and non-fatal; the scan moves on.
//   - Matches emitted before a mid-file read failure are kept.
//   - The consumer may return `Break` (e.g. stdout closed) to end the scan.
//
// Single-threaded: one file handle is open at a time and is dropped before
// the next file is opened.

use crate::core::filter::LineFilter;
use crate::core::model::{LogFile, ScanProgress, ScanSummary};
use crate::core::parser::TimestampExtractor;
use crate::core::scan::scan_reader;
use crate::platform::fs;
use crate::util::constants;
use crate::util::error::ScanError;
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::time::Instant;

/// Classify each discovered path by its name.
pub fn classify_files(paths: Vec<PathBuf>) -> Vec<LogFile> {
    paths
        .into_iter()
        .map(|path| {
            let file = LogFile::classify(path);
            tracing::debug!(
                file = %file.path().display(),
                log_type = %file.log_type(),
                "Classified file"
            );
            file
        })
        .collect()
}

/// Scan `files` in order, reporting progress to `on_progress`.
///
/// Returns the totals once every file has been attempted, or as soon as
/// `on_progress` returns `Break`.
pub fn run_scan<F>(
    files: &[LogFile],
    filter: &LineFilter,
    extractor: &TimestampExtractor,
    mut on_progress: F,
) -> ScanSummary
where
    F: FnMut(&ScanProgress<'_>) -> ControlFlow<()>,
{
    let scan_start = Instant::now();
    let mut summary = ScanSummary::default();

    macro_rules! emit {
        ($event:expr) => {
            if on_progress(&$event).is_break() {
                tracing::debug!("Progress consumer stopped the scan");
                summary.stopped = true;
                summary.duration = scan_start.elapsed();
                return summary;
            }
        };
    }

    tracing::info!(
        files = files.len(),
        keyword = %filter.keyword,
        range_active = filter.time_range.is_active(),
        "Scan started"
    );

    for file in files {
        summary.files_attempted += 1;
        emit!(ScanProgress::FileStarted { file });

        let reader = match fs::open_log(file.path()) {
            Ok(r) => r,
            Err(source) => {
                let error = ScanError::Open {
                    path: file.path().to_path_buf(),
                    source,
                };
                tracing::debug!(error = %error, "File open failed");
                summary.files_failed += 1;
                emit!(ScanProgress::FileFailed { error: &error });
                continue;
            }
        };

        let scan = scan_reader(reader, file, filter, extractor, |record| {
            tracing::trace!(
                file = %record.path.display(),
                line = record.line_number,
                text = preview(&record.line),
                "Match"
            );
            on_progress(&ScanProgress::Matched { record })
        });
        summary.absorb(&scan.stats);

        if scan.stopped {
            tracing::debug!(file = %file.path().display(), "Progress consumer stopped the scan");
            summary.stopped = true;
            summary.duration = scan_start.elapsed();
            return summary;
        }

        if let Some(failure) = scan.failure {
            let error = ScanError::Read {
                path: file.path().to_path_buf(),
                line_number: failure.after_line,
                source: failure.source,
            };
            tracing::debug!(error = %error, "File read failed");
            summary.files_failed += 1;
            emit!(ScanProgress::FileFailed { error: &error });
        }

        tracing::debug!(
            file = %file.path().display(),
            lines = scan.stats.lines_read,
            untimed = scan.stats.untimed_lines,
            out_of_range = scan.stats.lines_out_of_range,
            matches = scan.stats.matches,
            "File scanned"
        );
        emit!(ScanProgress::FileCompleted {
            file,
            stats: scan.stats,
        });
    }

    summary.duration = scan_start.elapsed();
    tracing::info!(
        files = summary.files_attempted,
        failed = summary.files_failed,
        lines = summary.lines_read,
        matches = summary.matches,
        "Scan complete"
    );
    summary
}

/// First `DEBUG_MAX_LINE_PREVIEW` characters of `line`.
fn preview(line: &str) -> &str {
    match line.char_indices().nth(constants::DEBUG_MAX_LINE_PREVIEW) {
        Some((idx, _)) => &line[..idx],
        None => line,
    }
}
