// LogSift - ui/output.rs
//
// Console presentation of scan progress and results. The core hands over
// structured data; this is the only place that decides how it looks.

use crate::core::model::{LogFile, MatchRecord, ScanProgress, ScanSummary};
use crate::ui::theme::{self, paint};
use crate::util::error::ScanError;
use std::io::{self, Write};
use std::path::Path;

/// `[<path>] <line with surrounding whitespace trimmed>`
pub fn format_match(record: &MatchRecord) -> String {
    format!("[{}] {}", record.path.display(), record.line.trim())
}

/// Writes user-facing output to a single stream.
pub struct Presenter<W: Write> {
    out: W,
    color: bool,
}

impl<W: Write> Presenter<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn header(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", paint(text, theme::HEADER, self.color))
    }

    pub fn files_found(&mut self, count: usize, keyword: &str) -> io::Result<()> {
        self.header(&format!(
            "Found {count} log file(s). Searching for '{keyword}'..."
        ))
    }

    pub fn no_files(&mut self) -> io::Result<()> {
        writeln!(self.out, "No log files found in the provided directory.")
    }

    pub fn file_started(&mut self, file: &LogFile) -> io::Result<()> {
        self.header(&format!(
            "Parsing '{}' as {} logs.",
            file.path().display(),
            file.log_type()
        ))
    }

    pub fn matched(&mut self, record: &MatchRecord) -> io::Result<()> {
        writeln!(self.out, "{}", format_match(record))
    }

    pub fn file_failed(&mut self, error: &ScanError) -> io::Result<()> {
        let text = format!("Error reading {}: {}", error.path().display(), error.cause());
        writeln!(self.out, "{}", paint(&text, theme::ERROR, self.color))
    }

    pub fn warning(&mut self, message: &str) -> io::Result<()> {
        let text = format!("Warning: {message}");
        writeln!(self.out, "{}", paint(&text, theme::WARNING, self.color))
    }

    pub fn error(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{}", paint(message, theme::ERROR, self.color))
    }

    /// Render one engine event.
    pub fn progress(&mut self, event: &ScanProgress<'_>) -> io::Result<()> {
        match event {
            ScanProgress::FileStarted { file } => self.file_started(file),
            ScanProgress::Matched { record } => self.matched(record),
            ScanProgress::FileFailed { error } => self.file_failed(error),
            ScanProgress::FileCompleted { .. } => Ok(()),
        }
    }

    pub fn exported(&mut self, count: usize, path: &Path) -> io::Result<()> {
        writeln!(self.out, "Exported {count} match(es) to '{}'.", path.display())
    }

    pub fn summary(&mut self, summary: &ScanSummary) -> io::Result<()> {
        self.header(&format!(
            "Done: {} match(es) in {} file(s), {} line(s) read, {} file(s) failed; \
             {} line(s) without timestamp, {} outside the time range ({:.2?}).",
            summary.matches,
            summary.files_attempted,
            summary.lines_read,
            summary.files_failed,
            summary.untimed_lines,
            summary.lines_out_of_range,
            summary.duration
        ))
    }
}
