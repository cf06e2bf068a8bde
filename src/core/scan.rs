// LogSift - core/scan.rs
//
// Line loop for a single log source. Accepts any `BufRead`, so the same code
// serves files, in-memory buffers, and tests. Opening files is the app
// layer's job (app::scan).
//
// Lines are decoded lossily: a stray invalid byte never ends the file early.
// `\n`, `\r\n` and a lone `\r` all end a line.

use crate::core::filter::{LineFilter, Verdict};
use crate::core::model::{FileStats, LogFile, MatchRecord};
use crate::core::parser::TimestampExtractor;
use crate::util::constants;
use std::io::{self, BufRead};
use std::ops::ControlFlow;

/// A read error that stopped a reader part-way through.
#[derive(Debug)]
pub struct ReadFailure {
    /// Number of lines successfully read before the failure.
    pub after_line: u64,
    pub source: io::Error,
}

/// Result of scanning one reader.
#[derive(Debug)]
pub struct ReaderScan {
    pub stats: FileStats,
    /// Set when reading stopped before end of input.
    pub failure: Option<ReadFailure>,
    /// Set when the match consumer asked to stop.
    pub stopped: bool,
}

/// Scan every line of `reader` as belonging to `file`.
///
/// `on_match` is called once per emitted record, in line order, and may
/// return `Break` to stop reading. Matches produced before a read failure are
/// still delivered.
pub fn scan_reader<R, F>(
    mut reader: R,
    file: &LogFile,
    filter: &LineFilter,
    extractor: &TimestampExtractor,
    mut on_match: F,
) -> ReaderScan
where
    R: BufRead,
    F: FnMut(&MatchRecord) -> ControlFlow<()>,
{
    let log_type = file.log_type();
    let mut stats = FileStats::default();
    let mut buf: Vec<u8> = Vec::with_capacity(constants::LINE_BUFFER_CAPACITY);

    loop {
        buf.clear();
        match read_line_bytes(&mut reader, &mut buf) {
            Ok(false) => break,
            Ok(true) => {}
            Err(source) => {
                return ReaderScan {
                    stats,
                    failure: Some(ReadFailure {
                        after_line: stats.lines_read,
                        source,
                    }),
                    stopped: false,
                };
            }
        }

        stats.lines_read += 1;
        let line = String::from_utf8_lossy(&buf);

        let timestamp = extractor.extract(&line, log_type);
        if timestamp.is_none() {
            stats.untimed_lines += 1;
        }

        match filter.check(&line, timestamp) {
            Verdict::Match => {
                stats.matches += 1;
                let record = MatchRecord {
                    path: file.path().to_path_buf(),
                    line_number: stats.lines_read,
                    log_type,
                    timestamp,
                    line: line.into_owned(),
                };
                if on_match(&record).is_break() {
                    return ReaderScan {
                        stats,
                        failure: None,
                        stopped: true,
                    };
                }
            }
            Verdict::OutOfRange => {
                stats.lines_out_of_range += 1;
                tracing::trace!(
                    file = %file.path().display(),
                    line = stats.lines_read,
                    "Line outside time range"
                );
            }
            Verdict::NoKeyword => {}
        }
    }

    ReaderScan {
        stats,
        failure: None,
        stopped: false,
    }
}

/// Read one line into `buf` without its terminator.
///
/// Returns `false` at end of input with nothing read. A final line without a
/// terminator is still a line.
fn read_line_bytes<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<bool> {
    let mut read_any = false;
    loop {
        let available = match reader.fill_buf() {
            Ok(chunk) => chunk,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if available.is_empty() {
            return Ok(read_any);
        }
        read_any = true;

        match available.iter().position(|&b| b == b'\n' || b == b'\r') {
            Some(idx) => {
                let terminator = available[idx];
                buf.extend_from_slice(&available[..idx]);
                reader.consume(idx + 1);
                if terminator == b'\r' {
                    skip_line_feed(reader);
                }
                return Ok(true);
            }
            None => {
                let len = available.len();
                buf.extend_from_slice(available);
                reader.consume(len);
            }
        }
    }
}

/// Swallow the `\n` of a `\r\n` pair split across buffer refills.
/// A read error here is left for the next line read to report.
fn skip_line_feed<R: BufRead>(reader: &mut R) {
    loop {
        match reader.fill_buf() {
            Ok(next) => {
                if next.first() == Some(&b'\n') {
                    reader.consume(1);
                }
                return;
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(_) => return,
        }
    }
}
