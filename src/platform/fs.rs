// LogSift - platform/fs.rs
//
// Filesystem helpers used by the app layer.

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::Path;

/// Open a log file for buffered line reading.
///
/// The returned reader owns the handle; dropping it closes the file.
pub fn open_log(path: &Path) -> io::Result<BufReader<File>> {
    let file = File::open(path)?;
    tracing::trace!(path = %path.display(), "Opened log file");
    Ok(BufReader::new(file))
}

/// Create (or truncate) an output file for buffered writing.
pub fn create_output(path: &Path) -> io::Result<BufWriter<File>> {
    let file = File::create(path)?;
    tracing::trace!(path = %path.display(), "Created output file");
    Ok(BufWriter::new(file))
}
