//! I/O boundary traits for testability
//!
//! These traits abstract where input lines come from, allowing services
//! to be tested with in-memory implementations.

use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Source of declaration lines.
pub trait InputSource: Send + Sync {
    /// Read all lines of `path` without their line terminators.
    fn read_lines(&self, path: &Path) -> io::Result<Vec<String>>;
}

/// Real input: files on disk, `-` for stdin.
///
/// Invalid UTF-8 is replaced with U+FFFD, so a bad line surfaces as a
/// malformed line rather than an unreadable input.
pub struct RealInputSource;

impl InputSource for RealInputSource {
    fn read_lines(&self, path: &Path) -> io::Result<Vec<String>> {
        if path == Path::new("-") {
            return read_lossy(io::stdin().lock());
        }
        let file = std::fs::File::open(path)?;
        read_lossy(BufReader::new(file))
    }
}

/// Split on `\n`, dropping one trailing `\r` per line.
fn read_lossy<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    reader
        .split(b'\n')
        .map(|line| {
            let mut bytes = line?;
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        })
        .collect()
}
