//! Result file classification.
//!
//! JUnit reports are recognized by content: a `<testsuite` tag somewhere in the
//! first [`JUNIT_SCAN_LINES`] lines. Each line read stops after
//! [`JUNIT_MAX_LINE_BYTES`]; the rest of a longer line counts as the next line,
//! so at most `JUNIT_SCAN_LINES * JUNIT_MAX_LINE_BYTES` bytes are read per file.
//! Xcode summaries are recognized by name.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::XcodeSelection;
use crate::error::{AppError, AppResult};

/// Number of leading lines inspected for the JUnit marker.
pub const JUNIT_SCAN_LINES: usize = 10;

/// Upper bound on the bytes consumed by a single line read.
pub const JUNIT_MAX_LINE_BYTES: usize = 4096;

/// Marker identifying a JUnit test suite document.
pub const JUNIT_MARKER: &[u8] = b"<testsuite";

/// File name suffix of Xcode test summaries, compared case-insensitively.
pub const XCODE_SUMMARY_SUFFIX: &str = "testsummaries.plist";

/// Keep the files that look like JUnit test suites.
///
/// Fails on the first file that cannot be opened or read.
pub fn filter_junit_results(paths: &[PathBuf]) -> AppResult<Vec<PathBuf>> {
    let mut accepted = Vec::new();

    for path in paths {
        if is_junit_report(path)? {
            accepted.push(path.clone());
        } else {
            debug!("Ignoring {:?}: no test suite marker", path);
        }
    }

    Ok(accepted)
}

fn is_junit_report(path: &Path) -> AppResult<bool> {
    let file = File::open(path)
        .map_err(|e| AppError::FileSystem(format!("Failed to open {:?}: {}", path, e)))?;
    let mut reader = BufReader::new(file);
    let mut line = Vec::new();

    for _ in 0..JUNIT_SCAN_LINES {
        line.clear();
        let read = (&mut reader)
            .take(JUNIT_MAX_LINE_BYTES as u64)
            .read_until(b'\n', &mut line)
            .map_err(|e| AppError::FileSystem(format!("Failed to read {:?}: {}", path, e)))?;
        if read == 0 {
            break;
        }
        if line.windows(JUNIT_MARKER.len()).any(|w| w == JUNIT_MARKER) {
            return Ok(true);
        }
    }

    Ok(false)
}

/// Keep the files named like Xcode test summaries.
pub fn filter_xcode_results(paths: &[PathBuf], selection: XcodeSelection) -> Vec<PathBuf> {
    let mut matches = paths.iter().filter(|path| is_xcode_summary(path)).cloned();

    match selection {
        XcodeSelection::First => matches.next().into_iter().collect(),
        XcodeSelection::All => matches.collect(),
    }
}

fn is_xcode_summary(path: &Path) -> bool {
    path.to_string_lossy()
        .to_lowercase()
        .ends_with(XCODE_SUMMARY_SUFFIX)
}
