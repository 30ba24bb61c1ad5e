//! Conversion of result artifacts into report entries.
//!
//! JUnit files pass through untouched. Xcode summaries are reduced to their
//! leaf tests and rewritten as one JUnit document per testable summary.

use std::path::Path;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::models::{
    JunitCase, JunitSuite, SubTest, TestResultFile, TestSummaries, TestableSummary, XcodeTestStatus,
};
use crate::services::reduction::reduce_summaries;

/// Wrap a JUnit report's bytes as a result, unmodified.
pub fn convert_junit(path: &Path) -> AppResult<TestResultFile> {
    let content = read_artifact(path)?;
    debug!("Collected JUnit report {:?} ({} bytes)", path, content.len());
    Ok(TestResultFile::new(path, content))
}

/// Convert an Xcode test summaries file into one result per testable summary.
///
/// Every result records `path` as its origin. `source_dir` is stripped from
/// failure file names to build relative class names.
pub fn convert_xcode(path: &Path, source_dir: &str) -> AppResult<Vec<TestResultFile>> {
    let bytes = read_artifact(path)?;
    let summaries: TestSummaries = plist::from_bytes(&bytes)
        .map_err(|e| AppError::Parse(format!("Failed to parse {:?}: {}", path, e)))?;

    let summaries = reduce_summaries(summaries);

    let mut results = Vec::with_capacity(summaries.testable_summaries.len());
    for summary in &summaries.testable_summaries {
        let suite = build_suite(summary, source_dir);
        info!(
            "Converted suite '{}' from {:?}: {} failed tests, {} failure cases",
            suite.name,
            path,
            suite.failures,
            suite.test_cases.len()
        );
        results.push(TestResultFile::new(path, suite.to_xml()?));
    }

    Ok(results)
}

/// Build the JUnit suite for one testable summary.
///
/// Only failing leaf tests produce cases, one per failure diagnostic.
/// `tests`, `errors`, `skipped` and `time` are left at zero.
pub fn build_suite(summary: &TestableSummary, source_dir: &str) -> JunitSuite {
    let mut suite = JunitSuite::new(summary.test_name.clone());

    for group in &summary.tests {
        for subtest in &group.subtests {
            log_status(subtest);
            if subtest.failure_summaries.is_empty() {
                continue;
            }

            suite.failures += 1;
            for failure in &subtest.failure_summaries {
                suite.test_cases.push(JunitCase {
                    name: subtest.test_identifier.clone(),
                    class_name: class_name(&failure.file_name, source_dir, failure.line_number),
                    time: subtest.duration,
                    failure: Some(failure.message.clone()),
                    ..Default::default()
                });
            }
        }
    }

    suite
}

/// `relative/path:line` locator for a failure site.
///
/// A leading `source_dir` is removed together with one following `/`. File
/// names outside `source_dir` are kept as they are.
pub fn class_name(file_name: &str, source_dir: &str, line_number: i64) -> String {
    let relative = match file_name.strip_prefix(source_dir) {
        Some(rest) if !source_dir.is_empty() => rest.strip_prefix('/').unwrap_or(rest),
        _ => file_name,
    };
    format!("{}:{}", relative, line_number)
}

fn log_status(subtest: &SubTest) {
    match subtest.status() {
        XcodeTestStatus::Failure if subtest.failure_summaries.is_empty() => debug!(
            "Test {} failed without failure summaries, no case emitted",
            subtest.test_identifier
        ),
        XcodeTestStatus::Other => debug!(
            "Test {} has unrecognized status '{}'",
            subtest.test_identifier, subtest.test_status
        ),
        _ => {}
    }
}

fn read_artifact(path: &Path) -> AppResult<Vec<u8>> {
    std::fs::read(path).map_err(|e| AppError::FileSystem(format!("Failed to read {:?}: {}", path, e)))
}
