//! Xcode `TestSummaries.plist` schema.
//!
//! ```text
//! TestableSummaries            one per test bundle (becomes a <testsuite>)
//!   TestName
//!   Tests                      test groups
//!     Subtests                 nested Subtests repeat until the leaf tests
//!       TestIdentifier
//!       TestStatus
//!       Duration
//!       FailureSummaries
//!         FileName
//!         LineNumber
//!         Message
//! ```
//!
//! Keys not listed here are ignored, and listed keys that are missing default to empty.

use serde::Deserialize;

/// Root of a test summaries property list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TestSummaries {
    #[serde(default)]
    pub testable_summaries: Vec<TestableSummary>,
}

/// Results of one test bundle.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TestableSummary {
    #[serde(default)]
    pub test_name: String,
    #[serde(default)]
    pub tests: Vec<TestGroup>,
}

/// Top-level entry under `Tests`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TestGroup {
    #[serde(default)]
    pub subtests: Vec<SubTest>,
}

/// A node of the sub-test tree. Only leaf nodes carry meaningful status and failures.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SubTest {
    #[serde(default)]
    pub test_identifier: String,
    #[serde(default)]
    pub test_status: String,
    /// Seconds
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub failure_summaries: Vec<FailureSummary>,
    #[serde(default)]
    pub subtests: Vec<SubTest>,
}

impl SubTest {
    /// Parsed `TestStatus`.
    pub fn status(&self) -> XcodeTestStatus {
        XcodeTestStatus::parse(&self.test_status)
    }
}

/// One failure diagnostic attached to a test.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FailureSummary {
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub line_number: i64,
    #[serde(default)]
    pub message: String,
}

/// Test outcome as reported by Xcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XcodeTestStatus {
    Success,
    Failure,
    Skipped,
    Other,
}

impl XcodeTestStatus {
    /// Parse from the `TestStatus` value.
    pub fn parse(s: &str) -> Self {
        match s {
            "Success" => Self::Success,
            "Failure" => Self::Failure,
            "Skipped" => Self::Skipped,
            _ => Self::Other,
        }
    }
}
