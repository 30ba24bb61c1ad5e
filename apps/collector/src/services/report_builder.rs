//! Aggregation of converted results into one build report.

use tracing::info;

use crate::models::{Report, TestResultFile};

/// Accumulates results in discovery order under one build slug.
#[derive(Debug)]
pub struct ReportBuilder {
    build_slug: String,
    test_results: Vec<TestResultFile>,
}

impl ReportBuilder {
    /// Start an empty report.
    pub fn new(build_slug: impl Into<String>) -> Self {
        ReportBuilder {
            build_slug: build_slug.into(),
            test_results: Vec::new(),
        }
    }

    /// Append one result.
    pub fn push(&mut self, result: TestResultFile) {
        self.test_results.push(result);
    }

    /// Append results, keeping their order.
    pub fn extend(&mut self, results: impl IntoIterator<Item = TestResultFile>) {
        self.test_results.extend(results);
    }

    /// Number of results collected so far.
    pub fn len(&self) -> usize {
        self.test_results.len()
    }

    /// Finish aggregation.
    pub fn finish(self) -> Report {
        info!(
            "Report for build {} assembled with {} results",
            self.build_slug,
            self.len()
        );
        Report {
            build_slug: self.build_slug,
            test_results: self.test_results,
        }
    }
}
