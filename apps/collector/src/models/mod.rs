//! Domain models for collected test results.

pub mod junit;
pub mod report;
pub mod xcode;

// Re-export commonly used types
pub use junit::{JunitCase, JunitSuite};
pub use report::{Report, TestResultFile};
pub use xcode::{FailureSummary, SubTest, TestGroup, TestSummaries, TestableSummary, XcodeTestStatus};
