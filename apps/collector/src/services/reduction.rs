//! Collapses Xcode's nested sub-test levels down to the leaf tests.
//!
//! Xcode wraps each test in several structurally redundant levels (bundle,
//! class, ...) before reaching the nodes that carry status and failures. The
//! reduction follows the first sibling downwards, assuming every sibling at a
//! level has the same shape. Non-leaf siblings of a leaf-level first node are
//! dropped without notice.

use crate::models::{SubTest, TestSummaries};

/// Descend through the first sibling until a level without children is reached.
///
/// An empty sequence is returned unchanged.
pub fn reduce_subtests(subtests: Vec<SubTest>) -> Vec<SubTest> {
    let mut level = subtests;
    loop {
        let descend = level.first().is_some_and(|first| !first.subtests.is_empty());
        if !descend {
            return level;
        }
        level = level.swap_remove(0).subtests;
    }
}

/// Reduce every test group in every testable summary.
pub fn reduce_summaries(mut summaries: TestSummaries) -> TestSummaries {
    for summary in &mut summaries.testable_summaries {
        for group in &mut summary.tests {
            group.subtests = reduce_subtests(std::mem::take(&mut group.subtests));
        }
    }
    summaries
}
