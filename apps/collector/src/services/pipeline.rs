//! End-to-end collection: discover, classify, convert, aggregate, send.

use tracing::{debug, info};

use crate::config::Config;
use crate::error::AppResult;
use crate::models::Report;
use crate::services::classifier::{filter_junit_results, filter_xcode_results};
use crate::services::conversion::{convert_junit, convert_xcode};
use crate::services::discovery::find_files_by_extension;
use crate::services::report_builder::ReportBuilder;
use crate::services::transport::ReportSink;

/// Collect every JUnit and Xcode result into one report.
///
/// JUnit results come first, followed by Xcode results, each in discovery order.
pub fn collect_report(config: &Config) -> AppResult<Report> {
    let mut builder = ReportBuilder::new(config.build_slug.clone());

    let xml_files = find_files_by_extension(&config.source_dir, "xml");
    let junit_files = filter_junit_results(&xml_files)?;
    info!(
        "Found {} JUnit reports among {} XML files in {:?}",
        junit_files.len(),
        xml_files.len(),
        config.source_dir
    );

    for path in &junit_files {
        builder.push(convert_junit(path)?);
    }

    let plist_files = find_files_by_extension(&config.derived_data_dir, "plist");
    let xcode_files = filter_xcode_results(&plist_files, config.xcode_selection);
    info!(
        "Found {} Xcode test summaries among {} property lists in {:?} (selection: {})",
        xcode_files.len(),
        plist_files.len(),
        config.derived_data_dir,
        config.xcode_selection
    );

    let source_prefix = config.source_prefix();
    for path in &xcode_files {
        let results = convert_xcode(path, &source_prefix)?;
        debug!("{:?} produced {} suites", path, results.len());
        builder.extend(results);
    }

    Ok(builder.finish())
}

/// Collect the report, send it to `sink`, and return the sink's response.
///
/// The report is sent even when no results were found.
pub fn run(config: &Config, sink: &dyn ReportSink) -> AppResult<String> {
    let report = collect_report(config)?;
    let payload = report.to_json_payload()?;
    sink.send(&payload)
}
