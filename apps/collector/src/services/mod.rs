//! Collection services.

pub mod classifier;
pub mod conversion;
pub mod discovery;
pub mod pipeline;
pub mod reduction;
pub mod report_builder;
pub mod transport;

pub use pipeline::{collect_report, run};
pub use report_builder::ReportBuilder;
pub use transport::{HttpSink, ReportSink};
