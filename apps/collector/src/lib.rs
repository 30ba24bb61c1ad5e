//! Test results uploader library.
//!
//! Finds JUnit XML reports and Xcode test summaries, normalizes them into a
//! single build report, and uploads that report.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
