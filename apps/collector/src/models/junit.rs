//! JUnit-style test suite document produced from converted results.

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::error::AppResult;

/// A `<testsuite>` document.
///
/// `failures` counts sub-tests that carried at least one failure diagnostic,
/// which can be lower than the number of cases when a test failed more than once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JunitSuite {
    pub name: String,
    pub tests: u32,
    pub failures: u32,
    pub errors: u32,
    pub skipped: u32,
    /// Elapsed time in seconds
    pub time: f64,
    pub timestamp: String,
    pub hostname: String,
    pub test_cases: Vec<JunitCase>,
}

/// A `<testcase>` entry. No failure, skipped or error message means it passed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JunitCase {
    pub name: String,
    /// `relative/path.swift:line` of the failure site
    pub class_name: String,
    /// Elapsed time in seconds
    pub time: f64,
    pub failure: Option<String>,
    pub skipped: Option<String>,
    pub error: Option<String>,
}

impl JunitSuite {
    /// Create an empty suite.
    pub fn new(name: impl Into<String>) -> Self {
        JunitSuite {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Serialize to XML without a declaration.
    pub fn to_xml(&self) -> AppResult<Vec<u8>> {
        let mut writer = Writer::new(Vec::new());

        let tests = self.tests.to_string();
        let failures = self.failures.to_string();
        let errors = self.errors.to_string();
        let skipped = self.skipped.to_string();
        let time = self.time.to_string();

        let suite = BytesStart::new("testsuite").with_attributes([
            ("name", self.name.as_str()),
            ("tests", tests.as_str()),
            ("failures", failures.as_str()),
            ("errors", errors.as_str()),
            ("skipped", skipped.as_str()),
            ("time", time.as_str()),
            ("timestamp", self.timestamp.as_str()),
        ]);
        writer.write_event(Event::Start(suite))?;

        write_text_element(&mut writer, "hostname", &self.hostname)?;

        for case in &self.test_cases {
            case.write_to(&mut writer)?;
        }

        writer.write_event(Event::End(BytesEnd::new("testsuite")))?;
        Ok(writer.into_inner())
    }
}

impl JunitCase {
    fn write_to(&self, writer: &mut Writer<Vec<u8>>) -> AppResult<()> {
        let time = self.time.to_string();
        let start = BytesStart::new("testcase").with_attributes([
            ("name", self.name.as_str()),
            ("classname", self.class_name.as_str()),
            ("time", time.as_str()),
        ]);
        writer.write_event(Event::Start(start))?;

        if let Some(ref message) = self.failure {
            write_text_element(writer, "failure", message)?;
        }
        if let Some(ref message) = self.skipped {
            write_text_element(writer, "skipped", message)?;
        }
        if let Some(ref message) = self.error {
            write_text_element(writer, "error", message)?;
        }

        writer.write_event(Event::End(BytesEnd::new("testcase")))?;
        Ok(())
    }
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> AppResult<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    if !text.is_empty() {
        writer.write_event(Event::Text(BytesText::new(text)))?;
    }
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
