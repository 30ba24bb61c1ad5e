//! Report model sent to the results endpoint.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::AppResult;

/// All results collected for one build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Build identifier
    pub build_slug: String,
    /// Results in discovery order
    pub test_results: Vec<TestResultFile>,
}

impl Report {
    /// Serialize the report as the upload payload.
    ///
    /// Field order is fixed by the struct definitions and the output is indented
    /// with a single space per level. Result content is base64 encoded.
    pub fn to_json_payload(&self) -> AppResult<Vec<u8>> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;
        Ok(buf)
    }
}

/// One artifact's contribution to the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResultFile {
    /// Path of the source artifact, even when content was converted
    pub path: String,
    /// Original bytes, or a converted JUnit document
    #[serde(with = "base64_content")]
    pub content: Vec<u8>,
}

impl TestResultFile {
    /// Create a result for the artifact at `path`.
    pub fn new(path: &Path, content: Vec<u8>) -> Self {
        TestResultFile {
            path: path.to_string_lossy().into_owned(),
            content,
        }
    }
}

mod base64_content {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
