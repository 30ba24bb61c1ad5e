//! Shared helpers for collection tests.

use std::cell::RefCell;
use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use test_results_uploader::config::{Config, XcodeSelection};
use test_results_uploader::error::AppResult;
use test_results_uploader::models::Report;
use test_results_uploader::services::ReportSink;

/// Build slug used by every test configuration.
pub const TEST_BUILD_SLUG: &str = "test-build-slug";

/// Configuration pointing at scratch directories.
pub fn test_config(source_dir: &Path, derived_data_dir: &Path) -> Config {
    Config {
        source_dir: source_dir.to_path_buf(),
        build_slug: TEST_BUILD_SLUG.to_string(),
        derived_data_dir: derived_data_dir.to_path_buf(),
        endpoint: "http://127.0.0.1/results".to_string(),
        http_timeout: Duration::from_secs(5),
        xcode_selection: XcodeSelection::All,
    }
}

/// Write `content` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: impl AsRef<[u8]>) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// Sink that records payloads instead of sending them.
pub struct RecordingSink {
    payloads: RefCell<Vec<Vec<u8>>>,
    response: String,
}

impl RecordingSink {
    pub fn new(response: &str) -> Self {
        RecordingSink {
            payloads: RefCell::new(Vec::new()),
            response: response.to_string(),
        }
    }

    pub fn send_count(&self) -> usize {
        self.payloads.borrow().len()
    }

    /// Decode the last payload back into a report.
    pub fn last_report(&self) -> Report {
        let payloads = self.payloads.borrow();
        let payload = payloads.last().expect("nothing was sent");
        serde_json::from_slice(payload).expect("payload is not a valid report")
    }
}

impl ReportSink for RecordingSink {
    fn send(&self, payload: &[u8]) -> AppResult<String> {
        self.payloads.borrow_mut().push(payload.to_vec());
        Ok(self.response.clone())
    }
}

// === Xcode plist fixtures ===

/// A leaf test dictionary with the given failures as `(file, line, message)`.
pub fn plist_leaf(id: &str, status: &str, duration: f64, failures: &[(&str, i64, &str)]) -> String {
    let summaries: String = failures
        .iter()
        .map(|(file, line, message)| {
            format!(
                "<dict><key>FileName</key><string>{}</string>\
                 <key>LineNumber</key><integer>{}</integer>\
                 <key>Message</key><string>{}</string></dict>",
                file, line, message
            )
        })
        .collect();

    format!(
        "<dict><key>TestIdentifier</key><string>{}</string>\
         <key>TestStatus</key><string>{}</string>\
         <key>Duration</key><real>{}</real>\
         <key>FailureSummaries</key><array>{}</array></dict>",
        id, status, duration, summaries
    )
}

/// An intermediate node wrapping `children`.
pub fn plist_node(id: &str, children: &[String]) -> String {
    format!(
        "<dict><key>TestIdentifier</key><string>{}</string>\
         <key>Subtests</key><array>{}</array></dict>",
        id,
        children.concat()
    )
}

/// A testable summary whose `Tests` holds one group per entry of `groups`.
pub fn plist_suite(name: &str, groups: &[Vec<String>]) -> String {
    let tests: String = groups
        .iter()
        .map(|subtests| format!("<dict><key>Subtests</key><array>{}</array></dict>", subtests.concat()))
        .collect();

    format!(
        "<dict><key>TestName</key><string>{}</string><key>Tests</key><array>{}</array></dict>",
        name, tests
    )
}

/// A complete test summaries document.
pub fn plist_document(suites: &[String]) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <!DOCTYPE plist PUBLIC \"-//Apple//DTD PLIST 1.0//EN\" \"http://www.apple.com/DTDs/PropertyList-1.0.dtd\">\n\
         <plist version=\"1.0\"><dict>\
         <key>FormatVersion</key><string>1.2</string>\
         <key>TestableSummaries</key><array>{}</array>\
         </dict></plist>\n",
        suites.concat()
    )
}

// === HTTP ===

/// Serve exactly one request with a canned response.
///
/// Returns the base URL and a handle yielding the raw request bytes.
pub fn serve_once(status_line: &str, body: &str) -> (String, JoinHandle<Vec<u8>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/results", listener.local_addr().unwrap());
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_line,
        body.len(),
        body
    );

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let request = read_request(&mut stream);
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        request
    });

    (url, handle)
}

fn read_request(stream: &mut impl Read) -> Vec<u8> {
    let mut request = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).unwrap();
        assert!(n > 0, "connection closed before headers were complete");
        request.extend_from_slice(&chunk[..n]);
        if let Some(pos) = request.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let headers = String::from_utf8_lossy(&request[..header_end]).to_lowercase();
    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .map(|value| value.trim().parse::<usize>().unwrap())
        .unwrap_or(0);

    while request.len() < header_end + content_length {
        let n = stream.read(&mut chunk).unwrap();
        if n == 0 {
            break;
        }
        request.extend_from_slice(&chunk[..n]);
    }

    request
}

/// Split a raw request into its lowercased header block and body.
pub fn split_request(request: &[u8]) -> (String, Vec<u8>) {
    let pos = request
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("request has no header terminator");
    (
        String::from_utf8_lossy(&request[..pos]).to_lowercase(),
        request[pos + 4..].to_vec(),
    )
}
