//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Location of Xcode derived data relative to the user's home directory.
pub const DERIVED_DATA_PATH_IN_HOME: &str = "Library/Developer/Xcode/DerivedData";

/// Default values used when the corresponding variable is unset.
pub mod defaults {
    pub const ENDPOINT: &str = "https://frozen-brushlands-50401.herokuapp.com/results";
    pub const HTTP_TIMEOUT_SECS: u64 = 60;
}

/// Which `TestSummaries.plist` files to keep once the derived data tree has been walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum XcodeSelection {
    /// Keep only the first matching file.
    First,
    /// Keep every matching file.
    #[default]
    All,
}

impl XcodeSelection {
    /// Parse selection from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "first" => Some(Self::First),
            "all" => Some(Self::All),
            _ => None,
        }
    }
}

impl std::fmt::Display for XcodeSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::First => write!(f, "first"),
            Self::All => write!(f, "all"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Build source root, walked for JUnit XML and stripped from failure file names
    pub source_dir: PathBuf,
    /// Build identifier sent with the report
    pub build_slug: String,
    /// Directory walked for Xcode test summaries
    pub derived_data_dir: PathBuf,
    /// Upload URL
    pub endpoint: String,
    /// Connect and request timeout for the upload
    pub http_timeout: Duration,
    /// Xcode summary selection policy
    pub xcode_selection: XcodeSelection,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `BITRISE_SOURCE_DIR`: Build source root (default: current directory)
    /// - `BITRISE_BUILD_SLUG`: Build identifier - REQUIRED
    /// - `HOME`: Home directory, required unless `TRU_DERIVED_DATA_DIR` is set
    /// - `TRU_DERIVED_DATA_DIR`: Derived data directory (default: `$HOME/Library/Developer/Xcode/DerivedData`)
    /// - `TRU_ENDPOINT`: Upload URL
    /// - `TRU_HTTP_TIMEOUT_SECS`: Upload timeout in seconds (default: 60)
    /// - `TRU_XCODE_SELECTION`: `all` or `first` (default: all)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let source_dir = match lookup("BITRISE_SOURCE_DIR").filter(|s| !s.is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => env::current_dir().map_err(|_| {
                ConfigError::InvalidValue(
                    "BITRISE_SOURCE_DIR is unset and the current directory is unavailable",
                )
            })?,
        };

        let build_slug = lookup("BITRISE_BUILD_SLUG")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingEnvVar("BITRISE_BUILD_SLUG"))?;

        let derived_data_dir = match lookup("TRU_DERIVED_DATA_DIR").filter(|s| !s.is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => {
                let home = lookup("HOME")
                    .filter(|s| !s.is_empty())
                    .ok_or(ConfigError::MissingEnvVar("HOME"))?;
                PathBuf::from(home).join(DERIVED_DATA_PATH_IN_HOME)
            }
        };

        let endpoint = lookup("TRU_ENDPOINT").unwrap_or_else(|| defaults::ENDPOINT.to_string());
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(ConfigError::InvalidValue(
                "TRU_ENDPOINT must be an http:// or https:// URL",
            ));
        }

        let http_timeout_secs = lookup("TRU_HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|| defaults::HTTP_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidValue("TRU_HTTP_TIMEOUT_SECS must be a valid number"))?;

        let xcode_selection = match lookup("TRU_XCODE_SELECTION") {
            Some(value) => XcodeSelection::parse(&value).ok_or(ConfigError::InvalidValue(
                "TRU_XCODE_SELECTION must be 'all' or 'first'",
            ))?,
            None => XcodeSelection::default(),
        };

        Ok(Config {
            source_dir,
            build_slug,
            derived_data_dir,
            endpoint,
            http_timeout: Duration::from_secs(http_timeout_secs),
            xcode_selection,
        })
    }

    /// Source root as the string prefix stripped from failure file names.
    pub fn source_prefix(&self) -> String {
        self.source_dir.to_string_lossy().into_owned()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(&'static str),
}
