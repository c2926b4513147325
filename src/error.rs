//! Global error handling for overview
//!
//! Everything in here is fatal to a run. Per-file and per-entry failures are
//! logged where they happen and never reach this type.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Global error type for overview operations
#[derive(Error, Debug)]
pub enum OverviewError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Description mode requested but no key could be resolved
    #[error(
        "An API key is required when using '--description'. Provide it via '--api' or set one of \
         the environment variables: {}",
        crate::config::API_KEY_ENV_VARS.join(", ")
    )]
    MissingApiKey,

    /// The `--ignore-file` could not be read
    #[error("Failed to read ignore file {}: {source}", path.display())]
    IgnoreFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An include or ignore pattern is not a valid glob
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// An output artifact could not be created or written
    #[error("Failed to write to output file {}: {source}", path.display())]
    OutputFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Path not found
    #[error("Path not found: {0}")]
    PathNotFound(String),
}

/// Specialized Result type for overview operations
pub type Result<T> = std::result::Result<T, OverviewError>;

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error::OverviewError::$error_type(format!($($arg)*)))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

/// Extension trait for tagging IO failures with the output artifact they hit
pub trait OutputContext<T> {
    fn for_output(self, path: &std::path::Path) -> Result<T>;
}

impl<T> OutputContext<T> for std::result::Result<T, io::Error> {
    fn for_output(self, path: &std::path::Path) -> Result<T> {
        self.map_err(|source| OverviewError::OutputFile {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl<T> OutputContext<T> for std::result::Result<T, serde_json::Error> {
    fn for_output(self, path: &std::path::Path) -> Result<T> {
        self.map_err(|e| OverviewError::OutputFile {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}

// Allow `?` on overview errors inside io::Result code such as tests
impl From<OverviewError> for io::Error {
    fn from(err: OverviewError) -> Self {
        io::Error::new(io::ErrorKind::Other, err.to_string())
    }
}
