//! Error types for Yarn version detection
//!
//! Provides structured error types for all filesystem probes the detector
//! performs.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while inspecting a project directory
#[derive(Debug, Error)]
pub enum DetectError {
    /// An existence check on a candidate file failed for a reason other
    /// than the file being absent (e.g. permission denied)
    #[error("failed to check for {}: {source}", path.display())]
    Stat {
        /// File being probed
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Opening or reading a file that exists failed
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// File being read
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `.yarnrc.yml` exists but is not valid YAML
    #[error("failed to parse {}: {source}", path.display())]
    YamlParse {
        /// File being parsed
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Result type alias for detection operations
pub type Result<T> = std::result::Result<T, DetectError>;
