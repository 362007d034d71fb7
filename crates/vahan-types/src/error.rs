//! Error types for vahan-checker

use thiserror::Error;

/// Number range validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("Invalid range: start {start} is greater than end {end}")]
    InvalidRange { start: i64, end: i64 },

    #[error("Range {start}..={end} is out of bounds (allowed 1..=9999)")]
    OutOfBounds { start: i64, end: i64 },
}

/// Registry lookup errors
///
/// All of these are per-candidate failures; a check run logs them and moves on.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Lookup command is not configured. Set it with: vahan-checker config --set-lookup-cmd <CMD>")]
    NotConfigured,

    #[error("Lookup command is invalid: {0}")]
    InvalidCommand(String),

    #[error("Failed to run lookup command: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("Lookup command exited with {code}: {stderr}")]
    CommandFailed { code: String, stderr: String },

    #[error("Unrecognized lookup output: {0}")]
    UnrecognizedOutput(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

/// Status cache errors
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache data corrupted: {0}")]
    Corrupted(String),

    #[error("Cache IO error: {0}")]
    IoError(String),
}

/// Report sink errors
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write report: {0}")]
    Write(#[from] csv::Error),

    #[error("Report IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Range(#[from] RangeError),

    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),
}

pub type Result<T> = std::result::Result<T, Error>;
