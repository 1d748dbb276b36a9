//! Core error types for timeblock-core.
//!
//! This module defines the error hierarchy using thiserror. Resolution
//! failures are recoverable per task; parse failures of normalized lines
//! are explicit and name the missing piece.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for timeblock-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A time expression could not be resolved
    #[error("Resolution error: {0}")]
    Resolve(#[from] ResolveError),

    /// A normalized scheduled line could not be parsed back
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure to resolve a time expression to a start time and duration.
///
/// Every variant is recoverable: the pipeline drops the affected task,
/// reports it, and moves on.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The task line carried no bracketed time expression.
    #[error("no bracketed time expression on the line")]
    MissingExpression,

    /// The resolution service call itself failed.
    #[error("resolution service error: {0}")]
    Service(#[from] ServiceError),

    /// The duration reply was not the expected JSON shape.
    #[error("malformed duration reply: {reply}")]
    MalformedDuration {
        reply: String,
        #[source]
        source: serde_json::Error,
    },

    /// The duration reply carried neither minutes, hours, nor days.
    #[error("duration reply has no minutes, hours, or days")]
    EmptyDuration,

    /// The datetime reply was missing its field or not ISO-8601.
    #[error("malformed datetime reply: {reply}")]
    MalformedDatetime { reply: String },
}

/// Failure to parse a normalized scheduled line back into a task.
#[derive(Error, Debug)]
pub enum ParseError {
    /// No `[length:: ...]` marker (or its closing bracket) on the line.
    #[error("malformed scheduled task: missing [length::] marker")]
    MissingLengthMarker,

    /// No `[scheduled:: ...]` marker (or its closing bracket) on the line.
    #[error("malformed scheduled task: missing [scheduled::] marker")]
    MissingScheduledMarker,

    /// The length interior was not an integer minute count.
    #[error("malformed scheduled task: invalid length {value:?}")]
    InvalidLength { value: String },

    /// The scheduled interior was not a `YYYY-MM-DDTHH:MM` timestamp.
    #[error("malformed scheduled task: invalid timestamp {value:?}")]
    InvalidTimestamp { value: String },

    /// Line-number context added by batch operations (1-based).
    #[error("line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<ParseError>,
    },
}

/// Chat-completion service errors.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// No credential configured for the service.
    #[error("no API key configured")]
    MissingApiKey,

    /// Transport-level failure.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service replied with a non-success status.
    #[error("service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The reply carried no message content.
    #[error("reply carried no message content")]
    MissingContent,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown configuration key
    #[error("unknown configuration key: {0}")]
    UnknownKey(String),

    /// The config directory could not be created or resolved
    #[error("config directory unavailable: {0}")]
    NoConfigDir(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
