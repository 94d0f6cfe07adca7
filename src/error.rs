use std::num::ParseFloatError;
use std::path::PathBuf;

/// Failures that abort a report run.
///
/// Functions in this crate return `anyhow::Result`; these variants are raised
/// as the root cause so callers can `downcast_ref::<ReportError>()`.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("cannot open input {}: {source}", .path.display())]
    InputMissing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed reading input {}: {source}", .path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line inside the distributed range carries no token at all.
    #[error("line {line}: no value found")]
    MissingValue { line: usize },

    #[error("line {line}: '{token}' is not a number")]
    Parse {
        line: usize,
        token: String,
        #[source]
        source: ParseFloatError,
    },

    /// The mean of an empty group is undefined.
    #[error("group {label} has no samples, cannot compute its mean")]
    EmptyGroup { label: String },

    #[error("drawing chart for group {label} failed: {message}")]
    Draw { label: String, message: String },

    #[error("cannot write chart {}: {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("unknown color '{0}'")]
    UnknownColor(String),
}
