use std::path::PathBuf;

use thiserror::Error;

/// Main application error type that encompasses all possible failure modes
///
/// Malformed measurement documents are deliberately *not* represented here:
/// they degrade to a per-file [`crate::convert::ConversionStatus`] so one bad
/// input never aborts the batch.
#[derive(Error, Debug)]
pub enum RangerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory does not exist: {path}")]
    MissingDirectory { path: PathBuf },

    #[error("No {extension} files found in {path}")]
    NoInputFiles { path: PathBuf, extension: String },

    #[error("XML parse error: {file} - {details}")]
    XmlParse { file: PathBuf, details: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("No STATUS column present; cannot split by signal status")]
    MissingStatusColumn,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Concurrent operation error: {details}")]
    Concurrency { details: String },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, RangerError>;
