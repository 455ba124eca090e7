//! Error types for pdf-outline.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pdf-outline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading a document or building its outline.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure or a content stream.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// A text run violates the reader contract (non-positive size, page 0, ...).
    ///
    /// The whole document is rejected; there is no best-effort mode.
    #[error("Malformed text run on page {page}: {reason}")]
    MalformedRun {
        /// Page the offending run was reported on.
        page: u32,
        /// What was wrong with it.
        reason: String,
    },

    /// Two batch inputs map to the same output file; only the first is written.
    #[error("Output {} is already produced by {}", .output.display(), .first.display())]
    OutputCollision {
        /// The shared output path.
        output: PathBuf,
        /// The input that claimed it first.
        first: PathBuf,
    },

    /// Error during rendering (JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Build a [`Error::MalformedRun`].
    pub fn malformed_run(page: u32, reason: impl Into<String>) -> Self {
        Error::MalformedRun {
            page,
            reason: reason.into(),
        }
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Render(format!("JSON serialization error: {}", err))
    }
}
