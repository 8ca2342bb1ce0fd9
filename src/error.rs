//! Error types for pdfprobe.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pdfprobe operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while acquiring, parsing or reporting on a PDF.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization or deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input could not be interpreted as a URL or file path.
    #[error("Invalid source: {0}")]
    InvalidSource(String),

    /// A local source file could not be read.
    #[error("Cannot read {}: {source}", path.display())]
    SourceRead {
        /// Path of the source file
        path: PathBuf,
        /// Underlying I/O failure
        source: io::Error,
    },

    /// The HTTP request for a remote source failed.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// The server answered with a non-success status.
    #[error("HTTP {status} while fetching {url}")]
    HttpStatus {
        /// Status code returned by the server
        status: u16,
        /// Requested URL
        url: String,
    },

    /// A URL source was given but the crate was built without the `remote` feature.
    #[error("Remote sources are not supported in this build: {0}")]
    RemoteDisabled(String),

    /// The data is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,
}

impl Error {
    /// Process exit code for this failure class.
    ///
    /// * `2` - the source could not be acquired
    /// * `3` - the document could not be parsed
    /// * `4` - the result could not be written
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidSource(_)
            | Error::SourceRead { .. }
            | Error::Fetch(_)
            | Error::HttpStatus { .. }
            | Error::RemoteDisabled(_) => 2,
            Error::UnknownFormat
            | Error::UnsupportedVersion(_)
            | Error::PdfParse(_)
            | Error::Encrypted => 3,
            Error::Io(_) | Error::Json(_) => 4,
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

#[cfg(feature = "remote")]
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        match (err.status(), err.url()) {
            (Some(status), Some(url)) => Error::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            },
            _ => Error::Fetch(err.to_string()),
        }
    }
}
