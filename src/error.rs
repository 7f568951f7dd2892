//! Error types for the pdfoutline library.

use std::io;
use thiserror::Error;

/// Result type alias for pdfoutline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during outline extraction.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The external parser could not open or read a document.
    #[error("Parse failure: {0}")]
    ParseFailure(String),

    /// The document is encrypted and cannot be read.
    #[error("Document is encrypted")]
    Encrypted,

    /// Error serializing the outline to JSON.
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// The input path cannot be processed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

// Encrypted documents are detected explicitly via `Document::is_encrypted`
// before extraction, so every lopdf failure surfaces as a parse failure.
impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        Error::ParseFailure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Encrypted;
        assert_eq!(err.to_string(), "Document is encrypted");

        let err = Error::ParseFailure("truncated xref".to_string());
        assert_eq!(err.to_string(), "Parse failure: truncated xref");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
