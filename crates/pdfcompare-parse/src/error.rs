//! Error types for the parsing layer.
//!
//! Uses [`thiserror`] for ergonomic error derivation. Provides [`BackendError`]
//! that wraps backend-specific errors and converts them to [`ExtractionError`]
//! once the offending path is known.

use std::path::Path;

use pdfcompare_core::{ExtractionError, ExtractionFailure};
use thiserror::Error;

/// Error type for PDF parsing backend operations.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Error from PDF parsing (structure, syntax, object resolution).
    #[error("PDF parse error: {0}")]
    Parse(String),

    /// Error reading PDF data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is encrypted.
    #[error("document is encrypted")]
    Encrypted,

    /// Error decoding a page content stream.
    #[error("content error: {0}")]
    Content(String),

    /// The document relies on something the backend cannot decode.
    #[error("unsupported: {0}")]
    Unsupported(String),
}

impl BackendError {
    /// Extraction failure category for this error.
    pub fn failure(&self) -> ExtractionFailure {
        match self {
            BackendError::Io(_) => ExtractionFailure::Unreadable,
            BackendError::Encrypted => ExtractionFailure::Encrypted,
            BackendError::Parse(_) | BackendError::Content(_) => ExtractionFailure::Corrupt,
            BackendError::Unsupported(_) => ExtractionFailure::Unsupported,
        }
    }

    /// Attach the path of the document that failed.
    pub fn at(self, path: &Path) -> ExtractionError {
        let reason = self.failure();
        let detail = match &self {
            BackendError::Encrypted => String::new(),
            BackendError::Parse(msg)
            | BackendError::Content(msg)
            | BackendError::Unsupported(msg) => msg.clone(),
            BackendError::Io(e) => e.to_string(),
        };
        ExtractionError::new(path, reason, detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_error_parse() {
        let err = BackendError::Parse("invalid xref table".to_string());
        assert_eq!(err.to_string(), "PDF parse error: invalid xref table");
    }

    #[test]
    fn backend_error_io_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: BackendError = io_err.into();
        assert!(matches!(err, BackendError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn failure_categories() {
        let io = BackendError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(io.failure(), ExtractionFailure::Unreadable);
        assert_eq!(BackendError::Encrypted.failure(), ExtractionFailure::Encrypted);
        assert_eq!(
            BackendError::Parse("x".into()).failure(),
            ExtractionFailure::Corrupt
        );
        assert_eq!(
            BackendError::Content("x".into()).failure(),
            ExtractionFailure::Corrupt
        );
        assert_eq!(
            BackendError::Unsupported("x".into()).failure(),
            ExtractionFailure::Unsupported
        );
    }

    #[test]
    fn at_attaches_path_and_detail() {
        let err = BackendError::Parse("bad syntax".to_string()).at(Path::new("b.pdf"));
        assert_eq!(err.path(), Path::new("b.pdf"));
        assert_eq!(err.reason, ExtractionFailure::Corrupt);
        assert_eq!(err.detail, "bad syntax");
        assert_eq!(err.to_string(), "cannot extract b.pdf: corrupt (bad syntax)");
    }

    #[test]
    fn encrypted_has_no_detail() {
        let err = BackendError::Encrypted.at(Path::new("locked.pdf"));
        assert_eq!(err.to_string(), "cannot extract locked.pdf: encrypted");
    }

    #[test]
    fn backend_error_implements_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(BackendError::Parse("test".to_string()));
        assert!(err.to_string().contains("test"));
    }
}
