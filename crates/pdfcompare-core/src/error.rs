//! Error types for pdfcompare.
//!
//! Provides [`ExtractionError`] for documents that could not be turned into
//! pages of text, and [`CompareError`], the error taxonomy shared by every
//! comparison method.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::method::MethodKind;

/// Why a document could not be extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ExtractionFailure {
    /// The file could not be read from disk.
    Unreadable,
    /// The document is encrypted and no password is available.
    Encrypted,
    /// The bytes are not a well-formed PDF, or a page could not be decoded.
    Corrupt,
    /// The document uses a feature the backend does not handle.
    Unsupported,
}

impl ExtractionFailure {
    /// Returns the lowercase tag for this failure.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionFailure::Unreadable => "unreadable",
            ExtractionFailure::Encrypted => "encrypted",
            ExtractionFailure::Corrupt => "corrupt",
            ExtractionFailure::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for ExtractionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A document could not be extracted.
///
/// Always carries the path of the offending file so that a failed
/// comparison can say which of the two inputs was at fault.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionError {
    /// Path of the document that failed.
    pub path: PathBuf,
    /// Failure category.
    pub reason: ExtractionFailure,
    /// Backend-provided detail, possibly empty.
    pub detail: String,
}

impl ExtractionError {
    /// Create an extraction error for `path`.
    pub fn new(
        path: impl Into<PathBuf>,
        reason: ExtractionFailure,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            reason,
            detail: detail.into(),
        }
    }

    /// Path of the document that failed.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot extract {}: {}", self.path.display(), self.reason)?;
        if !self.detail.is_empty() {
            write!(f, " ({})", self.detail)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExtractionError {}

/// Fatal error for a single comparison method.
///
/// [`Extraction`](CompareError::Extraction) and
/// [`DependencyUnavailable`](CompareError::DependencyUnavailable) are scoped
/// to the method that raised them; the orchestrator records them and moves
/// on. [`InternalDiff`](CompareError::InternalDiff) signals a broken invariant
/// and is returned to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum CompareError {
    /// One of the inputs could not be extracted.
    Extraction(ExtractionError),
    /// The method needs a tool or library that is not available.
    DependencyUnavailable {
        /// Method that could not run.
        method: MethodKind,
        /// Name of the missing dependency.
        dependency: String,
    },
    /// The diff engine produced inconsistent output.
    InternalDiff(String),
}

impl CompareError {
    /// Returns `true` if the error only affects the method that raised it.
    pub fn is_method_scoped(&self) -> bool {
        !matches!(self, CompareError::InternalDiff(_))
    }
}

impl fmt::Display for CompareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareError::Extraction(err) => write!(f, "{err}"),
            CompareError::DependencyUnavailable { method, dependency } => {
                write!(f, "{method} unavailable: {dependency} not found")
            }
            CompareError::InternalDiff(msg) => write!(f, "internal diff error: {msg}"),
        }
    }
}

impl std::error::Error for CompareError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompareError::Extraction(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ExtractionError> for CompareError {
    fn from(err: ExtractionError) -> Self {
        CompareError::Extraction(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_error_display_with_detail() {
        let err = ExtractionError::new("b.pdf", ExtractionFailure::Corrupt, "invalid xref");
        assert_eq!(err.to_string(), "cannot extract b.pdf: corrupt (invalid xref)");
    }

    #[test]
    fn extraction_error_display_without_detail() {
        let err = ExtractionError::new("a.pdf", ExtractionFailure::Encrypted, "");
        assert_eq!(err.to_string(), "cannot extract a.pdf: encrypted");
        assert_eq!(err.path(), Path::new("a.pdf"));
    }

    #[test]
    fn failure_tags() {
        assert_eq!(ExtractionFailure::Unreadable.as_str(), "unreadable");
        assert_eq!(ExtractionFailure::Encrypted.as_str(), "encrypted");
        assert_eq!(ExtractionFailure::Corrupt.as_str(), "corrupt");
        assert_eq!(ExtractionFailure::Unsupported.as_str(), "unsupported");
    }

    #[test]
    fn compare_error_from_extraction() {
        let err: CompareError =
            ExtractionError::new("x.pdf", ExtractionFailure::Unreadable, "missing").into();
        assert!(matches!(err, CompareError::Extraction(_)));
        assert!(err.is_method_scoped());
        assert!(err.to_string().contains("x.pdf"));
    }

    #[test]
    fn dependency_unavailable_display() {
        let err = CompareError::DependencyUnavailable {
            method: MethodKind::Visual,
            dependency: "pdftoppm".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "visual_comparison unavailable: pdftoppm not found"
        );
        assert!(err.is_method_scoped());
    }

    #[test]
    fn internal_diff_is_not_method_scoped() {
        let err = CompareError::InternalDiff("range out of bounds".to_string());
        assert!(!err.is_method_scoped());
        assert_eq!(err.to_string(), "internal diff error: range out of bounds");
    }

    #[test]
    fn compare_error_source_chain() {
        use std::error::Error;
        let err = CompareError::Extraction(ExtractionError::new(
            "y.pdf",
            ExtractionFailure::Corrupt,
            "",
        ));
        assert!(err.source().is_some());
        let dep = CompareError::InternalDiff("x".to_string());
        assert!(dep.source().is_none());
    }
}
