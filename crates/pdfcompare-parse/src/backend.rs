//! PDF parsing backend trait.
//!
//! Defines the [`PdfBackend`] trait that abstracts the handful of PDF reads
//! a comparison needs, so the comparison layer does not depend on a specific
//! parser crate.

use pdfcompare_core::{BBox, DocumentMetadata};

use crate::error::BackendError;

/// Trait abstracting PDF parsing operations.
///
/// # Associated Types
///
/// - `Document`: The parsed PDF document representation.
/// - `Page`: A reference to a single page within a document.
/// - `Error`: Backend-specific error type, convertible to [`BackendError`].
///
/// # Usage
///
/// ```ignore
/// let doc = MyBackend::open(pdf_bytes)?;
/// let page = MyBackend::get_page(&doc, 0)?;
/// let text = MyBackend::page_text(&doc, &page)?;
/// ```
pub trait PdfBackend {
    /// The parsed PDF document type.
    type Document;

    /// A reference to a single page within a document.
    type Page;

    /// Backend-specific error type.
    type Error: std::error::Error + Into<BackendError>;

    /// Parse PDF bytes into a document.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a valid PDF document or the
    /// document is encrypted.
    fn open(bytes: &[u8]) -> Result<Self::Document, Self::Error>;

    /// Return the number of pages in the document.
    fn page_count(doc: &Self::Document) -> usize;

    /// Access a page by 0-based index.
    ///
    /// # Errors
    ///
    /// Returns an error if the index is out of range.
    fn get_page(doc: &Self::Document, index: usize) -> Result<Self::Page, Self::Error>;

    /// Get the MediaBox for a page, honouring inheritance from the page tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the MediaBox is missing or malformed.
    fn page_media_box(doc: &Self::Document, page: &Self::Page) -> Result<BBox, Self::Error>;

    /// Extract the page's text with one line break after each text object.
    ///
    /// # Errors
    ///
    /// Returns an error if the content stream cannot be decoded.
    fn page_text(doc: &Self::Document, page: &Self::Page) -> Result<String, Self::Error>;

    /// Extract document-level metadata from the PDF /Info dictionary.
    ///
    /// Fields not present in the PDF are returned as `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the /Info dictionary exists but is malformed.
    fn document_metadata(doc: &Self::Document) -> Result<DocumentMetadata, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Mock backend ---

    struct MockDocument {
        pages: Vec<(BBox, &'static str)>,
        metadata: DocumentMetadata,
    }

    struct MockPage {
        index: usize,
    }

    struct MockBackend;

    impl PdfBackend for MockBackend {
        type Document = MockDocument;
        type Page = MockPage;
        type Error = BackendError;

        fn open(bytes: &[u8]) -> Result<Self::Document, Self::Error> {
            if bytes.is_empty() {
                return Err(BackendError::Parse("empty input".to_string()));
            }
            if bytes == b"locked" {
                return Err(BackendError::Encrypted);
            }
            Ok(MockDocument {
                pages: vec![
                    (BBox::new(0.0, 0.0, 612.0, 792.0), "first\nsecond"),
                    (BBox::new(0.0, 0.0, 595.0, 842.0), "third"),
                ],
                metadata: DocumentMetadata {
                    title: Some("Mock".to_string()),
                    ..Default::default()
                },
            })
        }

        fn page_count(doc: &Self::Document) -> usize {
            doc.pages.len()
        }

        fn get_page(doc: &Self::Document, index: usize) -> Result<Self::Page, Self::Error> {
            if index >= doc.pages.len() {
                return Err(BackendError::Parse(format!("page {index} out of range")));
            }
            Ok(MockPage { index })
        }

        fn page_media_box(doc: &Self::Document, page: &Self::Page) -> Result<BBox, Self::Error> {
            Ok(doc.pages[page.index].0)
        }

        fn page_text(doc: &Self::Document, page: &Self::Page) -> Result<String, Self::Error> {
            Ok(doc.pages[page.index].1.to_string())
        }

        fn document_metadata(doc: &Self::Document) -> Result<DocumentMetadata, Self::Error> {
            Ok(doc.metadata.clone())
        }
    }

    #[test]
    fn mock_backend_round_trip() {
        let doc = MockBackend::open(b"%PDF").unwrap();
        assert_eq!(MockBackend::page_count(&doc), 2);
        let page = MockBackend::get_page(&doc, 1).unwrap();
        assert_eq!(MockBackend::page_text(&doc, &page).unwrap(), "third");
        let size = MockBackend::page_media_box(&doc, &page).unwrap().size();
        assert_eq!((size.width, size.height), (595.0, 842.0));
        assert_eq!(
            MockBackend::document_metadata(&doc).unwrap().title.as_deref(),
            Some("Mock")
        );
    }

    #[test]
    fn mock_backend_errors() {
        assert!(matches!(
            MockBackend::open(b"locked"),
            Err(BackendError::Encrypted)
        ));
        assert!(MockBackend::open(b"").is_err());
        let doc = MockBackend::open(b"%PDF").unwrap();
        assert!(MockBackend::get_page(&doc, 2).is_err());
    }

    #[test]
    fn error_converts_to_backend_error() {
        fn convert<B: PdfBackend>(err: B::Error) -> BackendError {
            err.into()
        }
        let err = convert::<MockBackend>(BackendError::Content("bad".to_string()));
        assert!(matches!(err, BackendError::Content(_)));
    }
}
