//! Load-once access to an input PDF.

use std::cell::OnceCell;
use std::path::{Path, PathBuf};

use pdfcompare_core::{Document, DocumentMetadata, ExtractionError, Page, PageSize};
use pdfcompare_parse::{BackendError, LopdfBackend, LopdfDocument, PdfBackend};

/// One input file, read and parsed once per run.
///
/// The file bytes are read eagerly. Parsing happens once in
/// [`PdfSource::load`]; a parse failure is kept and returned by every
/// accessor that needs the parsed document, so file size and hash remain
/// available for a corrupt file. Text extraction is cached on first use.
pub struct PdfSource {
    path: PathBuf,
    bytes: Vec<u8>,
    parsed: Result<LopdfDocument, ExtractionError>,
    text: OnceCell<Result<Document, ExtractionError>>,
}

impl std::fmt::Debug for PdfSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfSource")
            .field("path", &self.path)
            .field("len", &self.bytes.len())
            .field("parsed", &self.parsed.is_ok())
            .finish_non_exhaustive()
    }
}

impl PdfSource {
    /// Read `path` and parse it.
    ///
    /// # Errors
    ///
    /// Returns an [`ExtractionError`] with reason `unreadable` if the file
    /// cannot be read. Parse failures are not returned here.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ExtractionError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| BackendError::Io(e).at(path))?;
        Ok(Self::from_bytes(path, bytes))
    }

    /// Parse in-memory bytes, attributing errors to `path`.
    pub fn from_bytes(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        let path = path.into();
        let parsed = LopdfBackend::open(&bytes).map_err(|e| e.at(&path));
        match &parsed {
            Ok(doc) => tracing::debug!(
                path = %path.display(),
                bytes = bytes.len(),
                pages = LopdfBackend::page_count(doc),
                "loaded PDF"
            ),
            Err(err) => tracing::debug!(path = %path.display(), %err, "PDF failed to parse"),
        }
        Self {
            path,
            bytes,
            parsed,
            text: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn file_size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Lowercase hex MD5 of the file contents.
    pub fn md5_hex(&self) -> String {
        format!("{:x}", md5::compute(&self.bytes))
    }

    fn parsed(&self) -> Result<&LopdfDocument, ExtractionError> {
        self.parsed.as_ref().map_err(Clone::clone)
    }

    pub fn page_count(&self) -> Result<usize, ExtractionError> {
        Ok(LopdfBackend::page_count(self.parsed()?))
    }

    /// MediaBox size of every page, in page order.
    pub fn page_sizes(&self) -> Result<Vec<PageSize>, ExtractionError> {
        let doc = self.parsed()?;
        (0..LopdfBackend::page_count(doc))
            .map(|index| {
                let page = LopdfBackend::get_page(doc, index)?;
                Ok(LopdfBackend::page_media_box(doc, &page)?.size())
            })
            .collect::<Result<Vec<_>, BackendError>>()
            .map_err(|e| e.at(&self.path))
    }

    pub fn metadata(&self) -> Result<DocumentMetadata, ExtractionError> {
        LopdfBackend::document_metadata(self.parsed()?).map_err(|e| e.at(&self.path))
    }

    /// The extracted text, computed on first call and cached.
    ///
    /// # Errors
    ///
    /// Returns the parse error, or the first page whose text could not be
    /// decoded. A failed extraction never yields a partial document.
    pub fn document(&self) -> Result<&Document, ExtractionError> {
        self.text
            .get_or_init(|| self.extract_text())
            .as_ref()
            .map_err(Clone::clone)
    }

    fn extract_text(&self) -> Result<Document, ExtractionError> {
        let doc = self.parsed()?;
        let pages = (0..LopdfBackend::page_count(doc))
            .map(|index| {
                let page = LopdfBackend::get_page(doc, index)?;
                let text = LopdfBackend::page_text(doc, &page)?;
                Ok(Page::from_text(index + 1, &text))
            })
            .collect::<Result<Vec<_>, BackendError>>()
            .map_err(|e| e.at(&self.path))?;
        let document = Document::new(self.path.clone(), pages);
        tracing::debug!(
            path = %self.path.display(),
            pages = document.page_count(),
            lines = document.line_count(),
            "extracted text"
        );
        Ok(document)
    }
}

/// Extract the text of the PDF at `path` into pages of lines.
///
/// # Errors
///
/// Returns an [`ExtractionError`] if the file is unreadable, encrypted,
/// corrupt or relies on something the backend cannot decode.
pub fn extract(path: impl AsRef<Path>) -> Result<Document, ExtractionError> {
    PdfSource::load(path)?.document().cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdfcompare_core::ExtractionFailure;

    #[test]
    fn missing_file_is_unreadable() {
        let err = PdfSource::load("/nonexistent/input.pdf").unwrap_err();
        assert_eq!(err.reason, ExtractionFailure::Unreadable);
        assert_eq!(err.path(), Path::new("/nonexistent/input.pdf"));
    }

    #[test]
    fn garbage_bytes_keep_size_and_hash() {
        let source = PdfSource::from_bytes("junk.pdf", b"not a pdf".to_vec());
        assert_eq!(source.file_size(), 9);
        assert_eq!(source.md5_hex().len(), 32);
        let err = source.page_count().unwrap_err();
        assert_eq!(err.reason, ExtractionFailure::Corrupt);
        assert_eq!(err.path(), Path::new("junk.pdf"));
        assert!(source.document().is_err());
        assert!(source.metadata().is_err());
    }

    #[test]
    fn md5_of_known_input() {
        let source = PdfSource::from_bytes("x.pdf", Vec::new());
        assert_eq!(source.md5_hex(), "d41d8cd98f00b204e9800998ecf8427e");
    }
}
