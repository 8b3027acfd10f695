//! pdfcompare-parse: PDF parsing backend.
//!
//! This crate reads the parts of a PDF that comparison needs (page text,
//! MediaBox, /Info metadata) behind the [`PdfBackend`] trait, with a lopdf
//! implementation. It depends on pdfcompare-core for shared data types.

pub mod backend;
pub mod error;
pub mod lopdf_backend;

pub use backend::PdfBackend;
pub use error::BackendError;
pub use lopdf_backend::{LopdfBackend, LopdfDocument, LopdfPage};
pub use pdfcompare_core;
