//! pdfcompare: Compare two PDF documents.
//!
//! This is the public API facade crate. It re-exports types from
//! pdfcompare-core and uses pdfcompare-parse for PDF reading.
//!
//! # Architecture
//!
//! - **pdfcompare-core**: Document model, line differ, position mapper and result types
//! - **pdfcompare-parse**: PDF parsing backend
//! - **pdfcompare** (this crate): Loading, capability probing and the method orchestrator
//!
//! # Example
//!
//! ```ignore
//! use pdfcompare::{CompareOptions, Comparer, detect_capabilities};
//!
//! let comparer = Comparer::new(detect_capabilities(), CompareOptions::default());
//! let report = comparer.compare("old.pdf", "new.pdf")?;
//! std::process::exit(report.exit_status().code());
//! ```

mod capabilities;
mod compare;
mod methods;
mod rasterizer;
mod source;

pub use capabilities::{dependency_of, detect_capabilities, detect_with};
pub use compare::{CompareOptions, Comparer, DEFAULT_DPI, compare_text};
pub use rasterizer::{PDFTOPPM, Pdftoppm, load_page};
pub use source::{PdfSource, extract};

pub use pdfcompare_core::{
    BasicInfo, Capabilities, ChangeKind, CompareError, ComparisonReport, ComparisonResult,
    DEFAULT_CONTEXT_LINES, DEFAULT_VISUAL_THRESHOLD, DifferenceRecord, Document, DocumentMetadata,
    ExitStatus, ExtractionError, ExtractionFailure, FailureKind, FieldComparison,
    FileHashComparison, FilePair, FileSide, Line, LineContext, MetadataComparison, MethodFailure,
    MethodKind, MethodResult, Page, PageCountComparison, PageSimilarity, PageSize,
    PageSizeComparison, SizeComparison, StructureComparison, Summary, TextStatistics,
    UnknownMethod, VisualComparison,
};
pub use pdfcompare_core;
pub use pdfcompare_parse;
