//! pdfcompare-core: Backend-independent data types and comparison algorithms.
//!
//! This crate provides the document model ([`Document`], [`Page`], [`Line`]),
//! the line differ and position mapper behind text comparison, the result
//! types of the structure, metadata and visual checks, and the report that
//! aggregates them. It performs no I/O.

pub mod diff;
pub mod document;
pub mod error;
pub mod geometry;
pub mod metadata;
pub mod method;
pub mod position;
pub mod report;
pub mod structure;
pub mod text_compare;
pub mod visual;

pub use diff::{DiffOp, LineDiffer, MatchingBlock};
pub use document::{Document, Line, LineRef, Page, split_lines};
pub use error::{CompareError, ExtractionError, ExtractionFailure};
pub use geometry::{BBox, PageSize};
pub use metadata::{
    DocumentMetadata, FieldComparison, FileHashComparison, MetadataComparison, compare_metadata,
};
pub use method::{Capabilities, MethodKind, UnknownMethod};
pub use position::{
    ChangeKind, DEFAULT_CONTEXT_LINES, DifferenceRecord, FileSide, LineContext, PositionMapper,
};
pub use report::{
    BasicInfo, ComparisonReport, ExitStatus, FailureKind, FilePair, MethodFailure, MethodResult,
    ReportBuilder, SizeComparison, Summary,
};
pub use structure::{
    PageCountComparison, PageSizeComparison, StructureComparison, compare_structure,
};
pub use text_compare::{ComparisonResult, TextCompareOptions, TextStatistics, compare_documents};
pub use visual::{
    DEFAULT_VISUAL_THRESHOLD, PageSimilarity, Raster, VisualComparison, compare_page,
    compare_rasters,
};
