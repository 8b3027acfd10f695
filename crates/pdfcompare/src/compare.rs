//! Comparison entry points and the multi-method orchestrator.

use std::path::Path;

use pdfcompare_core::{
    BasicInfo, Capabilities, CompareError, ComparisonReport, ComparisonResult,
    DEFAULT_CONTEXT_LINES, DEFAULT_VISUAL_THRESHOLD, FilePair, MethodKind, PageCountComparison,
    ReportBuilder, SizeComparison, TextCompareOptions, compare_documents,
};

use crate::capabilities::dependency_of;
use crate::methods;
use crate::rasterizer::Pdftoppm;
use crate::source::PdfSource;

/// Default rendering resolution for visual comparison.
pub const DEFAULT_DPI: u32 = 150;

/// Options for a [`Comparer`] run.
#[derive(Debug, Clone, PartialEq)]
pub struct CompareOptions {
    /// Methods to run, in the order given. Duplicates are ignored.
    pub methods: Vec<MethodKind>,
    /// Produce per-line difference records in the text result.
    pub detailed: bool,
    /// Neighbouring lines attached to each difference record.
    pub context_lines: usize,
    /// Resolution used to render pages for visual comparison.
    pub dpi: u32,
    /// Mean page similarity above which renderings count as identical.
    pub visual_threshold: f64,
    pub renderer: Pdftoppm,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            methods: vec![MethodKind::Text],
            detailed: false,
            context_lines: DEFAULT_CONTEXT_LINES,
            dpi: DEFAULT_DPI,
            visual_threshold: DEFAULT_VISUAL_THRESHOLD,
            renderer: Pdftoppm::default(),
        }
    }
}

/// Compare the text of two PDF files.
///
/// # Errors
///
/// Returns [`CompareError::Extraction`] naming the file that could not be
/// extracted, or [`CompareError::InternalDiff`] if the diff engine
/// produced inconsistent output.
pub fn compare_text(
    pdf1: impl AsRef<Path>,
    pdf2: impl AsRef<Path>,
    detailed: bool,
) -> Result<ComparisonResult, CompareError> {
    let source1 = PdfSource::load(pdf1)?;
    let source2 = PdfSource::load(pdf2)?;
    let options = TextCompareOptions {
        detailed,
        ..TextCompareOptions::default()
    };
    compare_documents(source1.document()?, source2.document()?, &options)
}

/// Runs the selected comparison methods over a pair of files.
///
/// Capabilities are detected once by the caller and handed in; a requested
/// method that is not available is reported as unavailable without running.
#[derive(Debug, Clone)]
pub struct Comparer {
    capabilities: Capabilities,
    options: CompareOptions,
}

impl Comparer {
    pub fn new(capabilities: Capabilities, options: CompareOptions) -> Self {
        Self {
            capabilities,
            options,
        }
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    pub fn options(&self) -> &CompareOptions {
        &self.options
    }

    /// Compare `pdf1` against `pdf2`.
    ///
    /// Each file is read and parsed once. Extraction and missing-dependency
    /// failures are recorded against the method that hit them and the
    /// remaining methods still run.
    ///
    /// # Errors
    ///
    /// Returns [`CompareError::Extraction`] if either file cannot be read at
    /// all, and [`CompareError::InternalDiff`] if a method broke an internal
    /// invariant.
    pub fn compare(
        &self,
        pdf1: impl AsRef<Path>,
        pdf2: impl AsRef<Path>,
    ) -> Result<ComparisonReport, CompareError> {
        let (pdf1, pdf2) = (pdf1.as_ref(), pdf2.as_ref());
        let source1 = PdfSource::load(pdf1)?;
        let source2 = PdfSource::load(pdf2)?;

        let mut methods_used: Vec<MethodKind> = Vec::new();
        for method in &self.options.methods {
            if !methods_used.contains(method) {
                methods_used.push(*method);
            }
        }
        tracing::info!(
            pdf1 = %pdf1.display(),
            pdf2 = %pdf2.display(),
            methods = ?methods_used,
            "comparing"
        );

        let mut report = ReportBuilder::new(
            FilePair::new(pdf1, pdf2),
            methods_used.clone(),
            basic_info(&source1, &source2),
        );
        for method in methods_used {
            let outcome = if self.capabilities.contains(method) {
                tracing::debug!(%method, "running");
                methods::run(method, &source1, &source2, &self.options)
            } else {
                Err(CompareError::DependencyUnavailable {
                    method,
                    dependency: dependency_of(method).to_string(),
                })
            };
            match &outcome {
                Ok(result) => tracing::debug!(%method, identical = ?result.identical(), "finished"),
                Err(err) => tracing::warn!(%method, %err, "method failed"),
            }
            report.record(method, outcome)?;
        }
        Ok(report.finish())
    }
}

fn basic_info(pdf1: &PdfSource, pdf2: &PdfSource) -> BasicInfo {
    let page_count = match (pdf1.page_count(), pdf2.page_count()) {
        (Ok(a), Ok(b)) => Some(PageCountComparison::new(a, b)),
        _ => None,
    };
    BasicInfo {
        file_size: SizeComparison::new(pdf1.file_size(), pdf2.file_size()),
        page_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let options = CompareOptions::default();
        assert_eq!(options.methods, vec![MethodKind::Text]);
        assert!(!options.detailed);
        assert_eq!(options.context_lines, 2);
        assert_eq!(options.dpi, 150);
        assert_eq!(options.visual_threshold, 0.999);
    }

    #[test]
    fn missing_file_fails_the_whole_run() {
        let comparer = Comparer::new(Capabilities::all(), CompareOptions::default());
        let err = comparer
            .compare("/nonexistent/a.pdf", "/nonexistent/b.pdf")
            .unwrap_err();
        assert!(matches!(err, CompareError::Extraction(_)));
    }

    #[cfg(unix)]
    #[test]
    fn visual_method_compares_rendered_pages() {
        use pdfcompare_core::MethodResult;

        let dir = tempfile::tempdir().unwrap();
        let renderer = crate::rasterizer::fake_pdftoppm(
            dir.path(),
            crate::rasterizer::TWO_PAGE_SCRIPT,
        );
        let (pdf1, pdf2) = (dir.path().join("a.pdf"), dir.path().join("b.pdf"));
        std::fs::write(&pdf1, b"first").unwrap();
        std::fs::write(&pdf2, b"second").unwrap();

        let options = CompareOptions {
            methods: vec![MethodKind::Visual],
            renderer,
            ..CompareOptions::default()
        };
        let report = Comparer::new(Capabilities::all(), options)
            .compare(&pdf1, &pdf2)
            .unwrap();

        let Some(MethodResult::Visual(visual)) = report.result(MethodKind::Visual) else {
            panic!("expected a visual result");
        };
        assert!(visual.identical);
        assert_eq!(visual.page_count.pdf1, 2);
        assert_eq!(visual.page_similarities.len(), 2);
        assert_eq!(visual.overall_similarity, 1.0);
    }
}
