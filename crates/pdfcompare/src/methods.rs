//! One runner per comparison method.
//!
//! Every runner reads from the two already-loaded sources and returns a
//! [`MethodResult`] or the [`CompareError`] that stopped it.

use pdfcompare_core::{
    CompareError, MethodKind, MethodResult, TextCompareOptions, compare_documents,
    compare_metadata, compare_rasters, compare_structure,
};

use crate::compare::CompareOptions;
use crate::source::PdfSource;

/// Run `method` on a pair of sources.
pub fn run(
    method: MethodKind,
    pdf1: &PdfSource,
    pdf2: &PdfSource,
    options: &CompareOptions,
) -> Result<MethodResult, CompareError> {
    match method {
        MethodKind::Text => run_text(pdf1, pdf2, options),
        MethodKind::Visual => run_visual(pdf1, pdf2, options),
        MethodKind::Structure => run_structure(pdf1, pdf2),
        MethodKind::Metadata => run_metadata(pdf1, pdf2),
    }
}

fn run_text(
    pdf1: &PdfSource,
    pdf2: &PdfSource,
    options: &CompareOptions,
) -> Result<MethodResult, CompareError> {
    let text_options = TextCompareOptions {
        detailed: options.detailed,
        context_lines: options.context_lines,
    };
    let result = compare_documents(pdf1.document()?, pdf2.document()?, &text_options)?;
    Ok(MethodResult::Text(result))
}

fn run_visual(
    pdf1: &PdfSource,
    pdf2: &PdfSource,
    options: &CompareOptions,
) -> Result<MethodResult, CompareError> {
    let old = options.renderer.render(pdf1.path(), options.dpi)?;
    let new = options.renderer.render(pdf2.path(), options.dpi)?;
    Ok(MethodResult::Visual(compare_rasters(
        &old,
        &new,
        options.visual_threshold,
    )))
}

fn run_structure(pdf1: &PdfSource, pdf2: &PdfSource) -> Result<MethodResult, CompareError> {
    let old = pdf1.page_sizes()?;
    let new = pdf2.page_sizes()?;
    Ok(MethodResult::Structure(compare_structure(&old, &new)))
}

fn run_metadata(pdf1: &PdfSource, pdf2: &PdfSource) -> Result<MethodResult, CompareError> {
    let old = pdf1.metadata()?;
    let new = pdf2.metadata()?;
    Ok(MethodResult::Metadata(compare_metadata(
        &old,
        &pdf1.md5_hex(),
        &new,
        &pdf2.md5_hex(),
    )))
}
