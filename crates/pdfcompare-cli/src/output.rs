use std::fmt::Write;

use pdfcompare::{
    Capabilities, ComparisonReport, ComparisonResult, FailureKind, FileSide,
    MetadataComparison, MethodKind, MethodResult, VisualComparison,
};

const RULE: &str = "======================================================================";

/// Longest line content shown per difference before truncation.
pub const MAX_CONTENT_CHARS: usize = 60;

/// Console rendering options.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleOptions {
    pub detailed: bool,
    pub max_display: usize,
}

fn label(method: MethodKind) -> &'static str {
    match method {
        MethodKind::Text => "Text content",
        MethodKind::Visual => "Visual appearance",
        MethodKind::Structure => "Document structure",
        MethodKind::Metadata => "Metadata",
    }
}

fn same(identical: bool) -> &'static str {
    if identical { "same" } else { "different" }
}

fn status(identical: bool) -> &'static str {
    if identical { "identical" } else { "different" }
}

fn percent(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}

/// Cut `text` to [`MAX_CONTENT_CHARS`] characters, marking the cut.
pub fn truncate(text: &str) -> String {
    match text.char_indices().nth(MAX_CONTENT_CHARS) {
        Some((at, _)) => format!("{}...", &text[..at]),
        None => text.to_string(),
    }
}

/// Render a report as the human-readable console summary.
pub fn render_console(report: &ComparisonReport, options: &ConsoleOptions) -> String {
    let mut out = String::new();
    write_console(&mut out, report, options).expect("writing to a String cannot fail");
    out
}

fn write_console(
    out: &mut String,
    report: &ComparisonReport,
    options: &ConsoleOptions,
) -> std::fmt::Result {
    writeln!(out, "{RULE}")?;
    writeln!(out, "PDF comparison results")?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "PDF1: {}", report.files.pdf1)?;
    writeln!(out, "PDF2: {}", report.files.pdf2)?;

    let size = &report.basic_info.file_size;
    writeln!(out)?;
    writeln!(out, "File size: {}", same(size.identical))?;
    writeln!(out, "  PDF1: {} bytes", size.pdf1)?;
    writeln!(out, "  PDF2: {} bytes", size.pdf2)?;
    if let Some(pages) = &report.basic_info.page_count {
        writeln!(out, "Page count: {}", same(pages.identical))?;
        writeln!(out, "  PDF1: {} pages", pages.pdf1)?;
        writeln!(out, "  PDF2: {} pages", pages.pdf2)?;
    }

    for method in &report.methods_used {
        let Some(result) = report.result(*method) else {
            continue;
        };
        writeln!(out)?;
        match result {
            MethodResult::Failed(failure) => {
                let state = match failure.kind {
                    FailureKind::Extraction => "error",
                    FailureKind::DependencyUnavailable => "unavailable",
                };
                writeln!(out, "{}: {state}", label(*method))?;
                writeln!(out, "  {}", failure.error)?;
            }
            MethodResult::Text(text) => write_text(out, text, options)?,
            MethodResult::Visual(visual) => write_visual(out, visual)?,
            MethodResult::Structure(structure) => {
                writeln!(out, "{}: {}", label(*method), status(structure.identical))?;
                for page in structure.pages.iter().filter(|p| !p.identical) {
                    writeln!(
                        out,
                        "  Page {}: {:.2} x {:.2} vs {:.2} x {:.2}",
                        page.page, page.pdf1.width, page.pdf1.height, page.pdf2.width, page.pdf2.height
                    )?;
                }
                if !structure.page_count.identical {
                    writeln!(
                        out,
                        "  Pages: {} vs {}",
                        structure.page_count.pdf1, structure.page_count.pdf2
                    )?;
                }
            }
            MethodResult::Metadata(meta) => write_metadata(out, meta)?,
        }
    }

    let summary = &report.summary;
    writeln!(out)?;
    writeln!(out, "{RULE}")?;
    if summary.overall_identical {
        writeln!(out, "Verdict: the PDF files are identical")?;
    } else {
        writeln!(out, "Verdict: the PDF files differ")?;
    }
    writeln!(
        out,
        "Checks passed: {}/{}",
        summary.checks_passed, summary.checks_total
    )?;
    writeln!(out, "{RULE}")
}

fn write_text(
    out: &mut String,
    text: &ComparisonResult,
    options: &ConsoleOptions,
) -> std::fmt::Result {
    writeln!(out, "{}: {}", label(MethodKind::Text), status(text.identical))?;
    if text.identical {
        return Ok(());
    }
    let stats = &text.statistics;
    writeln!(out, "  Similarity: {}", percent(text.similarity))?;
    writeln!(out, "  Lines added: {}", stats.lines_added)?;
    writeln!(out, "  Lines removed: {}", stats.lines_removed)?;
    writeln!(out, "  Total changes: {}", stats.total_changes)?;

    let Some(records) = text.detailed_differences.as_ref().filter(|_| options.detailed) else {
        return Ok(());
    };
    writeln!(out)?;
    writeln!(out, "  Differences (first {}):", options.max_display)?;
    for (i, record) in records.iter().take(options.max_display).enumerate() {
        let file = match record.file {
            FileSide::Pdf1 => "PDF1",
            FileSide::Pdf2 => "PDF2",
        };
        writeln!(
            out,
            "  {}. [{}] {file} page {} line {}: {}",
            i + 1,
            record.kind.as_str(),
            record.page,
            record.line,
            truncate(&record.content)
        )?;
    }
    if records.len() > options.max_display {
        writeln!(
            out,
            "  ... {} more differences",
            records.len() - options.max_display
        )?;
    }
    Ok(())
}

fn write_visual(out: &mut String, visual: &VisualComparison) -> std::fmt::Result {
    writeln!(
        out,
        "{}: {}",
        label(MethodKind::Visual),
        status(visual.identical)
    )?;
    writeln!(out, "  Similarity: {}", percent(visual.overall_similarity))?;
    writeln!(
        out,
        "  Pages: {} vs {}",
        visual.page_count.pdf1, visual.page_count.pdf2
    )
}

fn write_metadata(out: &mut String, meta: &MetadataComparison) -> std::fmt::Result {
    writeln!(
        out,
        "{}: {}",
        label(MethodKind::Metadata),
        status(meta.identical)
    )?;
    writeln!(out, "  File hash: {}", same(meta.file_hash.identical))?;
    let changed: Vec<&str> = meta
        .metadata
        .iter()
        .filter(|(_, field)| !field.identical)
        .map(|(key, _)| key.as_str())
        .collect();
    if !changed.is_empty() {
        writeln!(out, "  Changed fields: {}", changed.join(", "))?;
    }
    Ok(())
}

/// Render the detected capabilities as text lines.
pub fn render_capabilities(caps: &Capabilities) -> String {
    MethodKind::ALL
        .iter()
        .map(|m| {
            let state = if caps.contains(*m) {
                "available"
            } else {
                "unavailable"
            };
            format!("{:<10} {state}\n", m.short_name())
        })
        .collect()
}

/// The detected capabilities as a JSON object keyed by method.
pub fn capabilities_json(caps: &Capabilities) -> serde_json::Value {
    MethodKind::ALL
        .iter()
        .map(|m| (m.as_str().to_string(), serde_json::Value::Bool(caps.contains(*m))))
        .collect::<serde_json::Map<_, _>>()
        .into()
}
