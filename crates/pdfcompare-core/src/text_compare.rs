//! Text comparison of two extracted documents.

use crate::diff::{DiffOp, LineDiffer};
use crate::document::Document;
use crate::error::CompareError;
use crate::position::{DEFAULT_CONTEXT_LINES, DifferenceRecord, PositionMapper};

/// Options for [`compare_documents`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextCompareOptions {
    /// Materialize one [`DifferenceRecord`] per changed line.
    pub detailed: bool,
    /// Neighbouring lines attached to each record (detailed mode only).
    pub context_lines: usize,
}

impl Default for TextCompareOptions {
    fn default() -> Self {
        Self {
            detailed: false,
            context_lines: DEFAULT_CONTEXT_LINES,
        }
    }
}

/// Added/removed line counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextStatistics {
    pub lines_added: usize,
    pub lines_removed: usize,
    pub total_changes: usize,
}

/// Outcome of a text comparison.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComparisonResult {
    pub identical: bool,
    /// Line-level similarity in `[0, 1]`.
    pub similarity: f64,
    pub statistics: TextStatistics,
    /// Present only when detailed mode was requested.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub detailed_differences: Option<Vec<DifferenceRecord>>,
}

/// Compare the text of two documents line by line.
///
/// Lines are flattened across pages in document order before diffing, so a
/// line moving from the bottom of one page to the top of the next is not a
/// change. Similarity does not depend on `options.detailed`.
///
/// # Errors
///
/// Returns [`CompareError::InternalDiff`] if the diff output is inconsistent
/// with itself.
pub fn compare_documents(
    old: &Document,
    new: &Document,
    options: &TextCompareOptions,
) -> Result<ComparisonResult, CompareError> {
    let old_lines = old.flatten();
    let new_lines = new.flatten();
    let old_text: Vec<&str> = old_lines.iter().map(|l| l.text).collect();
    let new_text: Vec<&str> = new_lines.iter().map(|l| l.text).collect();

    let differ = LineDiffer::new(&old_text, &new_text);
    let similarity = differ.ratio();
    let script = differ.edit_script();

    let mut statistics = TextStatistics::default();
    for op in &script {
        match op {
            DiffOp::Delete { old, .. } => statistics.lines_removed += old.len(),
            DiffOp::Insert { new, .. } => statistics.lines_added += new.len(),
            DiffOp::Equal { .. } | DiffOp::Replace { .. } => {}
        }
    }
    statistics.total_changes = statistics.lines_added + statistics.lines_removed;

    let identical = statistics.total_changes == 0;
    if identical != (similarity == 1.0) {
        return Err(CompareError::InternalDiff(format!(
            "similarity {similarity} disagrees with {} changed lines",
            statistics.total_changes
        )));
    }

    let detailed_differences = if options.detailed {
        let records = PositionMapper::new(old, &old_lines, new, &new_lines)
            .with_context(options.context_lines)
            .map(&script)?;
        if records.len() != statistics.total_changes {
            return Err(CompareError::InternalDiff(format!(
                "{} records for {} changed lines",
                records.len(),
                statistics.total_changes
            )));
        }
        Some(records)
    } else {
        None
    };

    Ok(ComparisonResult {
        identical,
        similarity,
        statistics,
        detailed_differences,
    })
}
