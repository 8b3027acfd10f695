//! Position mapping: turns diff ops into page/line-addressed records.

use std::ops::Range;

use crate::diff::DiffOp;
use crate::document::{Document, LineRef};
use crate::error::CompareError;

/// Number of neighbouring lines attached to each record by default.
pub const DEFAULT_CONTEXT_LINES: usize = 2;

/// Whether a line was added or removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ChangeKind {
    Added,
    Removed,
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Added => "added",
            ChangeKind::Removed => "removed",
        }
    }
}

/// Which input a record is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum FileSide {
    Pdf1,
    Pdf2,
}

impl FileSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileSide::Pdf1 => "pdf1",
            FileSide::Pdf2 => "pdf2",
        }
    }
}

/// Lines surrounding a changed line on the same page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineContext {
    pub before: Vec<String>,
    pub after: Vec<String>,
}

/// A single changed line.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DifferenceRecord {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: ChangeKind,
    pub content: String,
    /// 1-indexed page in the attributed file.
    pub page: usize,
    /// 1-indexed line within that page.
    pub line: usize,
    pub file: FileSide,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub context: Option<LineContext>,
}

/// Maps edit-script ops over flattened documents back to pages and lines.
///
/// `old_lines` and `new_lines` must be the flattened line sequences the ops
/// were computed over.
pub struct PositionMapper<'a> {
    old: &'a Document,
    old_lines: &'a [LineRef<'a>],
    new: &'a Document,
    new_lines: &'a [LineRef<'a>],
    context_lines: usize,
}

impl<'a> PositionMapper<'a> {
    pub fn new(
        old: &'a Document,
        old_lines: &'a [LineRef<'a>],
        new: &'a Document,
        new_lines: &'a [LineRef<'a>],
    ) -> Self {
        Self {
            old,
            old_lines,
            new,
            new_lines,
            context_lines: DEFAULT_CONTEXT_LINES,
        }
    }

    /// Attach up to `lines` neighbours on each side; `0` disables context.
    pub fn with_context(mut self, lines: usize) -> Self {
        self.context_lines = lines;
        self
    }

    /// One record per line inside every delete, insert or replace op, in op order.
    ///
    /// # Errors
    ///
    /// Returns [`CompareError::InternalDiff`] if an op range falls outside the
    /// flattened sequences.
    pub fn map(&self, ops: &[DiffOp]) -> Result<Vec<DifferenceRecord>, CompareError> {
        let mut records = Vec::new();
        for op in ops {
            match op {
                DiffOp::Equal { .. } => {}
                DiffOp::Delete { old, .. } => {
                    self.push_lines(&mut records, FileSide::Pdf1, old)?;
                }
                DiffOp::Insert { new, .. } => {
                    self.push_lines(&mut records, FileSide::Pdf2, new)?;
                }
                DiffOp::Replace { old, new } => {
                    self.push_lines(&mut records, FileSide::Pdf1, old)?;
                    self.push_lines(&mut records, FileSide::Pdf2, new)?;
                }
            }
        }
        Ok(records)
    }

    fn push_lines(
        &self,
        records: &mut Vec<DifferenceRecord>,
        side: FileSide,
        range: &Range<usize>,
    ) -> Result<(), CompareError> {
        let (doc, lines, kind) = match side {
            FileSide::Pdf1 => (self.old, self.old_lines, ChangeKind::Removed),
            FileSide::Pdf2 => (self.new, self.new_lines, ChangeKind::Added),
        };
        let slice = lines.get(range.clone()).ok_or_else(|| {
            CompareError::InternalDiff(format!(
                "{} range {}..{} exceeds {} lines",
                side.as_str(),
                range.start,
                range.end,
                lines.len()
            ))
        })?;
        for at in slice {
            records.push(DifferenceRecord {
                kind,
                content: at.text.to_string(),
                page: at.page,
                line: at.line,
                file: side,
                context: self.context_for(doc, at),
            });
        }
        Ok(())
    }

    fn context_for(&self, doc: &Document, at: &LineRef<'_>) -> Option<LineContext> {
        if self.context_lines == 0 {
            return None;
        }
        let lines = doc.page(at.page)?.lines();
        let index = at.line.checked_sub(1).filter(|&i| i < lines.len())?;
        let start = index.saturating_sub(self.context_lines);
        let end = (index + 1 + self.context_lines).min(lines.len());
        let texts = |range: Range<usize>| -> Vec<String> {
            lines[range].iter().map(|l| l.text().to_string()).collect()
        };
        Some(LineContext {
            before: texts(start..index),
            after: texts((index + 1).min(end)..end),
        })
    }
}
