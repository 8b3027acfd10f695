//! Extracted document model: [`Document`], [`Page`] and [`Line`].
//!
//! Page and line numbers are 1-indexed and fixed at extraction time.

use std::path::{Path, PathBuf};

/// A single line of text within a page.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    number: usize,
    text: String,
}

impl Line {
    /// 1-indexed position within the page.
    pub fn number(&self) -> usize {
        self.number
    }

    /// Text content of the line.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Line break characters besides `\n`; `\r\n` counts as one break.
const LINE_BREAKS: &[char] = &[
    '\r', '\u{0b}', '\u{0c}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Split page text into lines.
///
/// Breaks on `\n`, `\r\n`, a lone `\r`, vertical tab, form feed, the
/// file/group/record separators, NEL and the Unicode line and paragraph
/// separators. Blank lines are kept; a trailing break does not start a new
/// line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((at, c)) = chars.next() {
        if c != '\n' && !LINE_BREAKS.contains(&c) {
            continue;
        }
        lines.push(&text[start..at]);
        start = at + c.len_utf8();
        if c == '\r' && chars.next_if(|&(_, next)| next == '\n').is_some() {
            start += 1;
        }
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// A page of extracted text lines.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Page {
    number: usize,
    lines: Vec<Line>,
}

impl Page {
    /// Create page `number` (1-indexed) from its lines in reading order.
    pub fn new<I, S>(number: usize, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines = lines
            .into_iter()
            .enumerate()
            .map(|(i, text)| Line {
                number: i + 1,
                text: text.into(),
            })
            .collect();
        Self { number, lines }
    }

    /// Create a page by splitting raw page text on line breaks.
    ///
    /// See [`split_lines`] for what counts as a break.
    pub fn from_text(number: usize, text: &str) -> Self {
        Self::new(number, split_lines(text))
    }

    /// 1-indexed page number.
    pub fn number(&self) -> usize {
        self.number
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Look up a line by its 1-indexed number.
    pub fn line(&self, number: usize) -> Option<&Line> {
        number.checked_sub(1).and_then(|i| self.lines.get(i))
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// A line addressed by its page and line number.
///
/// Produced by [`Document::flatten`] so that a diff over the whole document
/// can be traced back to where each line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRef<'a> {
    pub page: usize,
    pub line: usize,
    pub text: &'a str,
}

/// The text content of one PDF file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document {
    path: PathBuf,
    pages: Vec<Page>,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>, pages: Vec<Page>) -> Self {
        Self {
            path: path.into(),
            pages,
        }
    }

    /// Build a document from per-page raw text, numbering pages from 1.
    pub fn from_page_texts<I, S>(path: impl Into<PathBuf>, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let pages = texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| Page::from_text(i + 1, text.as_ref()))
            .collect();
        Self::new(path, pages)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Look up a page by its 1-indexed number.
    pub fn page(&self, number: usize) -> Option<&Page> {
        number.checked_sub(1).and_then(|i| self.pages.get(i))
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Total number of lines across all pages.
    pub fn line_count(&self) -> usize {
        self.pages.iter().map(Page::line_count).sum()
    }

    /// All lines in document order, each tagged with its page and line number.
    pub fn flatten(&self) -> Vec<LineRef<'_>> {
        self.pages
            .iter()
            .flat_map(|page| {
                page.lines.iter().map(move |line| LineRef {
                    page: page.number,
                    line: line.number,
                    text: &line.text,
                })
            })
            .collect()
    }
}
