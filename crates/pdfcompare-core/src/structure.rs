//! Structural comparison: page counts and page sizes.

use crate::geometry::PageSize;

/// Page counts of both files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageCountComparison {
    pub pdf1: usize,
    pub pdf2: usize,
    pub identical: bool,
}

impl PageCountComparison {
    pub fn new(pdf1: usize, pdf2: usize) -> Self {
        Self {
            pdf1,
            pdf2,
            identical: pdf1 == pdf2,
        }
    }
}

/// Size of one page in both files.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageSizeComparison {
    /// 1-indexed page number.
    pub page: usize,
    pub pdf1: PageSize,
    pub pdf2: PageSize,
    pub identical: bool,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StructureComparison {
    pub identical: bool,
    pub page_count: PageCountComparison,
    /// One entry per page present in both files.
    pub pages: Vec<PageSizeComparison>,
}

/// Compare page counts and the sizes of the pages both files share.
pub fn compare_structure(old: &[PageSize], new: &[PageSize]) -> StructureComparison {
    let page_count = PageCountComparison::new(old.len(), new.len());
    let pages: Vec<PageSizeComparison> = old
        .iter()
        .zip(new)
        .enumerate()
        .map(|(i, (a, b))| PageSizeComparison {
            page: i + 1,
            pdf1: *a,
            pdf2: *b,
            identical: a.approx_eq(b),
        })
        .collect();
    let identical = page_count.identical && pages.iter().all(|p| p.identical);
    StructureComparison {
        identical,
        page_count,
        pages,
    }
}
