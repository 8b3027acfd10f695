//! Visual comparison of rendered pages.
//!
//! Pages are compared by plain per-pixel equality of greyscale rasters.

use crate::structure::PageCountComparison;

/// Similarity above which two renderings count as identical.
pub const DEFAULT_VISUAL_THRESHOLD: f64 = 0.999;

/// An 8-bit greyscale page rendering, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Raster {
    /// Returns `None` if `pixels` does not hold exactly `width * height` samples.
    pub fn new(width: usize, height: usize, pixels: Vec<u8>) -> Option<Self> {
        (width.checked_mul(height)? == pixels.len()).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x).copied()
    }
}

/// Pixel agreement of one page.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageSimilarity {
    /// 1-indexed page number.
    pub page: usize,
    pub similarity: f64,
    pub different_pixels: usize,
    pub total_pixels: usize,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisualComparison {
    pub identical: bool,
    /// Mean of the per-page similarities; 0 when page counts differ.
    pub overall_similarity: f64,
    pub page_count: PageCountComparison,
    pub page_similarities: Vec<PageSimilarity>,
}

/// Compare one pair of rasters.
///
/// Both images are anchored at the top-left corner. The denominator is the
/// area of the smallest box containing both, so pixels present in only one
/// rendering count as different.
pub fn compare_page(page: usize, old: &Raster, new: &Raster) -> PageSimilarity {
    let width = old.width.max(new.width);
    let height = old.height.max(new.height);
    let total_pixels = width * height;

    let overlap_w = old.width.min(new.width);
    let overlap_h = old.height.min(new.height);
    let mut equal = 0usize;
    for y in 0..overlap_h {
        let a = &old.pixels[y * old.width..y * old.width + overlap_w];
        let b = &new.pixels[y * new.width..y * new.width + overlap_w];
        equal += a.iter().zip(b).filter(|(p, q)| p == q).count();
    }

    let similarity = if total_pixels == 0 {
        1.0
    } else {
        equal as f64 / total_pixels as f64
    };
    PageSimilarity {
        page,
        similarity,
        different_pixels: total_pixels - equal,
        total_pixels,
    }
}

/// Compare two rendered documents page by page.
///
/// A page count mismatch is reported without per-page scores.
pub fn compare_rasters(old: &[Raster], new: &[Raster], threshold: f64) -> VisualComparison {
    let page_count = PageCountComparison::new(old.len(), new.len());
    if !page_count.identical {
        return VisualComparison {
            identical: false,
            overall_similarity: 0.0,
            page_count,
            page_similarities: Vec::new(),
        };
    }

    let page_similarities: Vec<PageSimilarity> = old
        .iter()
        .zip(new)
        .enumerate()
        .map(|(i, (a, b))| compare_page(i + 1, a, b))
        .collect();
    let overall_similarity = if page_similarities.is_empty() {
        1.0
    } else {
        page_similarities.iter().map(|p| p.similarity).sum::<f64>()
            / page_similarities.len() as f64
    };

    VisualComparison {
        identical: overall_similarity > threshold,
        overall_similarity,
        page_count,
        page_similarities,
    }
}
