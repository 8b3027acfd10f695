/// Bounding box with top-left origin coordinate system.
///
/// Coordinates follow the page convention:
/// - `x0`: left edge
/// - `top`: top edge (distance from top of page)
/// - `x1`: right edge
/// - `bottom`: bottom edge (distance from top of page)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BBox {
    pub x0: f64,
    pub top: f64,
    pub x1: f64,
    pub bottom: f64,
}

impl BBox {
    pub fn new(x0: f64, top: f64, x1: f64, bottom: f64) -> Self {
        Self {
            x0,
            top,
            x1,
            bottom,
        }
    }

    /// Width of the bounding box.
    pub fn width(&self) -> f64 {
        (self.x1 - self.x0).abs()
    }

    /// Height of the bounding box.
    pub fn height(&self) -> f64 {
        (self.bottom - self.top).abs()
    }

    /// Page size covered by this box.
    pub fn size(&self) -> PageSize {
        PageSize {
            width: self.width(),
            height: self.height(),
        }
    }
}

/// Page dimensions in PDF points.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    /// Sizes closer than this (in points) are treated as equal.
    pub const TOLERANCE: f64 = 0.01;

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Compare two sizes within [`PageSize::TOLERANCE`].
    pub fn approx_eq(&self, other: &PageSize) -> bool {
        (self.width - other.width).abs() <= Self::TOLERANCE
            && (self.height - other.height).abs() <= Self::TOLERANCE
    }
}
