//! Geometric primitives for OCR output.
//!
//! OCR engines report line positions as axis-aligned pixel rectangles in the
//! coordinate space of the source image, with the origin at the top-left.

use serde::{Deserialize, Serialize};

/// An axis-aligned pixel rectangle given by its edges.
///
/// Field names follow the shape OCR engines serialize (`x0`, `x1`, `y0`, `y1`).
/// No ordering between `x0` and `x1` is enforced; degenerate boxes are kept
/// as reported.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge
    pub x0: f64,
    /// Right edge
    pub x1: f64,
    /// Top edge
    pub y0: f64,
    /// Bottom edge
    pub y1: f64,
}

impl BoundingBox {
    /// Create a box from its top-left and bottom-right corners.
    ///
    /// # Examples
    ///
    /// ```
    /// use ocr_indent::geometry::BoundingBox;
    ///
    /// let bbox = BoundingBox::new(10.0, 0.0, 40.0, 12.0);
    /// assert_eq!(bbox.x0, 10.0);
    /// assert_eq!(bbox.x1, 40.0);
    /// assert_eq!(bbox.width(), 30.0);
    /// ```
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, x1, y0, y1 }
    }

    /// Create a box from left/top position and dimensions, as Tesseract TSV
    /// output reports it.
    ///
    /// # Examples
    ///
    /// ```
    /// use ocr_indent::geometry::BoundingBox;
    ///
    /// let bbox = BoundingBox::from_ltwh(5.0, 20.0, 100.0, 14.0);
    /// assert_eq!(bbox.x1, 105.0);
    /// assert_eq!(bbox.y1, 34.0);
    /// ```
    pub fn from_ltwh(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            x0: left,
            x1: left + width,
            y0: top,
            y1: top + height,
        }
    }

    /// Horizontal extent (`x1 - x0`). Zero or negative for degenerate boxes.
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Vertical extent (`y1 - y0`).
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Smallest box containing both boxes.
    ///
    /// # Examples
    ///
    /// ```
    /// use ocr_indent::geometry::BoundingBox;
    ///
    /// let a = BoundingBox::new(0.0, 0.0, 50.0, 10.0);
    /// let b = BoundingBox::new(60.0, 2.0, 90.0, 12.0);
    /// let u = a.union(&b);
    /// assert_eq!(u, BoundingBox::new(0.0, 0.0, 90.0, 12.0));
    /// ```
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            x0: self.x0.min(other.x0),
            x1: self.x1.max(other.x1),
            y0: self.y0.min(other.y0),
            y1: self.y1.max(other.y1),
        }
    }
}
