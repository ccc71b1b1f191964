//! Reflection bounding boxes.
//!
//! A bounding box is a half-open rectangular region in (fast, slow, frame)
//! coordinates: `x0 <= x < x1` columns, `y0 <= y < y1` rows, `z0 <= z < z1`
//! frames. Coordinates are signed because upstream spot prediction can place
//! boxes partially off-panel; such boxes are rejected when validated against
//! a panel extent, not at construction.

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A half-open box in (fast, slow, frame) detector coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoundingBox {
    /// First column (fast axis, inclusive).
    pub x0: i32,
    /// Last column (exclusive).
    pub x1: i32,
    /// First row (slow axis, inclusive).
    pub y0: i32,
    /// Last row (exclusive).
    pub y1: i32,
    /// First frame (inclusive).
    pub z0: i32,
    /// Last frame (exclusive).
    pub z1: i32,
}

impl BoundingBox {
    /// Creates a bounding box, checking that each axis is non-degenerate
    /// (`x0 <= x1`, `y0 <= y1`, `z0 <= z1`).
    ///
    /// # Errors
    /// Returns [`Error::MalformedBoundingBox`] if any axis is reversed.
    pub fn new(x0: i32, x1: i32, y0: i32, y1: i32, z0: i32, z1: i32) -> Result<Self> {
        let bbox = Self {
            x0,
            x1,
            y0,
            y1,
            z0,
            z1,
        };
        if x0 > x1 || y0 > y1 || z0 > z1 {
            return Err(Error::MalformedBoundingBox { bbox });
        }
        Ok(bbox)
    }

    /// Number of columns spanned.
    #[must_use]
    pub fn xsize(&self) -> usize {
        usize::try_from(self.x1 - self.x0).unwrap_or(0)
    }

    /// Number of rows spanned.
    #[must_use]
    pub fn ysize(&self) -> usize {
        usize::try_from(self.y1 - self.y0).unwrap_or(0)
    }

    /// Number of frames spanned.
    #[must_use]
    pub fn zsize(&self) -> usize {
        usize::try_from(self.z1 - self.z0).unwrap_or(0)
    }

    /// Array shape `(frames, rows, columns)` for a cube covering this box.
    #[must_use]
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.zsize(), self.ysize(), self.xsize())
    }

    /// Number of voxels covered.
    #[must_use]
    pub fn volume(&self) -> usize {
        self.zsize() * self.ysize() * self.xsize()
    }

    /// True if the pixel footprint lies within a panel of `(rows, cols)`
    /// pixels and the frame range starts at or after frame zero.
    #[must_use]
    pub fn fits_panel(&self, rows: usize, cols: usize) -> bool {
        let in_rows = i64::from(self.y1) <= rows as i64;
        let in_cols = i64::from(self.x1) <= cols as i64;
        self.x0 >= 0 && self.y0 >= 0 && self.z0 >= 0 && in_rows && in_cols
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_order_is_frame_row_column() {
        let bbox = BoundingBox::new(2, 5, 10, 14, 0, 2).unwrap();
        assert_eq!(bbox.xsize(), 3);
        assert_eq!(bbox.ysize(), 4);
        assert_eq!(bbox.zsize(), 2);
        assert_eq!(bbox.shape(), (2, 4, 3));
        assert_eq!(bbox.volume(), 24);
    }

    #[test]
    fn test_reversed_axis_rejected() {
        assert!(BoundingBox::new(5, 2, 0, 1, 0, 1).is_err());
        assert!(BoundingBox::new(0, 1, 3, 1, 0, 1).is_err());
        assert!(BoundingBox::new(0, 1, 0, 1, 2, 1).is_err());
    }

    #[test]
    fn test_zero_volume_box_is_legal() {
        let bbox = BoundingBox::new(3, 3, 1, 4, 0, 2).unwrap();
        assert_eq!(bbox.shape(), (2, 3, 0));
        assert_eq!(bbox.volume(), 0);
    }

    #[test]
    fn test_fits_panel() {
        let bbox = BoundingBox::new(2, 5, 2, 5, 0, 1).unwrap();
        assert!(bbox.fits_panel(10, 10));
        assert!(bbox.fits_panel(5, 5));
        assert!(!bbox.fits_panel(4, 10));
        assert!(!bbox.fits_panel(10, 4));

        let negative = BoundingBox::new(-1, 5, 2, 5, 0, 1).unwrap();
        assert!(!negative.fits_panel(10, 10));
        let early = BoundingBox::new(2, 5, 2, 5, -1, 1).unwrap();
        assert!(!early.fits_panel(10, 10));
    }
}
