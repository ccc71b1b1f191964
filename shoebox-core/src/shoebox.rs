//! The shoebox data entity.

use crate::bbox::BoundingBox;
use crate::mask::MaskCode;
use ndarray::Array3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A calibrated 3D sub-volume of detector data around one reflection.
///
/// Owns two parallel arrays of shape `(frames, rows, columns)` derived from
/// the bounding box: corrected intensities and per-voxel mask words. The
/// correction engine allocates a shoebox zero-filled, populates every voxel,
/// and hands ownership to the caller. Integration stages may continue to
/// annotate the mask array (background/foreground/strong bits) but must not
/// resize either array.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Shoebox {
    /// Detector panel this reflection was recorded on.
    pub panel: usize,
    /// Bounding box that defined the sub-volume.
    pub bbox: BoundingBox,
    /// Gain- and dark-corrected intensities.
    pub data: Array3<f64>,
    /// Per-voxel mask words ([`MaskCode`] bits).
    pub mask: Array3<u32>,
}

impl Shoebox {
    /// Allocates an empty shoebox for a panel and bounding box.
    ///
    /// Intensities start at `0.0` and mask words at `0` (no flags set); the
    /// correction engine overwrites every voxel.
    #[must_use]
    pub fn new(panel: usize, bbox: BoundingBox) -> Self {
        let shape = bbox.shape();
        Self {
            panel,
            bbox,
            data: Array3::zeros(shape),
            mask: Array3::zeros(shape),
        }
    }

    /// Array shape `(frames, rows, columns)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize, usize) {
        self.data.dim()
    }

    /// Number of voxels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if the bounding box has zero volume.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Mask word at local coordinates `(frame, row, column)`.
    ///
    /// # Panics
    /// Panics if the coordinates are outside the shoebox.
    #[must_use]
    pub fn mask_at(&self, k: usize, j: usize, i: usize) -> MaskCode {
        MaskCode::from_bits_retain(self.mask[(k, j, i)])
    }

    /// Count of voxels whose mask contains all the given flags.
    #[must_use]
    pub fn count_mask(&self, code: MaskCode) -> usize {
        self.mask
            .iter()
            .filter(|&&word| word & code.bits() == code.bits())
            .count()
    }
}
