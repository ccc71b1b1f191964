//! The shoebox correction engine.
//!
//! Turns raw voxel cubes into calibrated, masked [`Shoebox`] values:
//! `corrected = gain * raw - dark` per voxel, with the `VALID` mask bit set
//! wherever the panel's bad-pixel map marks the pixel usable. The offset
//! from local shoebox coordinates `(j, i)` to absolute panel coordinates
//! `(y0 + j, x0 + i)` is the index-critical part; all geometry is validated
//! once at construction so the inner loop carries no per-voxel checks.

use crate::calibration::CalibrationStore;
use crate::error::Result;
use rayon::prelude::*;
use shoebox_core::{BoundingBox, MaskCode, RawSource, Shoebox};

/// Correction engine over a raw-data source and a calibration store.
///
/// Caches the source's per-reflection metadata at construction and validates
/// it against the store; after that, every fetch is read-only and fetches of
/// distinct reflections are independent.
pub struct CorrectionEngine<S: RawSource> {
    source: S,
    store: CalibrationStore,
    bboxes: Vec<BoundingBox>,
    panels: Vec<usize>,
}

impl<S: RawSource> CorrectionEngine<S> {
    /// Creates an engine, caching and validating the source's metadata.
    ///
    /// # Errors
    /// Fails if the source's metadata sequences disagree in length with its
    /// reflection count, a reflection references a panel without calibration
    /// maps, or a bounding box reaches outside its panel's maps.
    pub fn new(source: S, store: CalibrationStore) -> Result<Self> {
        let bboxes = source.bboxes().to_vec();
        let panels = source.panels().to_vec();
        if bboxes.len() != source.len() || panels.len() != source.len() {
            return Err(shoebox_core::Error::MetadataLengthMismatch {
                bboxes: bboxes.len(),
                panels: panels.len(),
            }
            .into());
        }
        store.check_coverage(&bboxes, &panels)?;
        Ok(Self {
            source,
            store,
            bboxes,
            panels,
        })
    }

    /// Number of reflections available.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bboxes.len()
    }

    /// True if the source holds no reflections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bboxes.is_empty()
    }

    /// Bounding boxes, one per reflection.
    #[must_use]
    pub fn bboxes(&self) -> &[BoundingBox] {
        &self.bboxes
    }

    /// Panel indices, one per reflection.
    #[must_use]
    pub fn panels(&self) -> &[usize] {
        &self.panels
    }

    /// The calibration store backing this engine.
    #[must_use]
    pub fn store(&self) -> &CalibrationStore {
        &self.store
    }

    /// Fetches one reflection as a corrected, masked shoebox.
    ///
    /// # Errors
    /// Fails if `index` is out of range, the source cannot produce the raw
    /// cube, or the cube's shape disagrees with the cached bounding box
    /// (metadata and data have desynchronized; never truncated or padded).
    #[allow(clippy::cast_sign_loss)]
    pub fn fetch(&self, index: usize) -> Result<Shoebox> {
        let bbox = *self
            .bboxes
            .get(index)
            .ok_or(shoebox_core::Error::IndexOutOfRange {
                index,
                len: self.bboxes.len(),
            })?;
        let panel = self.panels[index];

        let raw = self.source.read(index)?;
        if raw.dim() != bbox.shape() {
            return Err(shoebox_core::Error::CubeShapeMismatch {
                index,
                expected: bbox.shape(),
                actual: raw.dim(),
            }
            .into());
        }

        let maps = self.store.maps_for(panel)?;
        // Non-negative after the coverage check in `new`.
        let y0 = bbox.y0 as usize;
        let x0 = bbox.x0 as usize;

        let mut sbox = Shoebox::new(panel, bbox);
        for ((k, j, i), &value) in raw.indexed_iter() {
            let (y, x) = (y0 + j, x0 + i);
            sbox.data[(k, j, i)] = maps.gain[(y, x)] * f64::from(value) - maps.dark[(y, x)];
            sbox.mask[(k, j, i)] = if maps.mask[(y, x)] {
                MaskCode::VALID.bits()
            } else {
                MaskCode::empty().bits()
            };
        }
        Ok(sbox)
    }

    /// Fetches reflections `i0..i1` in ascending order.
    ///
    /// # Errors
    /// Fails on the first failing fetch; no partial results are returned.
    pub fn fetch_range(&self, i0: usize, i1: usize) -> Result<Vec<Shoebox>> {
        (i0..i1).map(|index| self.fetch(index)).collect()
    }

    /// Fetches a selection of reflections, preserving the caller's order.
    ///
    /// Duplicate indices yield duplicate, independently computed shoeboxes.
    ///
    /// # Errors
    /// Fails on the first failing fetch; no partial results are returned.
    pub fn fetch_selection(&self, indices: &[usize]) -> Result<Vec<Shoebox>> {
        indices.iter().map(|&index| self.fetch(index)).collect()
    }
}

impl<S: RawSource + Sync> CorrectionEngine<S> {
    /// Parallel [`fetch_range`](Self::fetch_range); results stay in
    /// ascending index order.
    ///
    /// # Errors
    /// Same all-or-nothing contract as the serial variant.
    pub fn par_fetch_range(&self, i0: usize, i1: usize) -> Result<Vec<Shoebox>> {
        (i0..i1)
            .into_par_iter()
            .map(|index| self.fetch(index))
            .collect()
    }

    /// Parallel [`fetch_selection`](Self::fetch_selection); results stay in
    /// the caller's order.
    ///
    /// # Errors
    /// Same all-or-nothing contract as the serial variant.
    pub fn par_fetch_selection(&self, indices: &[usize]) -> Result<Vec<Shoebox>> {
        indices
            .par_iter()
            .map(|&index| self.fetch(index))
            .collect()
    }
}
