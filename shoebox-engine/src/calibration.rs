//! Per-panel calibration map storage.
//!
//! The store owns deep copies of every panel's gain, dark-offset, and
//! bad-pixel maps, validated once at construction so the per-voxel
//! correction loop can index them without further checks. It is immutable
//! after construction and safe to share across threads.

use crate::error::{Error, Result};
use ndarray::Array2;
use shoebox_core::BoundingBox;

/// The three calibration maps of one detector panel, all of equal shape
/// `(rows, cols)`.
#[derive(Debug, Clone)]
pub struct PanelMaps {
    /// Multiplicative response correction, every element positive.
    pub gain: Array2<f64>,
    /// Additive baseline offset.
    pub dark: Array2<f64>,
    /// Pixel usability, `true` = usable.
    pub mask: Array2<bool>,
}

impl PanelMaps {
    /// Map shape `(rows, cols)`.
    #[must_use]
    pub fn dim(&self) -> (usize, usize) {
        self.gain.dim()
    }
}

/// Validated, immutable calibration maps for every panel of a detector.
#[derive(Debug, Clone)]
pub struct CalibrationStore {
    panels: Vec<PanelMaps>,
}

impl CalibrationStore {
    /// Builds a store from per-panel map sequences and the reflection
    /// metadata that will later be corrected against it.
    ///
    /// All inputs are deep-copied; mutating the caller's arrays afterwards
    /// does not affect the store.
    ///
    /// # Errors
    /// Fails if the map sequences have unequal lengths, any gain element is
    /// `<= 0`, a panel's dark or bad-pixel map shape differs from its gain
    /// map, a referenced panel has no maps, or a bounding box reaches
    /// outside its panel.
    pub fn new(
        gain: &[Array2<f64>],
        dark: &[Array2<f64>],
        mask: &[Array2<bool>],
        bboxes: &[BoundingBox],
        panel_indices: &[usize],
    ) -> Result<Self> {
        if gain.len() != dark.len() || gain.len() != mask.len() {
            return Err(Error::MapCountMismatch {
                gain: gain.len(),
                dark: dark.len(),
                mask: mask.len(),
            });
        }

        let mut panels = Vec::with_capacity(gain.len());
        for (panel, ((g, d), m)) in gain.iter().zip(dark).zip(mask).enumerate() {
            if g.dim() != d.dim() || g.dim() != m.dim() {
                return Err(Error::MapShapeMismatch {
                    panel,
                    gain: g.dim(),
                    dark: d.dim(),
                    mask: m.dim(),
                });
            }
            if let Some(((row, col), &value)) = g.indexed_iter().find(|(_, &v)| v <= 0.0) {
                return Err(Error::NonPositiveGain {
                    panel,
                    row,
                    col,
                    value,
                });
            }
            panels.push(PanelMaps {
                gain: g.clone(),
                dark: d.clone(),
                mask: m.clone(),
            });
        }

        let store = Self { panels };
        store.check_coverage(bboxes, panel_indices)?;
        Ok(store)
    }

    /// Checks that every bounding box lies within its panel's map extent.
    ///
    /// # Errors
    /// Fails on unequal metadata lengths, a panel index with no maps, or a
    /// box outside its panel.
    pub fn check_coverage(&self, bboxes: &[BoundingBox], panel_indices: &[usize]) -> Result<()> {
        if bboxes.len() != panel_indices.len() {
            return Err(shoebox_core::Error::MetadataLengthMismatch {
                bboxes: bboxes.len(),
                panels: panel_indices.len(),
            }
            .into());
        }
        for (index, (bbox, &panel)) in bboxes.iter().zip(panel_indices).enumerate() {
            let maps = self.maps_for(panel)?;
            let (rows, cols) = maps.dim();
            if !bbox.fits_panel(rows, cols) {
                return Err(Error::BoxOutsidePanel {
                    index,
                    panel,
                    rows,
                    cols,
                });
            }
        }
        Ok(())
    }

    /// Calibration maps of one panel.
    ///
    /// # Errors
    /// Returns [`Error::PanelOutOfRange`] if the panel has no registered
    /// maps. Construction-time validation makes this unreachable for panels
    /// referenced by the supplied metadata, but the lookup stays checked.
    pub fn maps_for(&self, panel: usize) -> Result<&PanelMaps> {
        self.panels.get(panel).ok_or(Error::PanelOutOfRange {
            panel,
            count: self.panels.len(),
        })
    }

    /// Number of panels with registered maps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    /// True if no panels are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox(x0: i32, x1: i32, y0: i32, y1: i32, z0: i32, z1: i32) -> BoundingBox {
        BoundingBox::new(x0, x1, y0, y1, z0, z1).unwrap()
    }

    fn uniform_maps(rows: usize, cols: usize) -> (Array2<f64>, Array2<f64>, Array2<bool>) {
        (
            Array2::from_elem((rows, cols), 2.0),
            Array2::from_elem((rows, cols), 1.0),
            Array2::from_elem((rows, cols), true),
        )
    }

    #[test]
    fn test_store_construction_and_lookup() {
        let (g0, d0, m0) = uniform_maps(10, 10);
        let (g1, d1, m1) = uniform_maps(4, 6);
        let bboxes = [bbox(2, 5, 2, 5, 0, 1), bbox(0, 6, 0, 4, 0, 2)];
        let store = CalibrationStore::new(
            &[g0, g1],
            &[d0, d1],
            &[m0, m1],
            &bboxes,
            &[0, 1],
        )
        .unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.maps_for(0).unwrap().dim(), (10, 10));
        assert_eq!(store.maps_for(1).unwrap().dim(), (4, 6));
        assert!(matches!(
            store.maps_for(2),
            Err(Error::PanelOutOfRange { panel: 2, count: 2 })
        ));
    }

    #[test]
    fn test_deep_copy_decouples_caller_arrays() {
        let (mut g, d, m) = uniform_maps(5, 5);
        let store =
            CalibrationStore::new(&[g.clone()], &[d], &[m], &[bbox(0, 2, 0, 2, 0, 1)], &[0])
                .unwrap();
        g[(0, 0)] = 99.0;
        assert_eq!(store.maps_for(0).unwrap().gain[(0, 0)], 2.0);
    }

    #[test]
    fn test_non_positive_gain_rejected() {
        let (mut g, d, m) = uniform_maps(5, 5);
        g[(3, 2)] = 0.0;
        let err = CalibrationStore::new(&[g], &[d], &[m], &[], &[]);
        assert!(matches!(
            err,
            Err(Error::NonPositiveGain {
                panel: 0,
                row: 3,
                col: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_map_shape_mismatch_rejected() {
        let (g, _, m) = uniform_maps(5, 5);
        let d = Array2::from_elem((5, 4), 1.0);
        let err = CalibrationStore::new(&[g], &[d], &[m], &[], &[]);
        assert!(matches!(err, Err(Error::MapShapeMismatch { panel: 0, .. })));
    }

    #[test]
    fn test_map_count_mismatch_rejected() {
        let (g, d, _) = uniform_maps(5, 5);
        let err = CalibrationStore::new(&[g], &[d], &[], &[], &[]);
        assert!(matches!(err, Err(Error::MapCountMismatch { .. })));
    }

    #[test]
    fn test_box_outside_panel_rejected() {
        let (g, d, m) = uniform_maps(5, 5);
        let err = CalibrationStore::new(
            &[g],
            &[d],
            &[m],
            &[bbox(0, 6, 0, 2, 0, 1)],
            &[0],
        );
        assert!(matches!(
            err,
            Err(Error::BoxOutsidePanel {
                index: 0,
                panel: 0,
                rows: 5,
                cols: 5,
            })
        ));
    }

    #[test]
    fn test_unmapped_panel_rejected() {
        let (g, d, m) = uniform_maps(5, 5);
        let err = CalibrationStore::new(&[g], &[d], &[m], &[bbox(0, 2, 0, 2, 0, 1)], &[1]);
        assert!(matches!(
            err,
            Err(Error::PanelOutOfRange { panel: 1, count: 1 })
        ));
    }
}
