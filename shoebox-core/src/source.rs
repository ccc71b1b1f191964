//! Raw voxel-data source boundary.
//!
//! The correction engine does not read detector files itself; it pulls raw
//! cubes through the [`RawSource`] trait. File-backed readers live in
//! downstream crates and implement this trait; [`InMemorySource`] is the
//! owned reference implementation, used directly in tests and wherever the
//! raw data already sits in memory.

use crate::bbox::BoundingBox;
use crate::error::{Error, Result};
use ndarray::Array3;

/// A source of raw shoebox voxel cubes and their per-reflection metadata.
///
/// The metadata sequences are parallel: entry `i` of [`bboxes`](Self::bboxes)
/// and [`panels`](Self::panels) describe reflection `i`. Both must remain
/// stable for the lifetime of the source. The cube returned by
/// [`read`](Self::read) must have shape `bboxes()[i].shape()`.
pub trait RawSource {
    /// Total number of reflections available.
    fn len(&self) -> usize;

    /// True if the source holds no reflections.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bounding boxes, one per reflection.
    fn bboxes(&self) -> &[BoundingBox];

    /// Panel indices, one per reflection.
    fn panels(&self) -> &[usize];

    /// Reads the raw voxel cube for one reflection, `(frame, row, column)`
    /// indexed.
    ///
    /// # Errors
    /// Returns an error if `index >= len()` or the underlying data cannot
    /// be produced.
    fn read(&self, index: usize) -> Result<Array3<i32>>;
}

/// A raw-data source over pre-loaded voxel cubes.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    bboxes: Vec<BoundingBox>,
    panels: Vec<usize>,
    cubes: Vec<Array3<i32>>,
}

impl InMemorySource {
    /// Creates a source from parallel metadata and cube sequences.
    ///
    /// # Errors
    /// Fails if the three sequences have unequal lengths, or if any cube's
    /// shape disagrees with its bounding box.
    pub fn new(
        bboxes: Vec<BoundingBox>,
        panels: Vec<usize>,
        cubes: Vec<Array3<i32>>,
    ) -> Result<Self> {
        if bboxes.len() != panels.len() {
            return Err(Error::MetadataLengthMismatch {
                bboxes: bboxes.len(),
                panels: panels.len(),
            });
        }
        if cubes.len() != bboxes.len() {
            return Err(Error::CubeCountMismatch {
                cubes: cubes.len(),
                expected: bboxes.len(),
            });
        }
        for (index, (bbox, cube)) in bboxes.iter().zip(&cubes).enumerate() {
            if cube.dim() != bbox.shape() {
                return Err(Error::CubeShapeMismatch {
                    index,
                    expected: bbox.shape(),
                    actual: cube.dim(),
                });
            }
        }
        Ok(Self {
            bboxes,
            panels,
            cubes,
        })
    }
}

impl RawSource for InMemorySource {
    fn len(&self) -> usize {
        self.cubes.len()
    }

    fn bboxes(&self) -> &[BoundingBox] {
        &self.bboxes
    }

    fn panels(&self) -> &[usize] {
        &self.panels
    }

    fn read(&self, index: usize) -> Result<Array3<i32>> {
        self.cubes
            .get(index)
            .cloned()
            .ok_or(Error::IndexOutOfRange {
                index,
                len: self.cubes.len(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox(x0: i32, x1: i32, y0: i32, y1: i32, z0: i32, z1: i32) -> BoundingBox {
        BoundingBox::new(x0, x1, y0, y1, z0, z1).unwrap()
    }

    #[test]
    fn test_in_memory_source_round_trip() {
        let boxes = vec![bbox(0, 2, 0, 3, 0, 1), bbox(4, 6, 4, 6, 1, 3)];
        let cubes = vec![
            Array3::from_elem((1, 3, 2), 7),
            Array3::from_elem((2, 2, 2), 9),
        ];
        let source = InMemorySource::new(boxes.clone(), vec![0, 1], cubes).unwrap();
        assert_eq!(source.len(), 2);
        assert!(!source.is_empty());
        assert_eq!(source.bboxes(), &boxes[..]);
        assert_eq!(source.panels(), &[0, 1]);
        assert_eq!(source.read(1).unwrap()[(0, 0, 0)], 9);
    }

    #[test]
    fn test_read_past_end_fails() {
        let source = InMemorySource::new(
            vec![bbox(0, 1, 0, 1, 0, 1)],
            vec![0],
            vec![Array3::zeros((1, 1, 1))],
        )
        .unwrap();
        assert!(matches!(
            source.read(1),
            Err(Error::IndexOutOfRange { index: 1, len: 1 })
        ));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let err = InMemorySource::new(vec![bbox(0, 1, 0, 1, 0, 1)], vec![0, 0], vec![]);
        assert!(matches!(err, Err(Error::MetadataLengthMismatch { .. })));

        let err = InMemorySource::new(vec![bbox(0, 1, 0, 1, 0, 1)], vec![0], vec![]);
        assert!(matches!(
            err,
            Err(Error::CubeCountMismatch {
                cubes: 0,
                expected: 1,
            })
        ));
    }

    #[test]
    fn test_cube_shape_mismatch_rejected() {
        let err = InMemorySource::new(
            vec![bbox(0, 2, 0, 2, 0, 1)],
            vec![0],
            vec![Array3::zeros((1, 2, 3))],
        );
        assert!(matches!(
            err,
            Err(Error::CubeShapeMismatch {
                index: 0,
                expected: (1, 2, 2),
                actual: (1, 2, 3),
            })
        ));
    }
}
