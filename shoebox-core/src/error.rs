//! Error types for shoebox-core.

use crate::bbox::BoundingBox;
use thiserror::Error;

/// Result type alias for shoebox operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for shoebox data handling.
#[derive(Error, Debug)]
pub enum Error {
    /// Reflection index beyond the available range.
    #[error("reflection index {index} out of range (have {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// Bounding box with a reversed axis.
    #[error("malformed bounding box: {bbox:?}")]
    MalformedBoundingBox { bbox: BoundingBox },

    /// Parallel metadata sequences of unequal length.
    #[error("metadata length mismatch: {bboxes} bounding boxes vs {panels} panel indices")]
    MetadataLengthMismatch { bboxes: usize, panels: usize },

    /// Cube count disagreeing with the metadata length.
    #[error("cube count mismatch: {cubes} cubes for {expected} reflections")]
    CubeCountMismatch { cubes: usize, expected: usize },

    /// Raw voxel cube whose shape disagrees with its bounding box.
    #[error(
        "raw cube shape mismatch for reflection {index}: expected {expected:?}, got {actual:?}"
    )]
    CubeShapeMismatch {
        index: usize,
        expected: (usize, usize, usize),
        actual: (usize, usize, usize),
    },
}
