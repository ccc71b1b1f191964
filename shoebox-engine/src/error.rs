//! Error types for shoebox-engine.

use thiserror::Error;

/// Result type for calibration and correction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Calibration and correction error types.
#[derive(Error, Debug)]
pub enum Error {
    /// Gain map element that is zero or negative.
    #[error("non-positive gain {value} at pixel ({row}, {col}) on panel {panel}")]
    NonPositiveGain {
        panel: usize,
        row: usize,
        col: usize,
        value: f64,
    },

    /// Dark or bad-pixel map whose shape differs from the panel's gain map.
    #[error("calibration map shape mismatch on panel {panel}: gain {gain:?}, dark {dark:?}, mask {mask:?}")]
    MapShapeMismatch {
        panel: usize,
        gain: (usize, usize),
        dark: (usize, usize),
        mask: (usize, usize),
    },

    /// Unequal numbers of gain, dark, and bad-pixel maps.
    #[error("calibration map count mismatch: {gain} gain, {dark} dark, {mask} bad-pixel")]
    MapCountMismatch {
        gain: usize,
        dark: usize,
        mask: usize,
    },

    /// Panel index with no registered calibration maps.
    #[error("panel {panel} out of range (have maps for {count} panels)")]
    PanelOutOfRange { panel: usize, count: usize },

    /// Bounding box extending beyond its panel's calibration maps.
    #[error("bounding box of reflection {index} exceeds panel {panel} extent ({rows}x{cols})")]
    BoxOutsidePanel {
        index: usize,
        panel: usize,
        rows: usize,
        cols: usize,
    },

    /// Core library error.
    #[error("core error: {0}")]
    CoreError(#[from] shoebox_core::Error),
}
