//! shoebox-engine: Calibration and masking for diffraction shoeboxes.
//!
//! This crate holds the two active components of the shoebox pipeline: the
//! [`CalibrationStore`], which owns validated per-panel gain/dark/bad-pixel
//! maps, and the [`CorrectionEngine`], which combines raw voxel cubes with
//! those maps into integration-ready [`shoebox_core::Shoebox`] values.
//!

pub mod calibration;
pub mod engine;
pub mod error;

pub use calibration::{CalibrationStore, PanelMaps};
pub use engine::CorrectionEngine;
pub use error::{Error, Result};
