//! shoebox-core: Core data types for diffraction shoebox processing.
//!
//! This crate provides the passive entities shared across the shoebox
//! pipeline: bounding boxes, per-voxel mask codes, the `Shoebox` value
//! itself, and the raw-data-source boundary the correction engine reads
//! through.
//!

pub mod bbox;
pub mod error;
pub mod mask;
pub mod shoebox;
pub mod source;

pub use bbox::BoundingBox;
pub use error::{Error, Result};
pub use mask::MaskCode;
pub use shoebox::Shoebox;
pub use source::{InMemorySource, RawSource};
