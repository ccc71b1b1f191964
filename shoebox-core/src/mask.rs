//! Per-voxel mask codes.
//!
//! Each voxel of a shoebox carries a small set of independent boolean facts
//! encoded as bit flags. The correction engine only ever sets [`MaskCode::VALID`]
//! (or leaves the word empty for bad detector pixels); the background,
//! foreground, and strong bits are written by downstream integration stages.

use bitflags::bitflags;

bitflags! {
    /// Bit-flag mask word for one shoebox voxel.
    ///
    /// Flags combine with bitwise OR and are tested with bitwise AND; multiple
    /// flags may be set at once (e.g. a strong foreground pixel is
    /// `VALID | FOREGROUND | STRONG`).
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct MaskCode: u32 {
        /// Pixel is usable for this reflection (not a detector defect).
        const VALID = 1 << 0;
        /// Pixel is used for background determination.
        const BACKGROUND = 1 << 1;
        /// Pixel is used for intensity integration.
        const FOREGROUND = 1 << 2;
        /// Pixel is above the strong-spot threshold.
        const STRONG = 1 << 3;
    }
}

impl MaskCode {
    /// True if the valid bit is set.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.contains(Self::VALID)
    }
}
