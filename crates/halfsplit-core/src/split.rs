//! Splitting a dual-frame photograph at its vertical midline.

use serde::{Deserialize, Serialize};

use crate::decode::DecodedImage;
use crate::transform::crop::copy_region;

/// One side of a dual-frame photograph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Half {
    Left,
    Right,
}

impl Half {
    /// Suffix appended to the source file stem for this half's output.
    pub fn file_suffix(self) -> &'static str {
        match self {
            Half::Left => "_left",
            Half::Right => "_right",
        }
    }
}

/// Column at which an image of `width` pixels is split.
#[inline]
pub fn split_column(width: u32) -> u32 {
    width / 2
}

/// Split an image into its left and right halves.
///
/// The left half holds columns `[0, width / 2)` and the right half the
/// remaining columns, so an odd width gives the extra column to the right.
/// Images narrower than two pixels produce degenerate (zero- or
/// one-column) halves rather than an error.
pub fn split_halves(image: &DecodedImage) -> (DecodedImage, DecodedImage) {
    let mid_x = split_column(image.width);
    let left = copy_region(image, 0, 0, mid_x, image.height);
    let right = copy_region(image, mid_x, 0, image.width - mid_x, image.height);
    (left, right)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
