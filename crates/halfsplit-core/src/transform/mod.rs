//! Image transformation operations: cropping and rotation.
//!
//! # Transform Order
//!
//! Each half of a dual-frame photograph is transformed in this order:
//! 1. Crop (explicit coordinates, or the border-detected interior)
//! 2. Rotation
//!
//! Reordering would change the basis of the crop coordinates, which are
//! always expressed against the unrotated half.
//!
//! # Coordinate System
//!
//! - Crop coordinates are pixels, right/bottom exclusive
//! - Internal rotation angles are counter-clockwise quarter turns
//! - Origin is the top-left corner

pub(crate) mod crop;
mod pipeline;
mod rotation;

pub use crop::{apply_crop, CropRect};
pub use pipeline::{transform_half, AppliedCrop, TransformedHalf};
pub use rotation::{apply_rotation, compute_rotated_bounds, QuarterTurn};
