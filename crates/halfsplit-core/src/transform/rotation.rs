//! Quarter-turn image rotation.
//!
//! Rotations are restricted to multiples of 90 degrees, so every output pixel
//! maps to exactly one source pixel and no interpolation is needed. The
//! output canvas always fits the rotated content: 90 and 270 degree turns
//! swap width and height.
//!
//! # Algorithm
//!
//! The rotation uses inverse mapping: for each pixel in the output image we
//! compute the single source pixel it comes from. For a `w` x `h` source
//! rotated counter-clockwise:
//! ```text
//! 90:  src = (w - 1 - dst_y, dst_x)
//! 180: src = (w - 1 - dst_x, h - 1 - dst_y)
//! 270: src = (dst_y, h - 1 - dst_x)
//! ```

use crate::decode::DecodedImage;

/// A counter-clockwise rotation by a multiple of 90 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuarterTurn {
    #[default]
    None,
    Ccw90,
    Ccw180,
    Ccw270,
}

impl QuarterTurn {
    /// Counter-clockwise angle in degrees.
    pub fn degrees(self) -> u32 {
        match self {
            QuarterTurn::None => 0,
            QuarterTurn::Ccw90 => 90,
            QuarterTurn::Ccw180 => 180,
            QuarterTurn::Ccw270 => 270,
        }
    }

    /// Returns true if this rotation swaps width and height.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(self, QuarterTurn::Ccw90 | QuarterTurn::Ccw270)
    }
}

/// Compute the dimensions of the canvas holding a rotated image.
pub fn compute_rotated_bounds(width: u32, height: u32, turn: QuarterTurn) -> (u32, u32) {
    if turn.swaps_dimensions() {
        (height, width)
    } else {
        (width, height)
    }
}

/// Rotate an image counter-clockwise by a quarter turn.
///
/// The image is rotated about its center and the canvas is sized to the
/// rotated content, so no corners are clipped.
pub fn apply_rotation(image: &DecodedImage, turn: QuarterTurn) -> DecodedImage {
    // Fast path: no rotation needed
    if turn == QuarterTurn::None {
        return image.clone();
    }

    let (src_w, src_h) = (image.width as usize, image.height as usize);
    let (dst_w, dst_h) = compute_rotated_bounds(image.width, image.height, turn);
    let pixel_bytes = image.bytes_per_pixel();

    let mut output = Vec::with_capacity(image.pixels.len());

    for dst_y in 0..dst_h as usize {
        for dst_x in 0..dst_w as usize {
            let (src_x, src_y) = match turn {
                QuarterTurn::Ccw90 => (src_w - 1 - dst_y, dst_x),
                QuarterTurn::Ccw180 => (src_w - 1 - dst_x, src_h - 1 - dst_y),
                QuarterTurn::Ccw270 => (dst_y, src_h - 1 - dst_x),
                QuarterTurn::None => (dst_x, dst_y),
            };
            let src_idx = (src_y * src_w + src_x) * pixel_bytes;
            output.extend_from_slice(&image.pixels[src_idx..src_idx + pixel_bytes]);
        }
    }

    DecodedImage::with_mode(dst_w, dst_h, image.mode, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::ColorMode;

    /// 3x2 luminance image:
    /// ```text
    /// 1 2 3
    /// 4 5 6
    /// ```
    fn small_image() -> DecodedImage {
        DecodedImage::with_mode(3, 2, ColorMode::Luma, vec![1, 2, 3, 4, 5, 6])
    }

    /// Create a simple test image with a gradient pattern.
    fn test_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push((x * 8) as u8);
                pixels.push((y * 8) as u8);
                pixels.push(0);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_no_rotation() {
        let img = test_image(10, 5);
        let result = apply_rotation(&img, QuarterTurn::None);
        assert_eq!(result, img);
    }

    #[test]
    fn test_ccw90_pixels() {
        let result = apply_rotation(&small_image(), QuarterTurn::Ccw90);

        assert_eq!((result.width, result.height), (2, 3));
        // 3 6
        // 2 5
        // 1 4
        assert_eq!(result.pixels, vec![3, 6, 2, 5, 1, 4]);
    }

    #[test]
    fn test_ccw180_pixels() {
        let result = apply_rotation(&small_image(), QuarterTurn::Ccw180);

        assert_eq!((result.width, result.height), (3, 2));
        assert_eq!(result.pixels, vec![6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_ccw270_pixels() {
        let result = apply_rotation(&small_image(), QuarterTurn::Ccw270);

        assert_eq!((result.width, result.height), (2, 3));
        // 4 1
        // 5 2
        // 6 3
        assert_eq!(result.pixels, vec![4, 1, 5, 2, 6, 3]);
    }

    #[test]
    fn test_ccw270_matches_image_crate_clockwise() {
        let img = test_image(7, 4);
        let ours = apply_rotation(&img, QuarterTurn::Ccw270);
        let theirs = DecodedImage::from_dynamic(img.to_dynamic().unwrap().rotate90());
        assert_eq!(ours, theirs);
    }

    #[test]
    fn test_ccw90_matches_image_crate_counter_clockwise() {
        let img = test_image(7, 4);
        let ours = apply_rotation(&img, QuarterTurn::Ccw90);
        let theirs = DecodedImage::from_dynamic(img.to_dynamic().unwrap().rotate270());
        assert_eq!(ours, theirs);
    }

    #[test]
    fn test_rgb_channels_stay_together() {
        let img = DecodedImage::new(2, 1, vec![10, 20, 30, 40, 50, 60]);
        let result = apply_rotation(&img, QuarterTurn::Ccw180);
        assert_eq!(result.pixels, vec![40, 50, 60, 10, 20, 30]);
    }

    #[test]
    fn test_rotated_bounds() {
        assert_eq!(compute_rotated_bounds(100, 50, QuarterTurn::None), (100, 50));
        assert_eq!(compute_rotated_bounds(100, 50, QuarterTurn::Ccw90), (50, 100));
        assert_eq!(compute_rotated_bounds(100, 50, QuarterTurn::Ccw180), (100, 50));
        assert_eq!(compute_rotated_bounds(100, 50, QuarterTurn::Ccw270), (50, 100));
    }

    #[test]
    fn test_empty_image_rotation() {
        let img = DecodedImage::new(0, 0, vec![]);
        let result = apply_rotation(&img, QuarterTurn::Ccw90);
        assert!(result.is_empty());
    }

    #[test]
    fn test_single_column_rotation() {
        let img = DecodedImage::with_mode(1, 3, ColorMode::Luma, vec![1, 2, 3]);
        let result = apply_rotation(&img, QuarterTurn::Ccw90);
        assert_eq!((result.width, result.height), (3, 1));
        assert_eq!(result.pixels, vec![1, 2, 3]);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn turn_strategy() -> impl Strategy<Value = QuarterTurn> {
        prop_oneof![
            Just(QuarterTurn::None),
            Just(QuarterTurn::Ccw90),
            Just(QuarterTurn::Ccw180),
            Just(QuarterTurn::Ccw270),
        ]
    }

    fn create_test_image(width: u32, height: u32) -> DecodedImage {
        let pixels = (0..width * height * 3).map(|i| (i * 7 % 256) as u8).collect();
        DecodedImage::new(width, height, pixels)
    }

    proptest! {
        /// Property: rotation never loses or invents pixels.
        #[test]
        fn prop_rotation_preserves_pixel_count(
            (width, height) in (1u32..=40, 1u32..=40),
            turn in turn_strategy(),
        ) {
            let img = create_test_image(width, height);
            let result = apply_rotation(&img, turn);

            prop_assert_eq!(result.pixels.len(), img.pixels.len());
            prop_assert_eq!(
                (result.width, result.height),
                compute_rotated_bounds(width, height, turn)
            );
        }

        /// Property: four quarter turns return the original image.
        #[test]
        fn prop_four_turns_identity(
            (width, height) in (1u32..=30, 1u32..=30),
        ) {
            let img = create_test_image(width, height);
            let mut result = img.clone();
            for _ in 0..4 {
                result = apply_rotation(&result, QuarterTurn::Ccw90);
            }
            prop_assert_eq!(result, img);
        }

        /// Property: 90 then 270 is the identity.
        #[test]
        fn prop_opposite_turns_cancel(
            (width, height) in (1u32..=30, 1u32..=30),
        ) {
            let img = create_test_image(width, height);
            let there = apply_rotation(&img, QuarterTurn::Ccw90);
            let back = apply_rotation(&there, QuarterTurn::Ccw270);
            prop_assert_eq!(back, img);
        }
    }
}
