//! Pixel-space cropping.
//!
//! Crop rectangles are expressed in pixels of the image they apply to, with
//! exclusive right and bottom edges. Rectangles that come from the
//! presentation layer are not trusted: out-of-range edges are clamped to the
//! image rather than rejected.
//!
//! # Example
//!
//! ```ignore
//! // Keep columns 10..90 and rows 5..45
//! let cropped = apply_crop(&image, CropRect::new(10, 5, 90, 45));
//! ```

use serde::{Deserialize, Serialize};

use crate::decode::DecodedImage;

/// A rectangle in pixel coordinates, right/bottom exclusive.
///
/// Fields are signed so that user-supplied coordinates outside the image
/// (including negative ones) can be represented and clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CropRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl CropRect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The rectangle covering an entire `width` x `height` image.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, to_i32(width), to_i32(height))
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Clamp to the bounds of a `width` x `height` image.
    ///
    /// Returns `(left, top, right, bottom)` as unsigned pixel indices. For a
    /// non-empty image the result is always at least 1x1: an inverted or
    /// fully out-of-range rectangle collapses onto the nearest edge pixel.
    pub fn clamp_to(&self, width: u32, height: u32) -> (u32, u32, u32, u32) {
        let (left, right) = clamp_span(self.left, self.right, width);
        let (top, bottom) = clamp_span(self.top, self.bottom, height);
        (left, top, right, bottom)
    }
}

fn to_i32(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

fn clamp_span(start: i32, end: i32, extent: u32) -> (u32, u32) {
    if extent == 0 {
        return (0, 0);
    }
    let start = start.clamp(0, to_i32(extent - 1)) as u32;
    let end = end.clamp(0, to_i32(extent)) as u32;
    (start, end.max(start + 1))
}

/// Crop an image to a pixel rectangle.
///
/// The rectangle is clamped to the image bounds first (see
/// [`CropRect::clamp_to`]). A rectangle covering the whole image returns a
/// copy of the original.
pub fn apply_crop(image: &DecodedImage, rect: CropRect) -> DecodedImage {
    let (left, top, right, bottom) = rect.clamp_to(image.width, image.height);

    // Fast path: full crop returns a clone
    if left == 0 && top == 0 && right == image.width && bottom == image.height {
        return image.clone();
    }

    copy_region(image, left, top, right - left, bottom - top)
}

/// Copy a region that is already known to lie inside the image.
pub(crate) fn copy_region(
    image: &DecodedImage,
    left: u32,
    top: u32,
    width: u32,
    height: u32,
) -> DecodedImage {
    let pixel_bytes = image.bytes_per_pixel();
    let src_stride = image.row_stride();
    let dst_stride = width as usize * pixel_bytes;
    let mut output = Vec::with_capacity(dst_stride * height as usize);

    // Copy pixel data row by row
    for y in top..top + height {
        let start = y as usize * src_stride + left as usize * pixel_bytes;
        output.extend_from_slice(&image.pixels[start..start + dst_stride]);
    }

    DecodedImage::with_mode(width, height, image.mode, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::ColorMode;

    /// Create a test image where each pixel has a unique value based on position.
    fn test_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                pixels.push(v); // R
                pixels.push(v); // G
                pixels.push(v); // B
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_full_crop_is_identity() {
        let img = test_image(50, 40);
        let result = apply_crop(&img, CropRect::full(50, 40));
        assert_eq!(result, img);
    }

    #[test]
    fn test_interior_crop() {
        let img = test_image(10, 10);
        let result = apply_crop(&img, CropRect::new(2, 3, 8, 9));

        assert_eq!(result.width, 6);
        assert_eq!(result.height, 6);
        // First pixel should be from position (2, 3) in the original
        assert_eq!(result.pixels[0], 32);
        // Last pixel from (7, 8)
        assert_eq!(*result.pixels.last().unwrap(), 87);
    }

    #[test]
    fn test_crop_clamps_oversized_rect() {
        let img = test_image(10, 10);
        let result = apply_crop(&img, CropRect::new(-5, -5, 500, 500));
        assert_eq!(result, img);
    }

    #[test]
    fn test_crop_clamps_right_edge() {
        let img = test_image(10, 10);
        let result = apply_crop(&img, CropRect::new(6, 0, 20, 10));

        assert_eq!(result.width, 4);
        assert_eq!(result.height, 10);
        assert_eq!(result.pixels[0], 6);
    }

    #[test]
    fn test_inverted_rect_collapses_to_one_pixel() {
        let img = test_image(10, 10);
        let result = apply_crop(&img, CropRect::new(7, 7, 3, 3));

        assert_eq!(result.width, 1);
        assert_eq!(result.height, 1);
        assert_eq!(result.pixels[0], 77);
    }

    #[test]
    fn test_rect_past_far_edge_keeps_last_pixel() {
        let img = test_image(10, 10);
        let result = apply_crop(&img, CropRect::new(30, 30, 40, 40));

        assert_eq!((result.width, result.height), (1, 1));
        assert_eq!(result.pixels[0], 99);
    }

    #[test]
    fn test_crop_luma_image() {
        let img = DecodedImage::with_mode(4, 2, ColorMode::Luma, (0..8).collect());
        let result = apply_crop(&img, CropRect::new(1, 0, 3, 2));

        assert_eq!(result.mode, ColorMode::Luma);
        assert_eq!(result.pixels, vec![1, 2, 5, 6]);
    }

    #[test]
    fn test_crop_empty_image() {
        let img = DecodedImage::new(0, 0, vec![]);
        let result = apply_crop(&img, CropRect::new(0, 0, 10, 10));
        assert!(result.is_empty());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
