//! Detection of solid dark borders left by a camera's frame mask.
//!
//! A row (or column) is classified as border when more than
//! `border_fraction` of its pixels have luminance strictly below
//! `black_threshold`. Each edge is scanned inward independently until the
//! first non-border line; the remaining interior is padded by
//! [`BORDER_PADDING`] pixels and returned as a crop rectangle.
//!
//! Detection never fails. When nothing is found, or when the whole image is
//! classified as border, the result is `None` and callers leave the image
//! uncropped.

use serde::{Deserialize, Serialize};

use crate::decode::DecodedImage;
use crate::luminance::luminance_plane;
use crate::transform::CropRect;

/// Pixels kept outside the detected interior on every side.
pub const BORDER_PADDING: u32 = 2;

/// Luminance below which a pixel counts as black (0-255 scale).
pub const DEFAULT_BLACK_THRESHOLD: u8 = 45;

/// Fraction of black pixels above which a row or column is border.
pub const DEFAULT_BORDER_FRACTION: f32 = 0.85;

/// Classification thresholds shared by every detection run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BorderThresholds {
    /// Luminance below which a pixel counts as black.
    pub black_threshold: u8,
    /// Minimum fraction of black pixels for a line to be border.
    pub border_fraction: f32,
}

impl Default for BorderThresholds {
    fn default() -> Self {
        Self {
            black_threshold: DEFAULT_BLACK_THRESHOLD,
            border_fraction: DEFAULT_BORDER_FRACTION,
        }
    }
}

/// Border detector with thresholds fixed at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BorderDetector {
    thresholds: BorderThresholds,
}

impl BorderDetector {
    pub fn new(thresholds: BorderThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> BorderThresholds {
        self.thresholds
    }

    /// Find the padded interior of `image` after stripping dark margins.
    ///
    /// Returns `None` when no edge has a border, when the interior collapses
    /// (e.g. an entirely black frame), or when the image is empty. The
    /// returned rectangle always satisfies `left < right <= width` and
    /// `top < bottom <= height`.
    pub fn detect(&self, image: &DecodedImage) -> Option<CropRect> {
        if image.is_empty() {
            return None;
        }

        let (width, height) = (image.width as usize, image.height as usize);
        let lum = luminance_plane(image);
        let threshold = self.thresholds.black_threshold;

        // Count dark pixels per row and per column in a single pass
        let mut row_dark = vec![0usize; height];
        let mut col_dark = vec![0usize; width];
        for (y, row) in lum.chunks_exact(width).enumerate() {
            for (x, &value) in row.iter().enumerate() {
                if value < threshold {
                    row_dark[y] += 1;
                    col_dark[x] += 1;
                }
            }
        }

        let fraction = self.thresholds.border_fraction as f64;
        let row_is_border = |y: usize| row_dark[y] as f64 / width as f64 > fraction;
        let col_is_border = |x: usize| col_dark[x] as f64 / height as f64 > fraction;

        let (top, bottom) = scan_inward(height, row_is_border);
        let (left, right) = scan_inward(width, col_is_border);

        if top == 0 && bottom == height && left == 0 && right == width {
            log::trace!("no border found in {}x{} image", width, height);
            return None;
        }
        if top >= bottom || left >= right {
            log::debug!(
                "border scan collapsed ({}..{} x {}..{}), treating as undetected",
                left,
                right,
                top,
                bottom
            );
            return None;
        }

        let pad = BORDER_PADDING as usize;
        let rect = CropRect::new(
            left.saturating_sub(pad) as i32,
            top.saturating_sub(pad) as i32,
            (right + pad).min(width) as i32,
            (bottom + pad).min(height) as i32,
        );
        log::debug!("detected border interior {:?} in {}x{} image", rect, width, height);
        Some(rect)
    }
}

/// Scan from both ends of `0..len` toward the middle while `is_border` holds.
///
/// Returns `(start, end)` where `[0, start)` and `[end, len)` are border.
/// The trailing scan never crosses the leading one.
fn scan_inward(len: usize, is_border: impl Fn(usize) -> bool) -> (usize, usize) {
    let mut start = 0;
    while start < len && is_border(start) {
        start += 1;
    }
    let mut end = len;
    while end > start && is_border(end - 1) {
        end -= 1;
    }
    (start, end)
}

/// Detect borders with the default thresholds.
pub fn detect_border(image: &DecodedImage) -> Option<CropRect> {
    BorderDetector::default().detect(image)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
