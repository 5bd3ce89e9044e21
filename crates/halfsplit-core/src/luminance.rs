//! Luminance calculation using ITU-R BT.709 coefficients.
//!
//! Border detection classifies pixels as "black" on a single 0-255 brightness
//! channel; this module produces that channel from any [`DecodedImage`].

use crate::decode::{narrow_samples, ColorMode, DecodedImage};

/// ITU-R BT.709 coefficient for red channel in luminance calculation.
pub const LUMINANCE_R: f32 = 0.2126;

/// ITU-R BT.709 coefficient for green channel in luminance calculation.
pub const LUMINANCE_G: f32 = 0.7152;

/// ITU-R BT.709 coefficient for blue channel in luminance calculation.
pub const LUMINANCE_B: f32 = 0.0722;

/// Calculate luminance from u8 RGB values (0 to 255).
///
/// # Returns
/// Luminance value (0-255)
#[inline]
pub fn calculate_luminance_u8(r: u8, g: u8, b: u8) -> u8 {
    let lum = LUMINANCE_R * r as f32 + LUMINANCE_G * g as f32 + LUMINANCE_B * b as f32;
    lum.clamp(0.0, 255.0).round() as u8
}

/// Convert an image into a row-major plane of luminance values.
///
/// The result has exactly `width * height` entries on the 0-255 scale.
/// 8-bit luminance images are returned as a copy of their pixel data;
/// 16-bit images are narrowed first.
pub fn luminance_plane(image: &DecodedImage) -> Vec<u8> {
    match image.mode {
        ColorMode::Luma => image.pixels.clone(),
        ColorMode::Luma16 => narrow_samples(&image.pixels),
        ColorMode::Rgb => rgb_luminance(&image.pixels),
        ColorMode::Rgb16 => rgb_luminance(&narrow_samples(&image.pixels)),
    }
}

fn rgb_luminance(rgb: &[u8]) -> Vec<u8> {
    rgb.chunks_exact(3)
        .map(|px| calculate_luminance_u8(px[0], px[1], px[2]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coefficients_sum_to_one() {
        let sum = LUMINANCE_R + LUMINANCE_G + LUMINANCE_B;
        assert!((sum - 1.0).abs() < 1e-6, "Coefficients should sum to 1.0");
    }

    #[test]
    fn test_luminance_extremes() {
        assert_eq!(calculate_luminance_u8(255, 255, 255), 255);
        assert_eq!(calculate_luminance_u8(0, 0, 0), 0);
    }

    #[test]
    fn test_luminance_gray_preserves_value() {
        for v in [0u8, 44, 45, 46, 128, 255] {
            let lum = calculate_luminance_u8(v, v, v);
            assert!(
                (lum as i32 - v as i32).abs() <= 1,
                "Gray {} should produce luminance ~{}, got {}",
                v,
                v,
                lum
            );
        }
    }

    #[test]
    fn test_saturated_blue_reads_as_dark() {
        // Deep blue sky is below the default black threshold of 45
        assert!(calculate_luminance_u8(0, 0, 255) < 45);
        // Pure red is not
        assert!(calculate_luminance_u8(255, 0, 0) >= 45);
    }

    #[test]
    fn test_luminance_plane_rgb() {
        let img = DecodedImage::new(2, 1, vec![255, 255, 255, 0, 0, 0]);
        assert_eq!(luminance_plane(&img), vec![255, 0]);
    }

    #[test]
    fn test_luminance_plane_sixteen_bit() {
        let samples = [0u16, 257 * 44, u16::MAX];
        let bytes: Vec<u8> = samples.iter().flat_map(|v| v.to_ne_bytes()).collect();

        let gray = DecodedImage::with_mode(3, 1, ColorMode::Luma16, bytes.clone());
        assert_eq!(luminance_plane(&gray), vec![0, 44, 255]);

        let rgb = DecodedImage::with_mode(1, 1, ColorMode::Rgb16, bytes);
        assert_eq!(luminance_plane(&rgb), vec![calculate_luminance_u8(0, 44, 255)]);
    }

    #[test]
    fn test_luminance_plane_luma_is_identity() {
        let img = DecodedImage::with_mode(3, 1, ColorMode::Luma, vec![5, 50, 250]);
        assert_eq!(luminance_plane(&img), vec![5, 50, 250]);
    }
}
