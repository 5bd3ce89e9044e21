//! JPEG encoding for previews and exported halves.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::ImageEncoder;

use super::{validate_buffer, EncodeError};
use crate::decode::{narrow_samples, ColorMode};

/// Encode RGB or luminance pixel data to JPEG bytes.
///
/// JPEG holds 8 bits per sample, so 16-bit input is narrowed first.
///
/// # Arguments
///
/// * `pixels` - Pixel data in row-major order, `mode.bytes_per_pixel()` bytes per pixel
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `mode` - Channel layout of `pixels`
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
///
/// # Quality Guidelines
///
/// * 95: exported halves, which may be edited further
/// * 85: on-screen previews
/// * Below 60: visible artifacts
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    mode: ColorMode,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    validate_buffer(pixels, width, height, mode)?;

    let narrowed;
    let (pixels, mode) = if mode.is_sixteen_bit() {
        log::debug!("narrowing {:?} to 8 bits for JPEG output", mode);
        narrowed = narrow_samples(pixels);
        (narrowed.as_slice(), mode.to_eight_bit())
    } else {
        (pixels, mode)
    };

    // Clamp quality to valid range (1-100)
    let quality = quality.clamp(1, 100);

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
    encoder
        .write_image(pixels, width, height, mode.extended_color_type())
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}


// ============================================================================
// Property-Based Tests
// ============================================================================
