//! Lossless PNG encoding for exported halves.

use std::io::Cursor;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::ImageEncoder;

use super::{validate_buffer, EncodeError};
use crate::decode::ColorMode;

/// Encode RGB or luminance pixel data to PNG bytes at maximum compression.
pub fn encode_png(
    pixels: &[u8],
    width: u32,
    height: u32,
    mode: ColorMode,
) -> Result<Vec<u8>, EncodeError> {
    validate_buffer(pixels, width, height, mode)?;

    let mut buffer = Cursor::new(Vec::new());
    let encoder =
        PngEncoder::new_with_quality(&mut buffer, CompressionType::Best, FilterType::Adaptive);
    encoder
        .write_image(pixels, width, height, mode.extended_color_type())
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_encode_png_signature() {
        let png = encode_png(&[200u8; 6 * 4 * 3], 6, 4, ColorMode::Rgb).unwrap();
        assert_eq!(&png[0..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_encode_png_is_lossless() {
        let pixels: Vec<u8> = (0..16 * 9 * 3).map(|i| (i * 7 % 256) as u8).collect();
        let png = encode_png(&pixels, 16, 9, ColorMode::Rgb).unwrap();

        let decoded = image::load_from_memory(&png).unwrap().into_rgb8();
        assert_eq!(decoded.dimensions(), (16, 9));
        assert_eq!(decoded.into_raw(), pixels);
    }

    #[test]
    fn test_encode_png_luma_stays_gray() {
        let pixels: Vec<u8> = (0..25).map(|i| i * 10).collect();
        let png = encode_png(&pixels, 5, 5, ColorMode::Luma).unwrap();

        let decoded = image::load_from_memory(&png).unwrap();
        assert!(!decoded.color().has_color());
        assert_eq!(decoded.into_luma8().into_raw(), pixels);
    }

    #[test]
    fn test_encode_png_zero_height() {
        let result = encode_png(&[], 10, 0, ColorMode::Rgb);
        assert!(matches!(result, Err(EncodeError::InvalidDimensions { .. })));
    }
}
