//! Image encoding for previews and exported halves.
//!
//! This module provides functionality for:
//! - Encoding RGB or luminance pixels to JPEG with configurable quality
//! - Encoding RGB or luminance pixels to lossless PNG
//! - Choosing the output format from a file extension
//! - Wrapping encoded bytes in a base64 data URL
//!
//! # Examples
//!
//! ```ignore
//! use halfsplit_core::encode::{encode_image, OutputFormat};
//!
//! let bytes = encode_image(&half, OutputFormat::Png, 95).unwrap();
//! ```

mod data_url;
mod format;
mod jpeg;
mod png;

pub use data_url::to_data_url;
pub use format::OutputFormat;
pub use jpeg::encode_jpeg;
pub use png::encode_png;

use thiserror::Error;

use crate::decode::{ColorMode, DecodedImage};

/// Errors that can occur while encoding an image.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * bytes per pixel), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    /// The requested output extension has no encoder
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
}

/// Check that a pixel buffer matches its declared dimensions.
fn validate_buffer(
    pixels: &[u8],
    width: u32,
    height: u32,
    mode: ColorMode,
) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * mode.bytes_per_pixel();
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}

/// Encode a decoded image in the given format.
///
/// `jpeg_quality` is ignored for PNG output.
pub fn encode_image(
    image: &DecodedImage,
    format: OutputFormat,
    jpeg_quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    match format {
        OutputFormat::Jpeg => encode_jpeg(
            &image.pixels,
            image.width,
            image.height,
            image.mode,
            jpeg_quality,
        ),
        OutputFormat::Png => encode_png(&image.pixels, image.width, image.height, image.mode),
    }
}
