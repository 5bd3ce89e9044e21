//! Core types for image decoding.

use image::{ColorType, DynamicImage, ExtendedColorType};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file could not be opened or read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file format is not recognized or supported.
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    Corrupted(String),

    /// A resize was requested with a zero target dimension.
    #[error("Invalid target dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

impl From<image::ImageError> for DecodeError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(io) => DecodeError::Io(io),
            image::ImageError::Unsupported(e) => DecodeError::UnsupportedFormat(e.to_string()),
            other => DecodeError::Corrupted(other.to_string()),
        }
    }
}

/// Filter type for image resizing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Pixel layout of a [`DecodedImage`].
///
/// 16-bit modes store each sample as two native-endian bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Three interleaved 8-bit channels.
    #[default]
    Rgb,
    /// A single 8-bit luminance channel.
    Luma,
    /// Three interleaved 16-bit channels.
    Rgb16,
    /// A single 16-bit luminance channel.
    Luma16,
}

impl ColorMode {
    /// Samples per pixel.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            ColorMode::Rgb | ColorMode::Rgb16 => 3,
            ColorMode::Luma | ColorMode::Luma16 => 1,
        }
    }

    #[inline]
    pub fn bytes_per_sample(self) -> usize {
        if self.is_sixteen_bit() {
            2
        } else {
            1
        }
    }

    #[inline]
    pub fn bytes_per_pixel(self) -> usize {
        self.channels() * self.bytes_per_sample()
    }

    #[inline]
    pub fn is_sixteen_bit(self) -> bool {
        matches!(self, ColorMode::Rgb16 | ColorMode::Luma16)
    }

    /// The 8-bit mode with the same channels.
    pub fn to_eight_bit(self) -> ColorMode {
        match self {
            ColorMode::Rgb | ColorMode::Rgb16 => ColorMode::Rgb,
            ColorMode::Luma | ColorMode::Luma16 => ColorMode::Luma,
        }
    }

    /// The matching color type for the `image` crate's encoders.
    pub fn extended_color_type(self) -> ExtendedColorType {
        match self {
            ColorMode::Rgb => ExtendedColorType::Rgb8,
            ColorMode::Luma => ExtendedColorType::L8,
            ColorMode::Rgb16 => ExtendedColorType::Rgb16,
            ColorMode::Luma16 => ExtendedColorType::L16,
        }
    }
}

/// Scale a 16-bit sample to 8 bits, rounding to nearest.
#[inline]
pub fn narrow_sample(value: u16) -> u8 {
    ((u32::from(value) + 128) / 257) as u8
}

/// Narrow a buffer of native-endian 16-bit samples to one byte per sample.
pub fn narrow_samples(bytes: &[u8]) -> Vec<u8> {
    bytes
        .chunks_exact(2)
        .map(|b| narrow_sample(u16::from_ne_bytes([b[0], b[1]])))
        .collect()
}

fn samples_to_bytes(samples: Vec<u16>) -> Vec<u8> {
    samples.into_iter().flat_map(u16::to_ne_bytes).collect()
}

fn bytes_to_samples(bytes: &[u8]) -> Vec<u16> {
    bytes
        .chunks_exact(2)
        .map(|b| u16::from_ne_bytes([b[0], b[1]]))
        .collect()
}

/// A decoded image with 8- or 16-bit pixel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Channel layout of `pixels`.
    pub mode: ColorMode,
    /// Pixel data in row-major order.
    /// Length should be width * height * mode.bytes_per_pixel().
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Create a new RGB image with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self::with_mode(width, height, ColorMode::Rgb, pixels)
    }

    /// Create a new image with an explicit color mode.
    pub fn with_mode(width: u32, height: u32, mode: ColorMode, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * mode.bytes_per_pixel(),
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            mode,
            pixels,
        }
    }

    /// Create a DecodedImage from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            mode: ColorMode::Rgb,
            pixels: img.into_raw(),
        }
    }

    /// Create a DecodedImage from an image::GrayImage.
    pub fn from_gray_image(img: image::GrayImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            mode: ColorMode::Luma,
            pixels: img.into_raw(),
        }
    }

    /// Create a DecodedImage from a 16-bit RGB buffer.
    pub fn from_rgb16_image(img: image::ImageBuffer<image::Rgb<u16>, Vec<u16>>) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            mode: ColorMode::Rgb16,
            pixels: samples_to_bytes(img.into_raw()),
        }
    }

    /// Create a DecodedImage from a 16-bit grayscale buffer.
    pub fn from_gray16_image(img: image::ImageBuffer<image::Luma<u16>, Vec<u16>>) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            mode: ColorMode::Luma16,
            pixels: samples_to_bytes(img.into_raw()),
        }
    }

    /// Normalize any decoded image into one of the supported layouts.
    ///
    /// 16-bit sources keep their depth; grayscale sources (with or without
    /// alpha) become a luminance mode and everything else an RGB mode.
    /// Alpha is discarded. Float images are narrowed to 8 bits.
    pub fn from_dynamic(img: DynamicImage) -> Self {
        match img.color() {
            ColorType::Rgb16 | ColorType::Rgba16 => Self::from_rgb16_image(img.into_rgb16()),
            ColorType::L16 | ColorType::La16 => Self::from_gray16_image(img.into_luma16()),
            color if color.has_color() => Self::from_rgb_image(img.into_rgb8()),
            _ => Self::from_gray_image(img.into_luma8()),
        }
    }

    /// Convert to a DynamicImage for use with the `image` crate.
    ///
    /// Returns `None` if the pixel buffer does not match the dimensions.
    pub fn to_dynamic(&self) -> Option<DynamicImage> {
        let (width, height) = (self.width, self.height);
        match self.mode {
            ColorMode::Rgb => image::RgbImage::from_raw(width, height, self.pixels.clone())
                .map(DynamicImage::ImageRgb8),
            ColorMode::Luma => image::GrayImage::from_raw(width, height, self.pixels.clone())
                .map(DynamicImage::ImageLuma8),
            ColorMode::Rgb16 => {
                image::ImageBuffer::from_raw(width, height, bytes_to_samples(&self.pixels))
                    .map(DynamicImage::ImageRgb16)
            }
            ColorMode::Luma16 => {
                image::ImageBuffer::from_raw(width, height, bytes_to_samples(&self.pixels))
                    .map(DynamicImage::ImageLuma16)
            }
        }
    }

    /// Bytes per pixel for this image.
    #[inline]
    pub fn bytes_per_pixel(&self) -> usize {
        self.mode.bytes_per_pixel()
    }

    /// Bytes in one row of pixels.
    #[inline]
    pub fn row_stride(&self) -> usize {
        self.width as usize * self.bytes_per_pixel()
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}
