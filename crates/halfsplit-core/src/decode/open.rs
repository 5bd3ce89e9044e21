//! Decoding source photographs from disk.

use std::path::Path;

use image::ImageReader;

use super::{DecodeError, DecodedImage};

/// Open and decode an image file, normalizing it to RGB or luminance.
///
/// The format is guessed from the file contents rather than the extension,
/// so a mislabeled PNG still decodes. The file handle is owned by the reader
/// and released before this function returns, on success or failure.
///
/// # Errors
///
/// Returns `DecodeError::Io` if the file cannot be opened,
/// `DecodeError::UnsupportedFormat` if the format is not recognized, and
/// `DecodeError::Corrupted` if decoding fails.
pub fn open_image(path: &Path) -> Result<DecodedImage, DecodeError> {
    let img = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    log::trace!(
        "decoded {} ({}x{}, {:?})",
        path.display(),
        img.width(),
        img.height(),
        img.color()
    );
    Ok(DecodedImage::from_dynamic(img))
}
