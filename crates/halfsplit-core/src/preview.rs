//! On-screen previews of each half, encoded as JPEG data URLs.
//!
//! Previews are capped at [`PREVIEW_MAX_EDGE`] pixels on their longest side.
//! The cap only affects what is shown; crop coordinates reported alongside a
//! preview are always in the full-resolution half's pixel space.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::border::BorderDetector;
use crate::decode::{open_image, resize_to_fit, DecodeError, DecodedImage, FilterType};
use crate::encode::{encode_jpeg, to_data_url, EncodeError};
use crate::split::split_halves;
use crate::transform::{apply_crop, CropRect};

/// Longest edge of a preview, in pixels.
pub const PREVIEW_MAX_EDGE: u32 = 2048;

/// JPEG quality used for previews.
pub const PREVIEW_QUALITY: u8 = 85;

const PREVIEW_MEDIA_TYPE: &str = "image/jpeg";

/// Errors that can occur while building previews.
#[derive(Debug, Error)]
pub enum PreviewError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Downsample an image for display and encode it as a JPEG data URL.
///
/// Returns `Ok(None)` when there is no image to show. Images already within
/// the preview cap keep their size.
pub fn encode_preview(image: Option<&DecodedImage>) -> Result<Option<String>, PreviewError> {
    let Some(image) = image else {
        return Ok(None);
    };

    let scaled = resize_to_fit(image, PREVIEW_MAX_EDGE, FilterType::Lanczos3)?;
    let jpeg = encode_jpeg(
        &scaled.pixels,
        scaled.width,
        scaled.height,
        scaled.mode,
        PREVIEW_QUALITY,
    )?;
    Ok(Some(to_data_url(&jpeg, PREVIEW_MEDIA_TYPE)))
}

/// Previews for one half of a photograph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HalfPreview {
    /// The uncropped half.
    pub preview: String,
    /// The half cropped to its detected interior, if a border was found.
    pub cropped_preview: Option<String>,
    /// The detected interior, if a border was found.
    pub crop: Option<CropRect>,
}

/// Previews for both halves of one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilePreviews {
    pub path: PathBuf,
    pub left: HalfPreview,
    pub right: HalfPreview,
}

fn half_preview(half: &DecodedImage, detector: &BorderDetector) -> Result<HalfPreview, PreviewError> {
    let crop = detector.detect(half);
    let cropped = crop.map(|rect| apply_crop(half, rect));

    let preview = encode_preview(Some(half))?.unwrap_or_default();
    let cropped_preview = encode_preview(cropped.as_ref())?;

    Ok(HalfPreview {
        preview,
        cropped_preview,
        crop,
    })
}

/// Open a photograph, split it, and build previews for both halves.
///
/// # Errors
///
/// Fails if the file cannot be decoded or either half cannot be encoded
/// (for example a source one pixel wide, whose left half is empty).
pub fn build_previews(path: &Path, detector: &BorderDetector) -> Result<FilePreviews, PreviewError> {
    let image = open_image(path)?;
    let (left, right) = split_halves(&image);

    let previews = FilePreviews {
        path: path.to_path_buf(),
        left: half_preview(&left, detector)?,
        right: half_preview(&right, detector)?,
    };
    log::debug!(
        "built previews for {} (left crop {:?}, right crop {:?})",
        path.display(),
        previews.left.crop,
        previews.right.crop
    );
    Ok(previews)
}
