//! Per-half transform pipeline: crop, then rotate.

use crate::border::BorderDetector;
use crate::decode::DecodedImage;
use crate::EditParams;

use super::{apply_crop, apply_rotation, CropRect};

/// Which crop, if any, the pipeline applied to a half.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppliedCrop {
    /// Crop coordinates supplied with the edit parameters.
    Explicit(CropRect),
    /// Interior found by border detection.
    Detected(CropRect),
    /// The half was left uncropped.
    None,
}

/// Output of [`transform_half`].
#[derive(Debug, Clone)]
pub struct TransformedHalf {
    pub image: DecodedImage,
    pub crop: AppliedCrop,
}

/// Apply one half's edit parameters.
///
/// Order is fixed: an explicit crop wins over border removal, and rotation
/// always runs last so crop coordinates refer to the unrotated half.
/// `params.export` is not consulted here; callers skip halves that are not
/// exported before reaching the pipeline.
pub fn transform_half(
    half: &DecodedImage,
    params: &EditParams,
    detector: &BorderDetector,
) -> TransformedHalf {
    let crop = if let Some(rect) = params.crop {
        AppliedCrop::Explicit(rect)
    } else if params.remove_border {
        match detector.detect(half) {
            Some(rect) => AppliedCrop::Detected(rect),
            None => AppliedCrop::None,
        }
    } else {
        AppliedCrop::None
    };

    let cropped = match crop {
        AppliedCrop::Explicit(rect) | AppliedCrop::Detected(rect) => apply_crop(half, rect),
        AppliedCrop::None => half.clone(),
    };

    let turn = params.rotation.to_counter_clockwise();
    let image = apply_rotation(&cropped, turn);
    log::debug!(
        "transformed {}x{} half: crop {:?}, rotation {} ccw -> {}x{}",
        half.width,
        half.height,
        crop,
        turn.degrees(),
        image.width,
        image.height
    );

    TransformedHalf { image, crop }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::ColorMode;
    use crate::Rotation;

    /// 40x30 luminance half with an 8 px black band on the left.
    fn banded_half() -> DecodedImage {
        let mut pixels = Vec::with_capacity(40 * 30);
        for _y in 0..30 {
            for x in 0..40 {
                pixels.push(if x < 8 { 0 } else { 180 });
            }
        }
        DecodedImage::with_mode(40, 30, ColorMode::Luma, pixels)
    }

    #[test]
    fn test_defaults_remove_detected_border() {
        let out = transform_half(&banded_half(), &EditParams::default(), &BorderDetector::default());

        assert_eq!(out.crop, AppliedCrop::Detected(CropRect::new(6, 0, 40, 30)));
        assert_eq!((out.image.width, out.image.height), (34, 30));
    }

    #[test]
    fn test_explicit_crop_overrides_detection() {
        let params = EditParams {
            crop: Some(CropRect::new(0, 0, 10, 10)),
            ..Default::default()
        };
        let out = transform_half(&banded_half(), &params, &BorderDetector::default());

        assert_eq!(out.crop, AppliedCrop::Explicit(CropRect::new(0, 0, 10, 10)));
        assert_eq!((out.image.width, out.image.height), (10, 10));
        // The explicit crop keeps the black band
        assert_eq!(out.image.pixels[0], 0);
    }

    #[test]
    fn test_explicit_crop_is_clamped() {
        let params = EditParams {
            crop: Some(CropRect::new(30, -4, 90, 90)),
            remove_border: false,
            ..Default::default()
        };
        let out = transform_half(&banded_half(), &params, &BorderDetector::default());
        assert_eq!((out.image.width, out.image.height), (10, 30));
    }

    #[test]
    fn test_border_removal_disabled() {
        let params = EditParams {
            remove_border: false,
            ..Default::default()
        };
        let half = banded_half();
        let out = transform_half(&half, &params, &BorderDetector::default());

        assert_eq!(out.crop, AppliedCrop::None);
        assert_eq!(out.image, half);
    }

    #[test]
    fn test_no_border_found_leaves_half_uncropped() {
        let half = DecodedImage::with_mode(10, 10, ColorMode::Luma, vec![200; 100]);
        let out = transform_half(&half, &EditParams::default(), &BorderDetector::default());

        assert_eq!(out.crop, AppliedCrop::None);
        assert_eq!(out.image, half);
    }

    #[test]
    fn test_crop_happens_before_rotation() {
        let params = EditParams {
            rotation: Rotation::Cw90,
            ..Default::default()
        };
        let out = transform_half(&banded_half(), &params, &BorderDetector::default());

        // Detected crop is 34x30, then the canvas swaps
        assert_eq!((out.image.width, out.image.height), (30, 34));
    }

    #[test]
    fn test_clockwise_rotation_direction() {
        // 2x1: dark pixel on the left, bright on the right
        let half = DecodedImage::with_mode(2, 1, ColorMode::Luma, vec![10, 250]);
        let params = EditParams {
            rotation: Rotation::Cw90,
            remove_border: false,
            ..Default::default()
        };
        let out = transform_half(&half, &params, &BorderDetector::default());

        // Turning clockwise puts the left pixel on top
        assert_eq!((out.image.width, out.image.height), (1, 2));
        assert_eq!(out.image.pixels, vec![10, 250]);
    }

    #[test]
    fn test_rotation_dimensions() {
        let half = DecodedImage::with_mode(12, 5, ColorMode::Luma, vec![200; 60]);
        for (rotation, dims) in [
            (Rotation::None, (12, 5)),
            (Rotation::Cw90, (5, 12)),
            (Rotation::Cw180, (12, 5)),
            (Rotation::Cw270, (5, 12)),
        ] {
            let params = EditParams {
                rotation,
                ..Default::default()
            };
            let out = transform_half(&half, &params, &BorderDetector::default());
            assert_eq!((out.image.width, out.image.height), dims, "{:?}", rotation);
        }
    }
}
