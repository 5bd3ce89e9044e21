//! Halfsplit Core - half-frame photograph splitting library
//!
//! This crate splits dual-frame photographs (two half-frame exposures side by
//! side) into independent images. It provides decoding, frame-mask border
//! detection, the per-half crop/rotate pipeline, preview encoding, and batch
//! export to disk.

pub mod border;
pub mod decode;
pub mod encode;
pub mod export;
pub mod luminance;
pub mod preview;
pub mod split;
pub mod transform;

pub use border::{detect_border, BorderDetector, BorderThresholds};
pub use decode::{open_image, ColorMode, DecodedImage};
pub use export::{BatchExporter, ExportEntry, ExportError, ExportReport, ExportSummary};
pub use preview::{build_previews, encode_preview, FilePreviews, HalfPreview};
pub use split::{split_halves, Half};
pub use transform::{apply_crop, apply_rotation, transform_half, CropRect, QuarterTurn};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// User-facing clockwise rotation of one half.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Rotation {
    #[default]
    None,
    Cw90,
    Cw180,
    Cw270,
}

/// Rotation angle that is not a multiple of 90 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("rotation must be a multiple of 90 degrees, got {0}")]
pub struct InvalidRotation(pub i32);

impl Rotation {
    /// Clockwise angle in degrees.
    pub fn degrees(self) -> i32 {
        match self {
            Rotation::None => 0,
            Rotation::Cw90 => 90,
            Rotation::Cw180 => 180,
            Rotation::Cw270 => 270,
        }
    }

    /// The counter-clockwise turn that produces this clockwise rotation,
    /// i.e. `(360 - degrees) mod 360`.
    pub fn to_counter_clockwise(self) -> QuarterTurn {
        match self {
            Rotation::None => QuarterTurn::None,
            Rotation::Cw90 => QuarterTurn::Ccw270,
            Rotation::Cw180 => QuarterTurn::Ccw180,
            Rotation::Cw270 => QuarterTurn::Ccw90,
        }
    }
}

impl TryFrom<i32> for Rotation {
    type Error = InvalidRotation;

    fn try_from(degrees: i32) -> Result<Self, Self::Error> {
        match degrees.rem_euclid(360) {
            0 => Ok(Rotation::None),
            90 => Ok(Rotation::Cw90),
            180 => Ok(Rotation::Cw180),
            270 => Ok(Rotation::Cw270),
            _ => Err(InvalidRotation(degrees)),
        }
    }
}

impl From<Rotation> for i32 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

/// Edit parameters for one half of a photograph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditParams {
    /// Whether this half is written at all (default: true)
    pub export: bool,
    /// Clockwise rotation applied after cropping (default: none)
    pub rotation: Rotation,
    /// Crop to the border-detected interior when no explicit crop is set
    /// (default: true)
    pub remove_border: bool,
    /// Explicit crop in the half's pixel coordinates (default: none)
    #[serde(alias = "cropCoords")]
    pub crop: Option<CropRect>,
}

impl Default for EditParams {
    fn default() -> Self {
        Self {
            export: true,
            rotation: Rotation::None,
            remove_border: true,
            crop: None,
        }
    }
}

impl EditParams {
    /// Create parameters with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters for a half that should not be written.
    pub fn skipped() -> Self {
        Self {
            export: false,
            ..Self::default()
        }
    }
}

/// Edit parameters for both halves of one photograph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageEdits {
    pub left: EditParams,
    pub right: EditParams,
}

impl ImageEdits {
    pub fn get(&self, half: Half) -> &EditParams {
        match half {
            Half::Left => &self.left,
            Half::Right => &self.right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_params_defaults() {
        let params = EditParams::new();
        assert!(params.export);
        assert_eq!(params.rotation, Rotation::None);
        assert!(params.remove_border);
        assert!(params.crop.is_none());
    }

    #[test]
    fn test_rotation_from_degrees() {
        assert_eq!(Rotation::try_from(0), Ok(Rotation::None));
        assert_eq!(Rotation::try_from(90), Ok(Rotation::Cw90));
        assert_eq!(Rotation::try_from(-90), Ok(Rotation::Cw270));
        assert_eq!(Rotation::try_from(450), Ok(Rotation::Cw90));
        assert_eq!(Rotation::try_from(45), Err(InvalidRotation(45)));
    }

    #[test]
    fn test_rotation_counter_clockwise_equivalent() {
        for degrees in [0, 90, 180, 270] {
            let rotation = Rotation::try_from(degrees).unwrap();
            let ccw = rotation.to_counter_clockwise().degrees() as i32;
            assert_eq!(ccw, (360 - degrees) % 360);
        }
    }

    #[test]
    fn test_image_edits_get() {
        let edits = ImageEdits {
            left: EditParams::default(),
            right: EditParams::skipped(),
        };
        assert!(edits.get(Half::Left).export);
        assert!(!edits.get(Half::Right).export);
    }

    #[test]
    fn test_edit_params_deserialize_fills_defaults() {
        let params: EditParams = serde_json::from_str(r#"{"rotation": 270}"#).unwrap();
        assert_eq!(params.rotation, Rotation::Cw270);
        assert!(params.export);
        assert!(params.remove_border);
        assert!(params.crop.is_none());
    }

    #[test]
    fn test_edit_params_accepts_crop_coords_alias() {
        let params: EditParams = serde_json::from_str(
            r#"{"removeBorder": false, "cropCoords": {"left": 1, "top": 2, "right": 30, "bottom": 40}}"#,
        )
        .unwrap();
        assert!(!params.remove_border);
        assert_eq!(params.crop, Some(CropRect::new(1, 2, 30, 40)));
    }

    #[test]
    fn test_edit_params_rejects_odd_rotation() {
        assert!(serde_json::from_str::<EditParams>(r#"{"rotation": 45}"#).is_err());
    }

    #[test]
    fn test_rotation_serializes_as_degrees() {
        let json = serde_json::to_string(&EditParams {
            rotation: Rotation::Cw180,
            ..Default::default()
        })
        .unwrap();
        assert!(json.contains(r#""rotation":180"#), "{}", json);
    }

    #[test]
    fn test_image_edits_missing_half_uses_defaults() {
        let edits: ImageEdits = serde_json::from_str(r#"{"right": {"export": false}}"#).unwrap();
        assert_eq!(edits.left, EditParams::default());
        assert!(!edits.right.export);
    }

    #[test]
    fn test_invalid_rotation_display() {
        assert_eq!(
            InvalidRotation(30).to_string(),
            "rotation must be a multiple of 90 degrees, got 30"
        );
    }
}
