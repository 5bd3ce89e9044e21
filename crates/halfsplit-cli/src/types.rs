//! Response types returned across the session boundary.
//!
//! Every response carries `success` plus either its payload or an `error`
//! string, and serializes to camelCase JSON with absent fields omitted.

use std::path::PathBuf;

use halfsplit_core::export::EntryResult;
use halfsplit_core::{CropRect, ExportSummary, FilePreviews};
use serde::Serialize;

/// A response that reports whether the request succeeded.
pub trait ApiResponse: Serialize {
    fn is_success(&self) -> bool;
}

/// Result of choosing the output directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DirectoryResponse {
    pub fn ok(path: PathBuf) -> Self {
        Self {
            success: true,
            path: Some(path),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            path: None,
            error: Some(error.into()),
        }
    }
}

/// Previews for one selected photograph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoFile {
    pub path: PathBuf,
    pub left_preview_data_url: String,
    pub right_preview_data_url: String,
    pub left_cropped_preview_data_url: Option<String>,
    pub right_cropped_preview_data_url: Option<String>,
    pub left_crop_coords: Option<CropRect>,
    pub right_crop_coords: Option<CropRect>,
}

impl From<FilePreviews> for PhotoFile {
    fn from(previews: FilePreviews) -> Self {
        Self {
            path: previews.path,
            left_preview_data_url: previews.left.preview,
            right_preview_data_url: previews.right.preview,
            left_cropped_preview_data_url: previews.left.cropped_preview,
            right_cropped_preview_data_url: previews.right.cropped_preview,
            left_crop_coords: previews.left.crop,
            right_crop_coords: previews.right.crop,
        }
    }
}

/// Result of selecting photographs to preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotosResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<PhotoFile>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PhotosResponse {
    pub fn ok(files: Vec<PhotoFile>, last_dir: Option<PathBuf>) -> Self {
        Self {
            success: true,
            files: Some(files),
            last_dir,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>, last_dir: Option<PathBuf>) -> Self {
        Self {
            success: false,
            files: None,
            last_dir,
            error: Some(error.into()),
        }
    }
}

/// Result of exporting a single photograph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResponse {
    pub success: bool,
    /// File names of the written halves.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_files: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_paths: Option<Vec<PathBuf>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProcessResponse {
    pub fn ok(output_paths: Vec<PathBuf>) -> Self {
        let output_files = output_paths
            .iter()
            .filter_map(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect();
        Self {
            success: true,
            output_files: Some(output_files),
            output_paths: Some(output_paths),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            output_files: None,
            output_paths: None,
            error: Some(error.into()),
        }
    }
}

/// Result of a batch export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<ExportSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<EntryResult>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExportResponse {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            summary: None,
            results: None,
            error: Some(error.into()),
        }
    }
}

impl ApiResponse for DirectoryResponse {
    fn is_success(&self) -> bool {
        self.success
    }
}

impl ApiResponse for PhotosResponse {
    fn is_success(&self) -> bool {
        self.success
    }
}

impl ApiResponse for ProcessResponse {
    fn is_success(&self) -> bool {
        self.success
    }
}

impl ApiResponse for ExportResponse {
    fn is_success(&self) -> bool {
        self.success
    }
}
