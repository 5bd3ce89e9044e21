//! Session state behind the photo splitter's user-facing operations.
//!
//! Dialogs are not opened here: callers pass the paths the user chose, and
//! `None` (or an empty list) stands for a cancelled dialog. Every operation
//! returns a response value instead of an error so that failures reach the
//! user as messages.

use std::path::{Path, PathBuf};

use halfsplit_core::encode::OutputFormat;
use halfsplit_core::{build_previews, BatchExporter, BorderDetector, BorderThresholds, ExportEntry, ImageEdits};

use crate::types::{DirectoryResponse, ExportResponse, PhotoFile, PhotosResponse, ProcessResponse};

pub const NO_DIRECTORY_SELECTED: &str = "No directory selected";
pub const NO_FILES_SELECTED: &str = "No files selected";
pub const NO_VALID_IMAGES: &str = "No valid images were processed";

/// Whether a path names a photograph the splitter accepts (jpg, jpeg, png).
pub fn is_supported_photo(path: &Path) -> bool {
    OutputFormat::from_path(path).is_ok()
}

/// One user session: the chosen output directory and detection thresholds.
#[derive(Debug, Clone, Default)]
pub struct PhotoSession {
    exporter: BatchExporter,
}

impl PhotoSession {
    pub fn new(thresholds: BorderThresholds) -> Self {
        Self {
            exporter: BatchExporter::new(BorderDetector::new(thresholds)),
        }
    }

    pub fn output_directory(&self) -> Option<&Path> {
        self.exporter.output_directory()
    }

    /// Record the directory exported halves are written to.
    pub fn select_output_directory(&mut self, choice: Option<PathBuf>) -> DirectoryResponse {
        let Some(dir) = choice.filter(|dir| !dir.as_os_str().is_empty()) else {
            return DirectoryResponse::failure(NO_DIRECTORY_SELECTED);
        };
        if !dir.is_dir() {
            return DirectoryResponse::failure(format!("Not a directory: {}", dir.display()));
        }

        log::info!("output directory set to {}", dir.display());
        self.exporter.set_output_directory(&dir);
        DirectoryResponse::ok(dir)
    }

    /// Build previews for each selected photograph.
    ///
    /// Unsupported extensions and files that fail to decode are skipped with
    /// a warning. On success `lastDir` is the first file's parent directory;
    /// on failure the incoming `last_dir` is returned unchanged.
    pub fn select_photos(&self, files: &[PathBuf], last_dir: Option<&Path>) -> PhotosResponse {
        let last_dir = last_dir.map(Path::to_path_buf);
        let Some(first) = files.first() else {
            return PhotosResponse::failure(NO_FILES_SELECTED, last_dir);
        };

        let mut photos = Vec::with_capacity(files.len());
        for path in files {
            if !is_supported_photo(path) {
                log::warn!("skipping {}: not a jpg, jpeg, or png file", path.display());
                continue;
            }
            match build_previews(path, self.exporter.detector()) {
                Ok(previews) => photos.push(PhotoFile::from(previews)),
                Err(err) => log::warn!("skipping {}: {}", path.display(), err),
            }
        }

        if photos.is_empty() {
            return PhotosResponse::failure(NO_VALID_IMAGES, last_dir);
        }
        log::info!("prepared previews for {} of {} files", photos.len(), files.len());
        PhotosResponse::ok(photos, first.parent().map(Path::to_path_buf))
    }

    /// Export both halves of one photograph.
    pub fn process_image(&self, path: &Path, edits: &ImageEdits) -> ProcessResponse {
        match self.exporter.export_one(path, edits) {
            Ok(outcome) => ProcessResponse::ok(outcome.outputs),
            Err(err) => {
                log::warn!("failed to process {}: {}", path.display(), err);
                ProcessResponse::failure(err.to_string())
            }
        }
    }

    /// Export a batch of photographs, continuing past per-file failures.
    pub fn export_all(&self, entries: &[ExportEntry]) -> ExportResponse {
        match self.exporter.export_all(entries) {
            Ok(report) => ExportResponse {
                success: true,
                summary: Some(report.summary),
                results: Some(report.results),
                error: None,
            },
            Err(err) => ExportResponse::failure(err.to_string()),
        }
    }
}
