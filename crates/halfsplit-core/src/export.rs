//! Writing transformed halves to disk.
//!
//! Each source photograph `<stem>.<ext>` produces `<stem>_left.<ext>` and
//! `<stem>_right.<ext>` in the output directory, encoded according to the
//! source extension. Halves are written at full resolution; the preview size
//! cap never applies here.
//!
//! A batch never aborts on a bad file. Every entry gets an [`EntryResult`],
//! and failures are logged and counted in the [`ExportSummary`].

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::border::BorderDetector;
use crate::decode::{open_image, DecodeError, DecodedImage};
use crate::encode::{encode_image, EncodeError, OutputFormat};
use crate::split::{split_halves, Half};
use crate::transform::transform_half;
use crate::{EditParams, ImageEdits};

/// JPEG quality for exported halves.
pub const EXPORT_JPEG_QUALITY: u8 = 95;

/// Error recorded for entries not reached before a batch was cancelled.
pub const CANCELLED_MESSAGE: &str = "cancelled";

/// Errors that can occur while exporting.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Output directory not set")]
    OutputDirectoryNotSet,

    #[error("Source path has no file name: {0}")]
    InvalidSourcePath(PathBuf),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("Failed to write {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
}

/// One photograph to export, with its per-half edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportEntry {
    pub path: PathBuf,
    #[serde(flatten)]
    pub edits: ImageEdits,
}

impl ExportEntry {
    pub fn new(path: impl Into<PathBuf>, edits: ImageEdits) -> Self {
        Self {
            path: path.into(),
            edits,
        }
    }
}

/// What a successful single-image export wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryOutcome {
    pub path: PathBuf,
    pub outputs: Vec<PathBuf>,
    pub halves_written: usize,
    pub halves_skipped: usize,
}

/// Per-entry line of an [`ExportReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryResult {
    pub path: PathBuf,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub outputs: Vec<PathBuf>,
    pub halves_written: usize,
    pub halves_skipped: usize,
}

impl EntryResult {
    fn succeeded(outcome: EntryOutcome) -> Self {
        Self {
            path: outcome.path,
            success: true,
            error: None,
            outputs: outcome.outputs,
            halves_written: outcome.halves_written,
            halves_skipped: outcome.halves_skipped,
        }
    }

    fn failed(path: &Path, error: String) -> Self {
        Self {
            path: path.to_path_buf(),
            success: false,
            error: Some(error),
            outputs: Vec::new(),
            halves_written: 0,
            halves_skipped: 0,
        }
    }
}

/// Totals over a batch. Failed entries contribute no halves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSummary {
    pub total_entries: usize,
    pub successful_entries: usize,
    pub failed_entries: usize,
    pub cancelled_entries: usize,
    pub halves_written: usize,
    pub halves_skipped: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub results: Vec<EntryResult>,
    pub summary: ExportSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportProgress {
    pub total: usize,
    pub processed: usize,
    pub current: Option<PathBuf>,
    pub stage: ExportStage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportStage {
    Initializing,
    Processing,
    Completed,
}

/// Destination of one half: `<dir>/<stem><suffix>.<ext>`, extension verbatim.
pub fn output_path(dir: &Path, source: &Path, half: Half) -> Result<PathBuf, ExportError> {
    let stem = source
        .file_stem()
        .ok_or_else(|| ExportError::InvalidSourcePath(source.to_path_buf()))?;

    let mut name = OsString::from(stem);
    name.push(half.file_suffix());
    if let Some(ext) = source.extension() {
        name.push(".");
        name.push(ext);
    }
    Ok(dir.join(name))
}

/// Exports photographs into a session's output directory.
#[derive(Debug, Clone)]
pub struct BatchExporter {
    output_directory: Option<PathBuf>,
    detector: BorderDetector,
}

impl Default for BatchExporter {
    fn default() -> Self {
        Self::new(BorderDetector::default())
    }
}

impl BatchExporter {
    pub fn new(detector: BorderDetector) -> Self {
        Self {
            output_directory: None,
            detector,
        }
    }

    pub fn set_output_directory(&mut self, dir: impl Into<PathBuf>) {
        self.output_directory = Some(dir.into());
    }

    pub fn output_directory(&self) -> Option<&Path> {
        self.output_directory.as_deref()
    }

    pub fn detector(&self) -> &BorderDetector {
        &self.detector
    }

    /// Split, transform, and write one photograph.
    ///
    /// Halves whose `export` flag is false are counted as skipped and never
    /// transformed. If any half fails, files already written for this entry
    /// are removed so a failed entry leaves nothing behind.
    pub fn export_one(&self, path: &Path, edits: &ImageEdits) -> Result<EntryOutcome, ExportError> {
        let dir = self
            .output_directory
            .as_deref()
            .ok_or(ExportError::OutputDirectoryNotSet)?;
        let format = OutputFormat::from_path(path)?;

        let image = open_image(path)?;
        let (left, right) = split_halves(&image);
        drop(image);

        let mut outcome = EntryOutcome {
            path: path.to_path_buf(),
            outputs: Vec::with_capacity(2),
            halves_written: 0,
            halves_skipped: 0,
        };

        for (half, pixels) in [(Half::Left, &left), (Half::Right, &right)] {
            let params = edits.get(half);
            if !params.export {
                log::debug!("skipping {:?} half of {}", half, path.display());
                outcome.halves_skipped += 1;
                continue;
            }

            match self.write_half(dir, path, half, pixels, params, format) {
                Ok(target) => {
                    outcome.outputs.push(target);
                    outcome.halves_written += 1;
                }
                Err(err) => {
                    remove_partial_outputs(&outcome.outputs);
                    return Err(err);
                }
            }
        }

        Ok(outcome)
    }

    fn write_half(
        &self,
        dir: &Path,
        source: &Path,
        half: Half,
        pixels: &DecodedImage,
        params: &EditParams,
        format: OutputFormat,
    ) -> Result<PathBuf, ExportError> {
        let transformed = transform_half(pixels, params, &self.detector);
        let bytes = encode_image(&transformed.image, format, EXPORT_JPEG_QUALITY)?;
        let target = output_path(dir, source, half)?;
        fs::write(&target, bytes).map_err(|source| ExportError::Io {
            path: target.clone(),
            source,
        })?;

        log::info!(
            "wrote {} ({}x{})",
            target.display(),
            transformed.image.width,
            transformed.image.height
        );
        Ok(target)
    }

    /// Export every entry, continuing past failures.
    pub fn export_all(&self, entries: &[ExportEntry]) -> Result<ExportReport, ExportError> {
        self.export_all_with(entries, None, None)
    }

    /// Export every entry, reporting progress and honoring a cancel flag.
    ///
    /// The flag is checked before each entry. Entries not started once it is
    /// set are recorded as failed with the error [`CANCELLED_MESSAGE`].
    pub fn export_all_with(
        &self,
        entries: &[ExportEntry],
        mut progress: Option<&mut dyn FnMut(ExportProgress)>,
        cancel: Option<&AtomicBool>,
    ) -> Result<ExportReport, ExportError> {
        if self.output_directory.is_none() {
            return Err(ExportError::OutputDirectoryNotSet);
        }

        let total = entries.len();
        let mut processed = 0usize;
        let mut results = Vec::with_capacity(total);
        let mut summary = ExportSummary {
            total_entries: total,
            ..Default::default()
        };

        emit_progress(
            &mut progress,
            ExportProgress {
                total,
                processed,
                current: None,
                stage: ExportStage::Initializing,
            },
        );

        for entry in entries {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                results.push(EntryResult::failed(&entry.path, CANCELLED_MESSAGE.to_string()));
                summary.failed_entries += 1;
                summary.cancelled_entries += 1;
                continue;
            }

            emit_progress(
                &mut progress,
                ExportProgress {
                    total,
                    processed,
                    current: Some(entry.path.clone()),
                    stage: ExportStage::Processing,
                },
            );

            match self.export_one(&entry.path, &entry.edits) {
                Ok(outcome) => {
                    summary.successful_entries += 1;
                    summary.halves_written += outcome.halves_written;
                    summary.halves_skipped += outcome.halves_skipped;
                    results.push(EntryResult::succeeded(outcome));
                }
                Err(err) => {
                    log::warn!("failed to export {}: {}", entry.path.display(), err);
                    summary.failed_entries += 1;
                    results.push(EntryResult::failed(&entry.path, err.to_string()));
                }
            }
            processed += 1;
        }

        emit_progress(
            &mut progress,
            ExportProgress {
                total,
                processed,
                current: None,
                stage: ExportStage::Completed,
            },
        );

        log::info!(
            "export finished: {} of {} entries succeeded, {} halves written, {} skipped, {} cancelled",
            summary.successful_entries,
            summary.total_entries,
            summary.halves_written,
            summary.halves_skipped,
            summary.cancelled_entries
        );

        Ok(ExportReport { results, summary })
    }
}

fn remove_partial_outputs(outputs: &[PathBuf]) {
    for written in outputs {
        match fs::remove_file(written) {
            Ok(()) => log::debug!("removed partial output {}", written.display()),
            Err(err) => log::warn!("could not remove partial output {}: {}", written.display(), err),
        }
    }
}

fn emit_progress(callback: &mut Option<&mut dyn FnMut(ExportProgress)>, payload: ExportProgress) {
    if let Some(listener) = callback.as_mut() {
        listener(payload);
    }
}
