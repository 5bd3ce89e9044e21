//! Output format selection by file extension.

use std::path::Path;

use super::EncodeError;

/// File formats halves can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
}

impl OutputFormat {
    /// Map an extension (without the dot, any case) to a format.
    pub fn from_extension(ext: &str) -> Result<Self, EncodeError> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(OutputFormat::Jpeg),
            "png" => Ok(OutputFormat::Png),
            _ => Err(EncodeError::UnsupportedFormat(ext.to_string())),
        }
    }

    /// Format implied by a path's extension.
    pub fn from_path(path: &Path) -> Result<Self, EncodeError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| EncodeError::UnsupportedFormat(path.display().to_string()))?;
        Self::from_extension(ext)
    }
}
