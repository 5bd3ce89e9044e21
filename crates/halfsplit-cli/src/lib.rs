//! Halfsplit CLI - session API for the half-frame photo splitter
//!
//! This crate wraps `halfsplit-core` in the operations a photo splitting
//! front end needs, each returning a structured `{success, error}` response
//! that serializes to camelCase JSON.
//!
//! # Module Structure
//!
//! - `api` - `PhotoSession` and its operations
//! - `types` - response types

pub mod api;
pub mod types;

pub use api::{is_supported_photo, PhotoSession};
pub use types::{
    ApiResponse, DirectoryResponse, ExportResponse, PhotoFile, PhotosResponse, ProcessResponse,
};

/// Get the version of the crate
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
