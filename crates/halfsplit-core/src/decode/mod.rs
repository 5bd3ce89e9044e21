//! Image decoding for halfsplit.
//!
//! This module provides functionality for:
//! - Opening JPEG and PNG photographs from disk
//! - Normalizing alpha and palette images to plain RGB or luminance
//! - Keeping 16-bit sources at 16 bits
//! - Resizing for preview generation
//!
//! All operations are synchronous and single-threaded. Every function returns
//! a new `DecodedImage` and never mutates its input.
//!
//! # Examples
//!
//! ```ignore
//! use halfsplit_core::decode::open_image;
//!
//! let image = open_image(Path::new("roll-03/frame-12.jpg"))?;
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod open;
mod resize;
mod types;

pub use open::open_image;
pub use resize::{resize, resize_to_fit};
pub use types::{narrow_sample, narrow_samples, ColorMode, DecodeError, DecodedImage, FilterType};
