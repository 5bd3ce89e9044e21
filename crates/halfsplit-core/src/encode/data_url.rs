//! Base64 data URLs for handing encoded images to a viewer.

use base64::{engine::general_purpose, Engine as _};

/// Wrap encoded bytes as `data:<media_type>;base64,<payload>`.
pub fn to_data_url(bytes: &[u8], media_type: &str) -> String {
    format!(
        "data:{};base64,{}",
        media_type,
        general_purpose::STANDARD.encode(bytes)
    )
}
