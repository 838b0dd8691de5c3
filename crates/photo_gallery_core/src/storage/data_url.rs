//! Data URL helpers (read-as-data-URL semantics).

use crate::platform::{Blob, PlatformError, PlatformResult};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use once_cell::sync::Lazy;
use regex::Regex;

/// Prefix of every reconstructed browser `webViewPath`.
pub const JPEG_DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";

static BASE64_DATA_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^data:(?:[A-Za-z0-9!#$&^_.+-]+/[A-Za-z0-9!#$&^_.+-]+)?(?:;[^;,]+)*;base64,")
        .expect("valid data url regex")
});

/// Encodes a blob the way a file reader's `readAsDataURL` does.
pub fn blob_to_data_url(blob: &Blob) -> String {
    let mime_type = if blob.mime_type.trim().is_empty() {
        "application/octet-stream"
    } else {
        blob.mime_type.trim()
    };
    format!("data:{mime_type};base64,{}", STANDARD.encode(&blob.bytes))
}

/// Returns the base64 payload of a `;base64` data URL.
pub fn data_url_payload(data_url: &str) -> PlatformResult<&str> {
    let header = BASE64_DATA_URL_RE.find(data_url).ok_or_else(|| {
        PlatformError::InvalidData("value is not a base64 data URL".to_string())
    })?;
    Ok(&data_url[header.end()..])
}

/// Builds the JPEG data URI rendered for browser reloads.
pub fn jpeg_data_uri(payload: &str) -> String {
    format!("{JPEG_DATA_URI_PREFIX}{payload}")
}

pub fn is_valid_base64(payload: &str) -> bool {
    STANDARD.decode(payload).is_ok()
}
