//! Blob fetch over `file://` URLs.

use super::{Blob, BlobFetcher, PlatformError, PlatformResult};
use std::path::Path;
use url::Url;

/// Fetches `file://` URLs from the local disk.
///
/// Stands in for a browser `fetch` of a blob URL when the gallery runs in
/// browser mode outside a real web view.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileUrlFetcher;

impl FileUrlFetcher {
    pub fn new() -> Self {
        Self
    }
}

impl BlobFetcher for FileUrlFetcher {
    fn fetch(&self, url: &str) -> PlatformResult<Blob> {
        let parsed = Url::parse(url)
            .map_err(|err| PlatformError::InvalidData(format!("invalid URL `{url}`: {err}")))?;
        if parsed.scheme() != "file" {
            return Err(PlatformError::Unavailable(format!(
                "cannot fetch `{}` URLs outside a web view",
                parsed.scheme()
            )));
        }
        let path = parsed
            .to_file_path()
            .map_err(|_| PlatformError::InvalidData(format!("file URL has no local path: {url}")))?;
        let bytes = std::fs::read(&path)?;
        Ok(Blob {
            mime_type: guess_mime_type(&path).to_string(),
            bytes,
        })
    }
}

/// Guesses an image MIME type from the file extension.
pub fn guess_mime_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|value| value.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("heic") => "image/heic",
        _ => "application/octet-stream",
    }
}
