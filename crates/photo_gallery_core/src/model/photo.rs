//! Photo records and camera capture results.
//!
//! # Responsibility
//! - Define the record stored in the gallery snapshot.
//! - Define the reference-style result returned by a camera capture.
//!
//! # Invariants
//! - `UserPhoto::file_path` is non-empty for every saved record.
//! - Snapshot keys stay camelCase (`filePath`, `webViewPath`).

use serde::{Deserialize, Serialize};

/// One saved photograph as kept in the gallery and in the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPhoto {
    /// Location used to re-read the image from durable storage.
    ///
    /// Native runtimes store the storage-resolved URI, browser runtimes the
    /// generated file name.
    pub file_path: String,
    /// Locator a display surface can render directly.
    ///
    /// Records saved without it load with an empty locator; browser storage
    /// rebuilds it on hydrate.
    #[serde(default)]
    pub web_view_path: String,
}

impl UserPhoto {
    pub fn new(file_path: impl Into<String>, web_view_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            web_view_path: web_view_path.into(),
        }
    }

    /// Returns the trailing file name of `file_path`.
    ///
    /// Works for both plain names (`1700000000000.jpeg`) and URIs
    /// (`file:///data/photos/1700000000000.jpeg`).
    pub fn file_name(&self) -> &str {
        self.file_path
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(self.file_path.as_str())
    }
}

/// Result of one camera capture, delivered by reference instead of inline data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CapturedPhoto {
    /// Local filesystem path. Present on native runtimes only.
    pub path: Option<String>,
    /// Transient URL valid for the current session (blob/file URL).
    pub web_path: Option<String>,
    /// Image format reported by the camera, e.g. `jpeg`.
    pub format: String,
}

impl CapturedPhoto {
    /// Capture result as produced inside a native wrapper.
    pub fn native(path: impl Into<String>, web_path: Option<String>) -> Self {
        Self {
            path: Some(path.into()),
            web_path,
            format: "jpeg".to_string(),
        }
    }

    /// Capture result as produced inside a plain browser.
    pub fn web(web_path: impl Into<String>) -> Self {
        Self {
            path: None,
            web_path: Some(web_path.into()),
            format: "jpeg".to_string(),
        }
    }
}
