//! Platform capability contracts consumed by the gallery.
//!
//! # Responsibility
//! - Describe camera, file storage, key-value storage, blob fetch and
//!   locator conversion as narrow traits.
//! - Ship local implementations usable outside a mobile shell.
//!
//! # Invariants
//! - File payloads cross the `Filesystem` boundary as base64 strings.
//! - Capability failures are reported as `PlatformError`, never panics.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

mod camera;
mod fetch;
mod local_fs;
mod locator;
mod preferences;

pub use camera::PendingCapture;
pub use fetch::{guess_mime_type, FileUrlFetcher};
pub use local_fs::LocalFilesystem;
pub use locator::{WebViewLocator, APP_FILE_PATH_PREFIX};
pub use preferences::SqlitePreferences;

use crate::model::photo::CapturedPhoto;

pub type PlatformResult<T> = Result<T, PlatformError>;

/// Failure reported by a platform capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The user dismissed the capture prompt.
    Cancelled,
    /// Capability is not available in the current runtime.
    Unavailable(String),
    /// Requested file or URL does not exist.
    NotFound(String),
    /// Payload could not be interpreted (bad base64, bad URL, ...).
    InvalidData(String),
    /// Underlying I/O or storage failure.
    Io(String),
}

impl Display for PlatformError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cancelled => write!(f, "user cancelled photos app"),
            Self::Unavailable(message) => write!(f, "capability unavailable: {message}"),
            Self::NotFound(target) => write!(f, "not found: {target}"),
            Self::InvalidData(message) => write!(f, "invalid data: {message}"),
            Self::Io(message) => write!(f, "io failure: {message}"),
        }
    }
}

impl Error for PlatformError {}

impl From<std::io::Error> for PlatformError {
    fn from(value: std::io::Error) -> Self {
        match value.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(value.to_string()),
            _ => Self::Io(value.to_string()),
        }
    }
}

/// How the camera hands the image back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraResultType {
    /// Path/URL reference; bytes are read separately.
    Uri,
    /// Inline base64 payload.
    Base64,
}

/// Where the camera takes the image from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraSource {
    /// Physical camera.
    Camera,
    /// Existing photo library picker.
    Photos,
}

/// Options passed to `Camera::capture`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraOptions {
    pub result_type: CameraResultType,
    pub source: CameraSource,
    /// JPEG quality in `0..=100`.
    pub quality: u8,
}

impl CameraOptions {
    /// Fixed options used for gallery captures: reference result, physical
    /// camera, maximum quality.
    pub const fn gallery_capture() -> Self {
        Self {
            result_type: CameraResultType::Uri,
            source: CameraSource::Camera,
            quality: 100,
        }
    }
}

/// Storage area for `Filesystem` calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directory {
    /// Application-private persistent data.
    Data,
    /// Application-private cache, may be purged by the OS.
    Cache,
}

impl Directory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Data => "data",
            Self::Cache => "cache",
        }
    }
}

/// Raw payload returned by `BlobFetcher`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Execution context the gallery runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuntimeKind {
    /// Native wrapper with direct filesystem paths.
    Native,
    /// Plain browser with transient blob URLs.
    Browser,
}

impl RuntimeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Browser => "browser",
        }
    }

    pub fn is_native(self) -> bool {
        matches!(self, Self::Native)
    }
}

impl Display for RuntimeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuntimeKind {
    type Err = PlatformError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "native" | "hybrid" => Ok(Self::Native),
            "browser" | "web" => Ok(Self::Browser),
            other => Err(PlatformError::InvalidData(format!(
                "unsupported runtime `{other}`; expected native|browser"
            ))),
        }
    }
}

/// Camera capability.
pub trait Camera {
    /// Captures a single image.
    ///
    /// Returns `PlatformError::Cancelled` when the user dismisses the prompt.
    fn capture(&self, options: &CameraOptions) -> PlatformResult<CapturedPhoto>;
}

/// Durable file storage scoped to application-private areas.
pub trait Filesystem {
    /// Reads a file and returns its content base64-encoded.
    ///
    /// `directory = None` means `path` is an absolute path or `file://` URI.
    fn read_file(&self, path: &str, directory: Option<Directory>) -> PlatformResult<String>;

    /// Writes base64 `data` to `path` inside `directory`, returns the
    /// storage-resolved URI.
    fn write_file(&self, path: &str, data: &str, directory: Directory) -> PlatformResult<String>;
}

/// Durable key-value storage.
pub trait Preferences {
    fn get(&self, key: &str) -> PlatformResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> PlatformResult<()>;
}

/// Fetches a transient web URL into raw bytes. Browser runtimes only.
pub trait BlobFetcher {
    fn fetch(&self, url: &str) -> PlatformResult<Blob>;
}

/// Maps a filesystem URI to a locator a web view can render. Native only.
pub trait ResourceLocator {
    fn convert_file_src(&self, uri: &str) -> String;
}
