//! Core domain logic for the photo gallery.
//! This crate owns the gallery state, the capability contracts it talks to,
//! and the runtime-specific storage adapters.

pub mod app;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod platform;
pub mod screen;
pub mod service;
pub mod storage;

pub use app::{open_gallery, AppGallery};
pub use config::{ConfigError, GalleryConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::photo::{CapturedPhoto, UserPhoto};
pub use platform::{
    Blob, BlobFetcher, Camera, CameraOptions, CameraResultType, CameraSource, Directory,
    FileUrlFetcher, Filesystem, LocalFilesystem, PendingCapture, PlatformError, PlatformResult,
    Preferences, ResourceLocator, RuntimeKind, SqlitePreferences, WebViewLocator,
};
pub use screen::GalleryScreen;
pub use service::photo_service::{
    GalleryError, GalleryResult, GalleryState, PhotoService, PHOTO_FILE_EXTENSION,
    PHOTO_STORAGE_KEY,
};
pub use storage::{BrowserPhotoStorage, NativePhotoStorage, PhotoStorage};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
