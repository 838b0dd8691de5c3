//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose gallery use-cases to Dart via FRB.
//! - Own the single process-wide gallery and serialize access to it.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Captures go through the gallery one at a time (mutex-guarded).
//! - The camera UI lives in Dart; Rust only receives its result.
//! - Calls that touch disk or SQLite (`gallery_load_saved`,
//!   `gallery_add_captured`) are async so they run off the UI isolate;
//!   everything else is `frb(sync)`.

use log::warn;
use photo_gallery_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, open_gallery,
    ping as ping_inner, AppGallery, CapturedPhoto, GalleryConfig, PendingCapture, RuntimeKind,
    UserPhoto,
};
use std::path::PathBuf;
use std::sync::Mutex;

struct FfiGallery {
    screen: AppGallery,
    camera: PendingCapture,
}

struct FfiState {
    config: Option<GalleryConfig>,
    gallery: Option<FfiGallery>,
}

static STATE: Mutex<FfiState> = Mutex::new(FfiState {
    config: None,
    gallery: None,
});

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Points the gallery at the app-private data directory of the shell.
///
/// Input semantics:
/// - `data_dir`: absolute directory owned by the app.
/// - `runtime`: `native|browser` (aliases `hybrid|web`).
///
/// # FFI contract
/// - Sync call; the gallery is (re)opened lazily on the next use.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn gallery_configure(data_dir: String, runtime: String) -> String {
    let data_dir = data_dir.trim();
    if data_dir.is_empty() || !PathBuf::from(data_dir).is_absolute() {
        return format!("data_dir must be an absolute path, got `{data_dir}`");
    }
    let runtime = match runtime.parse::<RuntimeKind>() {
        Ok(runtime) => runtime,
        Err(err) => return err.to_string(),
    };

    let mut config = GalleryConfig::with_data_dir(data_dir);
    config.runtime = runtime;
    match STATE.lock() {
        Ok(mut state) => {
            state.config = Some(config);
            state.gallery = None;
            String::new()
        }
        Err(_) => "gallery state is poisoned".to_string(),
    }
}

/// One gallery record in FFI form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryPhotoItem {
    /// Location used to re-read the photo.
    pub file_path: String,
    /// Locator the image widget can render.
    pub web_view_path: String,
}

/// Gallery list envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryListResponse {
    pub ok: bool,
    /// Newest first.
    pub items: Vec<GalleryPhotoItem>,
    pub message: String,
}

/// Capture action envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryActionResponse {
    pub ok: bool,
    /// True when the user dismissed the camera; not an error for the UI.
    pub cancelled: bool,
    pub photo: Option<GalleryPhotoItem>,
    pub message: String,
}

impl GalleryListResponse {
    fn success(photos: &[UserPhoto]) -> Self {
        let message = if photos.is_empty() {
            "No photos.".to_string()
        } else {
            format!("{} photo(s).", photos.len())
        };
        Self {
            ok: true,
            items: photos.iter().map(to_item).collect(),
            message,
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            items: Vec::new(),
            message: message.into(),
        }
    }
}

/// Loads the saved gallery (first screen show).
///
/// # FFI contract
/// - Async from Dart; runs on the FRB worker pool.
/// - Never panics.
pub fn gallery_load_saved() -> GalleryListResponse {
    with_gallery(|gallery| match gallery.screen.on_init() {
        Ok(_) => GalleryListResponse::success(gallery.screen.photos()),
        Err(err) => GalleryListResponse::failure(format!("gallery_load_saved failed: {err}")),
    })
    .unwrap_or_else(GalleryListResponse::failure)
}

/// Saves a photo the Dart camera just captured and prepends it.
///
/// Input semantics:
/// - `path`: local file path (native shells).
/// - `web_path`: transient web URL (browser shells).
/// - Both absent means the user cancelled the camera.
///
/// # FFI contract
/// - Async from Dart; captures are serialized.
/// - Never panics.
pub fn gallery_add_captured(path: Option<String>, web_path: Option<String>) -> GalleryActionResponse {
    let path = path.filter(|value| !value.trim().is_empty());
    let web_path = web_path.filter(|value| !value.trim().is_empty());

    let outcome = with_gallery(|gallery| {
        if path.is_some() || web_path.is_some() {
            let captured = CapturedPhoto {
                path: path.clone(),
                web_path: web_path.clone(),
                format: "jpeg".to_string(),
            };
            if let Err(err) = gallery.camera.stage(captured) {
                return GalleryActionResponse::failure(format!(
                    "gallery_add_captured failed: {err}"
                ));
            }
        } else if let Err(err) = gallery.camera.clear() {
            warn!("event=ffi_capture module=ffi status=error error={err}");
        }

        match gallery.screen.add_photo_to_gallery() {
            Ok(photo) => GalleryActionResponse {
                ok: true,
                cancelled: false,
                photo: Some(to_item(&photo)),
                message: "Photo saved.".to_string(),
            },
            Err(err) if err.is_cancelled() => GalleryActionResponse {
                ok: false,
                cancelled: true,
                photo: None,
                message: "Capture cancelled.".to_string(),
            },
            Err(err) => {
                GalleryActionResponse::failure(format!("gallery_add_captured failed: {err}"))
            }
        }
    });
    outcome.unwrap_or_else(GalleryActionResponse::failure)
}

/// Returns the in-memory gallery without touching storage.
#[flutter_rust_bridge::frb(sync)]
pub fn gallery_photos() -> GalleryListResponse {
    with_gallery(|gallery| GalleryListResponse::success(gallery.screen.photos()))
        .unwrap_or_else(GalleryListResponse::failure)
}

impl GalleryActionResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            cancelled: false,
            photo: None,
            message: message.into(),
        }
    }
}

fn with_gallery<T>(f: impl FnOnce(&mut FfiGallery) -> T) -> Result<T, String> {
    let mut state = STATE
        .lock()
        .map_err(|_| "gallery state is poisoned".to_string())?;

    if state.gallery.is_none() {
        let config = match state.config.clone() {
            Some(config) => config,
            None => GalleryConfig::from_env().map_err(|err| format!("gallery config: {err}"))?,
        };
        let camera = PendingCapture::new();
        let screen = open_gallery(&config, camera.clone())
            .map_err(|err| format!("gallery open failed: {err}"))?;
        state.gallery = Some(FfiGallery { screen, camera });
    }

    match state.gallery.as_mut() {
        Some(gallery) => Ok(f(gallery)),
        None => Err("gallery is not available".to_string()),
    }
}

fn to_item(photo: &UserPhoto) -> GalleryPhotoItem {
    GalleryPhotoItem {
        file_path: photo.file_path.clone(),
        web_view_path: photo.web_view_path.clone(),
    }
}
