//! Gallery use-case service.
//!
//! # Responsibility
//! - Capture a photo, store its bytes and prepend its record to the gallery.
//! - Mirror the gallery as one JSON snapshot under `PHOTO_STORAGE_KEY`.
//! - Reload the gallery from that snapshot.
//!
//! # Invariants
//! - The gallery is ordered newest first.
//! - After `add_new_to_gallery` returns `Ok`, the snapshot equals the
//!   in-memory list. On `Err(Persist)` the prepend is rolled back.
//! - `load_saved` replaces memory only after the whole snapshot was read
//!   and hydrated.

use crate::model::photo::UserPhoto;
use crate::platform::{Camera, CameraOptions, PlatformError, Preferences, RuntimeKind};
use crate::storage::PhotoStorage;
use log::{error, info, warn};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Preference key holding the gallery snapshot.
pub const PHOTO_STORAGE_KEY: &str = "photos";
/// Extension of every saved photo file.
pub const PHOTO_FILE_EXTENSION: &str = "jpeg";

pub type GalleryResult<T> = Result<T, GalleryError>;

/// Service error for gallery use-cases.
#[derive(Debug)]
pub enum GalleryError {
    /// Camera capture failed or was cancelled.
    Capture(PlatformError),
    /// Reading or writing photo files failed.
    Storage(PlatformError),
    /// Reading the snapshot from preferences failed.
    Preferences(PlatformError),
    /// Snapshot is not valid JSON or holds malformed records.
    MalformedSnapshot(serde_json::Error),
    /// Writing the snapshot failed after the photo file was saved.
    Persist {
        file_name: String,
        source: PlatformError,
    },
}

impl GalleryError {
    /// Returns whether the user dismissed the capture.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Capture(PlatformError::Cancelled))
    }
}

impl Display for GalleryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Capture(err) => write!(f, "photo capture failed: {err}"),
            Self::Storage(err) => write!(f, "photo storage failed: {err}"),
            Self::Preferences(err) => write!(f, "gallery snapshot read failed: {err}"),
            Self::MalformedSnapshot(err) => write!(f, "gallery snapshot is malformed: {err}"),
            Self::Persist { file_name, source } => {
                write!(f, "gallery snapshot write failed after saving `{file_name}`: {source}")
            }
        }
    }
}

impl Error for GalleryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Capture(err) | Self::Storage(err) | Self::Preferences(err) => Some(err),
            Self::MalformedSnapshot(err) => Some(err),
            Self::Persist { source, .. } => Some(source),
        }
    }
}

/// In-memory gallery state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryState {
    /// Ordered records, newest first.
    Photos(Vec<UserPhoto>),
    /// Snapshot held valid JSON that was not an array.
    ///
    /// Reads as an empty gallery; the next capture starts a fresh list.
    Corrupted { found: &'static str },
}

impl Default for GalleryState {
    fn default() -> Self {
        Self::Photos(Vec::new())
    }
}

type Clock = Box<dyn Fn() -> i64 + Send>;

/// Gallery service over injected camera, storage and preference capabilities.
pub struct PhotoService<C: Camera, S: PhotoStorage, P: Preferences> {
    camera: C,
    storage: S,
    preferences: P,
    state: GalleryState,
    clock: Clock,
}

impl<C: Camera, S: PhotoStorage, P: Preferences> PhotoService<C, S, P> {
    /// Creates a service with an empty gallery.
    pub fn new(camera: C, storage: S, preferences: P) -> Self {
        Self {
            camera,
            storage,
            preferences,
            state: GalleryState::default(),
            clock: Box::new(current_epoch_ms),
        }
    }

    /// Replaces the millisecond clock used to name photo files.
    pub fn with_clock(mut self, clock: impl Fn() -> i64 + Send + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Current gallery, newest first. Empty while the state is corrupted.
    pub fn photos(&self) -> &[UserPhoto] {
        match &self.state {
            GalleryState::Photos(photos) => photos,
            GalleryState::Corrupted { .. } => &[],
        }
    }

    pub fn state(&self) -> &GalleryState {
        &self.state
    }

    pub fn runtime(&self) -> RuntimeKind {
        self.storage.runtime()
    }

    /// Captures one photo, saves it and prepends it to the gallery.
    ///
    /// # Contract
    /// - Camera options are fixed: reference result, physical camera,
    ///   quality 100.
    /// - The file is named `<epoch-ms>.jpeg`.
    /// - A corrupted state is reset to an empty list before the prepend.
    /// - The snapshot write completes before this returns.
    ///
    /// # Errors
    /// - `Capture` when the user cancels or the camera is unavailable.
    /// - `Storage` when reading the capture or writing the file fails.
    /// - `Persist` when the snapshot write fails; memory is rolled back,
    ///   including a corrupted state reset by this capture.
    pub fn add_new_to_gallery(&mut self) -> GalleryResult<UserPhoto> {
        let started_at = Instant::now();
        let runtime = self.storage.runtime();

        let captured = match self.camera.capture(&CameraOptions::gallery_capture()) {
            Ok(captured) => captured,
            Err(PlatformError::Cancelled) => {
                info!("event=photo_capture module=gallery status=cancelled runtime={runtime}");
                return Err(GalleryError::Capture(PlatformError::Cancelled));
            }
            Err(err) => {
                error!("event=photo_capture module=gallery status=error runtime={runtime} error={err}");
                return Err(GalleryError::Capture(err));
            }
        };

        let file_name = format!("{}.{PHOTO_FILE_EXTENSION}", (self.clock)());
        let saved = self
            .storage
            .save_picture(&captured, &file_name)
            .map_err(|err| {
                error!(
                    "event=photo_save module=gallery status=error runtime={runtime} file_name={file_name} error={err}"
                );
                GalleryError::Storage(err)
            })?;

        let reset_from = match self.state {
            GalleryState::Corrupted { found } => Some(found),
            GalleryState::Photos(_) => None,
        };
        if let Some(found) = reset_from {
            warn!("event=gallery_reset module=gallery status=ok reason=not_a_list found={found}");
            self.state = GalleryState::default();
        }
        if let GalleryState::Photos(photos) = &mut self.state {
            photos.insert(0, saved.clone());
        }

        if let Err(err) = self.persist() {
            match reset_from {
                Some(found) => self.state = GalleryState::Corrupted { found },
                None => {
                    if let GalleryState::Photos(photos) = &mut self.state {
                        photos.remove(0);
                    }
                }
            }
            error!(
                "event=gallery_persist module=gallery status=error file_name={file_name} orphaned_file=true error={err}"
            );
            return Err(GalleryError::Persist {
                file_name,
                source: err,
            });
        }

        info!(
            "event=photo_capture module=gallery status=ok runtime={runtime} file_name={file_name} count={} duration_ms={}",
            self.photos().len(),
            started_at.elapsed().as_millis()
        );
        Ok(saved)
    }

    /// Reloads the gallery from the snapshot.
    ///
    /// # Contract
    /// - Absent snapshot yields an empty gallery.
    /// - Valid non-array JSON yields `GalleryState::Corrupted`.
    /// - Every record goes through `PhotoStorage::hydrate`; browser storage
    ///   rebuilds `webViewPath` as a JPEG data URI.
    ///
    /// # Errors
    /// - `Preferences` when the snapshot read fails.
    /// - `MalformedSnapshot` for invalid JSON or malformed records.
    /// - `Storage` when a record cannot be hydrated; memory is unchanged.
    pub fn load_saved(&mut self) -> GalleryResult<&[UserPhoto]> {
        let started_at = Instant::now();
        let raw = self
            .preferences
            .get(PHOTO_STORAGE_KEY)
            .map_err(|err| {
                error!("event=gallery_load module=gallery status=error stage=read error={err}");
                GalleryError::Preferences(err)
            })?;

        let mut loaded = match raw {
            Some(raw) => parse_snapshot(&raw).map_err(|err| {
                error!("event=gallery_load module=gallery status=error stage=parse error={err}");
                err
            })?,
            None => GalleryState::default(),
        };

        if let GalleryState::Photos(photos) = &mut loaded {
            for photo in photos.iter_mut() {
                self.storage.hydrate(photo).map_err(|err| {
                    error!(
                        "event=gallery_load module=gallery status=error stage=hydrate file_name={} error={err}",
                        photo.file_name()
                    );
                    GalleryError::Storage(err)
                })?;
            }
        }

        if let GalleryState::Corrupted { found } = loaded {
            warn!("event=gallery_load module=gallery status=ok corrupted=true found={found}");
        }
        self.state = loaded;
        info!(
            "event=gallery_load module=gallery status=ok runtime={} count={} duration_ms={}",
            self.storage.runtime(),
            self.photos().len(),
            started_at.elapsed().as_millis()
        );
        Ok(self.photos())
    }

    fn persist(&self) -> Result<(), PlatformError> {
        let snapshot = serde_json::to_string(self.photos())
            .map_err(|err| PlatformError::InvalidData(format!("snapshot encode: {err}")))?;
        self.preferences.set(PHOTO_STORAGE_KEY, &snapshot)
    }
}

fn parse_snapshot(raw: &str) -> GalleryResult<GalleryState> {
    let value: Value = serde_json::from_str(raw).map_err(GalleryError::MalformedSnapshot)?;
    let found = match &value {
        Value::Array(_) => {
            let photos =
                serde_json::from_value::<Vec<UserPhoto>>(value).map_err(GalleryError::MalformedSnapshot)?;
            return Ok(GalleryState::Photos(photos));
        }
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Object(_) => "object",
    };
    Ok(GalleryState::Corrupted { found })
}

fn current_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or_default()
}
