//! Gallery screen controller.
//!
//! # Responsibility
//! - Trigger the initial gallery load and user-initiated captures.
//! - Surface failures to the UI instead of dropping them.
//!
//! # Invariants
//! - Each entry point calls the service exactly once.
//! - A cancelled capture is not reported as a UI error.

use crate::logging::sanitize_message;
use crate::model::photo::UserPhoto;
use crate::platform::{Camera, Preferences};
use crate::service::photo_service::{GalleryResult, PhotoService};
use crate::storage::PhotoStorage;
use log::{info, warn};

const MAX_UI_ERROR_CHARS: usize = 200;

/// Thin presentation controller over `PhotoService`.
pub struct GalleryScreen<C: Camera, S: PhotoStorage, P: Preferences> {
    service: PhotoService<C, S, P>,
    last_error: Option<String>,
}

impl<C: Camera, S: PhotoStorage, P: Preferences> GalleryScreen<C, S, P> {
    pub fn new(service: PhotoService<C, S, P>) -> Self {
        Self {
            service,
            last_error: None,
        }
    }

    /// Loads saved photos when the screen is first shown.
    ///
    /// Returns the number of photos in the gallery.
    pub fn on_init(&mut self) -> GalleryResult<usize> {
        let result = self.service.load_saved().map(<[UserPhoto]>::len);
        self.record_outcome("gallery_init", result)
    }

    /// Captures and saves one photo on user action.
    pub fn add_photo_to_gallery(&mut self) -> GalleryResult<UserPhoto> {
        let result = self.service.add_new_to_gallery();
        self.record_outcome("gallery_add", result)
    }

    pub fn photos(&self) -> &[UserPhoto] {
        self.service.photos()
    }

    /// Message of the last failed action, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub fn service(&self) -> &PhotoService<C, S, P> {
        &self.service
    }

    pub fn service_mut(&mut self) -> &mut PhotoService<C, S, P> {
        &mut self.service
    }

    fn record_outcome<T>(&mut self, event: &str, result: GalleryResult<T>) -> GalleryResult<T> {
        match &result {
            Ok(_) => self.last_error = None,
            Err(err) if err.is_cancelled() => {
                info!("event={event} module=screen status=cancelled");
                self.last_error = None;
            }
            Err(err) => {
                let message = sanitize_message(&err.to_string(), MAX_UI_ERROR_CHARS);
                warn!("event={event} module=screen status=error error={message}");
                self.last_error = Some(message);
            }
        }
        result
    }
}

impl<C: Camera, S: PhotoStorage, P: Preferences> From<PhotoService<C, S, P>>
    for GalleryScreen<C, S, P>
{
    fn from(service: PhotoService<C, S, P>) -> Self {
        Self::new(service)
    }
}
