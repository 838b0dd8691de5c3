//! Runtime-specific photo storage adapters.
//!
//! # Responsibility
//! - Hide the native-vs-browser differences of saving and reloading photos
//!   behind one `PhotoStorage` contract.
//! - Keep the gallery service free of runtime conditionals.
//!
//! # Invariants
//! - The adapter is chosen once, when the service is constructed.
//! - `save_picture` writes into `Directory::Data` only.

mod browser;
mod data_url;
mod native;

pub use browser::BrowserPhotoStorage;
pub use data_url::{
    blob_to_data_url, data_url_payload, is_valid_base64, jpeg_data_uri, JPEG_DATA_URI_PREFIX,
};
pub use native::NativePhotoStorage;

use crate::model::photo::{CapturedPhoto, UserPhoto};
use crate::platform::{PlatformResult, RuntimeKind};

/// Storage adapter contract used by `PhotoService`.
pub trait PhotoStorage {
    /// Runtime this adapter serves.
    fn runtime(&self) -> RuntimeKind;

    /// Reads the captured image, writes it under `file_name` and returns the
    /// record to keep in the gallery.
    fn save_picture(&self, photo: &CapturedPhoto, file_name: &str) -> PlatformResult<UserPhoto>;

    /// Makes a record loaded from the snapshot renderable again.
    fn hydrate(&self, photo: &mut UserPhoto) -> PlatformResult<()>;
}

impl<S: PhotoStorage + ?Sized> PhotoStorage for Box<S> {
    fn runtime(&self) -> RuntimeKind {
        (**self).runtime()
    }

    fn save_picture(&self, photo: &CapturedPhoto, file_name: &str) -> PlatformResult<UserPhoto> {
        (**self).save_picture(photo, file_name)
    }

    fn hydrate(&self, photo: &mut UserPhoto) -> PlatformResult<()> {
        (**self).hydrate(photo)
    }
}
