//! Storage adapter for native wrappers.

use super::PhotoStorage;
use crate::model::photo::{CapturedPhoto, UserPhoto};
use crate::platform::{
    Directory, Filesystem, PlatformError, PlatformResult, ResourceLocator, RuntimeKind,
};
use log::debug;

/// Reads captures straight from their local path and serves saved files
/// through the web view locator.
pub struct NativePhotoStorage<F: Filesystem, L: ResourceLocator> {
    filesystem: F,
    locator: L,
}

impl<F: Filesystem, L: ResourceLocator> NativePhotoStorage<F, L> {
    pub fn new(filesystem: F, locator: L) -> Self {
        Self {
            filesystem,
            locator,
        }
    }
}

impl<F: Filesystem, L: ResourceLocator> PhotoStorage for NativePhotoStorage<F, L> {
    fn runtime(&self) -> RuntimeKind {
        RuntimeKind::Native
    }

    fn save_picture(&self, photo: &CapturedPhoto, file_name: &str) -> PlatformResult<UserPhoto> {
        let path = photo.path.as_deref().ok_or_else(|| {
            PlatformError::InvalidData("native capture did not report a file path".to_string())
        })?;

        // The filesystem already hands back base64, nothing left to encode.
        let data = self.filesystem.read_file(path, None)?;
        let uri = self
            .filesystem
            .write_file(file_name, &data, Directory::Data)?;
        debug!("event=photo_write module=storage status=ok runtime=native file_name={file_name}");

        Ok(UserPhoto {
            web_view_path: self.locator.convert_file_src(&uri),
            file_path: uri,
        })
    }

    fn hydrate(&self, _photo: &mut UserPhoto) -> PlatformResult<()> {
        Ok(())
    }
}
