//! Storage adapter for plain browsers.

use super::data_url::{blob_to_data_url, data_url_payload, is_valid_base64, jpeg_data_uri};
use super::PhotoStorage;
use crate::model::photo::{CapturedPhoto, UserPhoto};
use crate::platform::{
    BlobFetcher, Directory, Filesystem, PlatformError, PlatformResult, RuntimeKind,
};
use log::debug;

/// Fetches captures through their transient web URL and rebuilds data URIs
/// on reload, since that URL dies with the session.
pub struct BrowserPhotoStorage<F: Filesystem, B: BlobFetcher> {
    filesystem: F,
    fetcher: B,
}

impl<F: Filesystem, B: BlobFetcher> BrowserPhotoStorage<F, B> {
    pub fn new(filesystem: F, fetcher: B) -> Self {
        Self {
            filesystem,
            fetcher,
        }
    }
}

impl<F: Filesystem, B: BlobFetcher> PhotoStorage for BrowserPhotoStorage<F, B> {
    fn runtime(&self) -> RuntimeKind {
        RuntimeKind::Browser
    }

    fn save_picture(&self, photo: &CapturedPhoto, file_name: &str) -> PlatformResult<UserPhoto> {
        let web_path = photo.web_path.as_deref().ok_or_else(|| {
            PlatformError::InvalidData("browser capture did not report a web path".to_string())
        })?;

        let blob = self.fetcher.fetch(web_path)?;
        let data_url = blob_to_data_url(&blob);
        let payload = data_url_payload(&data_url)?;
        self.filesystem
            .write_file(file_name, payload, Directory::Data)?;
        debug!(
            "event=photo_write module=storage status=ok runtime=browser file_name={file_name} bytes={}",
            blob.bytes.len()
        );

        Ok(UserPhoto::new(file_name, web_path))
    }

    fn hydrate(&self, photo: &mut UserPhoto) -> PlatformResult<()> {
        let payload = self
            .filesystem
            .read_file(&photo.file_path, Some(Directory::Data))?;
        if !is_valid_base64(&payload) {
            return Err(PlatformError::InvalidData(format!(
                "stored photo `{}` is not valid base64",
                photo.file_path
            )));
        }
        photo.web_view_path = jpeg_data_uri(&payload);
        Ok(())
    }
}
