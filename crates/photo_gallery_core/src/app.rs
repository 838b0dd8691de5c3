//! Application wiring from `GalleryConfig` to a ready gallery screen.

use crate::config::GalleryConfig;
use crate::db::DbResult;
use crate::platform::{
    FileUrlFetcher, LocalFilesystem, PendingCapture, RuntimeKind, SqlitePreferences,
    WebViewLocator,
};
use crate::screen::GalleryScreen;
use crate::service::photo_service::PhotoService;
use crate::storage::{BrowserPhotoStorage, NativePhotoStorage, PhotoStorage};
use log::info;

/// Gallery screen as assembled for shells and the CLI.
pub type AppGallery =
    GalleryScreen<PendingCapture, Box<dyn PhotoStorage + Send>, SqlitePreferences>;

/// Builds the gallery for `config`.
///
/// The storage adapter is picked here, once, from `config.runtime`. The
/// caller keeps a clone of `camera` to stage captures.
pub fn open_gallery(config: &GalleryConfig, camera: PendingCapture) -> DbResult<AppGallery> {
    let preferences = SqlitePreferences::open(config.preferences_db_path())?;
    let filesystem = LocalFilesystem::new(config.photos_dir(), config.cache_dir());

    let storage: Box<dyn PhotoStorage + Send> = match config.runtime {
        RuntimeKind::Native => Box::new(NativePhotoStorage::new(
            filesystem,
            WebViewLocator::new(config.webview_origin.clone()),
        )),
        RuntimeKind::Browser => Box::new(BrowserPhotoStorage::new(filesystem, FileUrlFetcher::new())),
    };

    info!(
        "event=gallery_open module=app status=ok runtime={} data_dir={}",
        config.runtime,
        config.data_dir.display()
    );
    Ok(GalleryScreen::new(PhotoService::new(
        camera,
        storage,
        preferences,
    )))
}
