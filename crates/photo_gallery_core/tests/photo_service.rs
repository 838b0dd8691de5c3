mod common;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use common::{
    stepping_clock, FakeCamera, MapFetcher, MemoryFilesystem, MemoryPreferences, PrefixLocator,
};
use photo_gallery_core::storage::JPEG_DATA_URI_PREFIX;
use photo_gallery_core::{
    BrowserPhotoStorage, CameraOptions, GalleryError, GalleryState, NativePhotoStorage,
    PhotoService, PlatformError, Preferences as _, UserPhoto, PHOTO_STORAGE_KEY,
};

type NativeService =
    PhotoService<FakeCamera, NativePhotoStorage<MemoryFilesystem, PrefixLocator>, MemoryPreferences>;
type BrowserService =
    PhotoService<FakeCamera, BrowserPhotoStorage<MemoryFilesystem, MapFetcher>, MemoryPreferences>;

fn native_service(
    camera: &FakeCamera,
    fs: &MemoryFilesystem,
    prefs: &MemoryPreferences,
) -> NativeService {
    PhotoService::new(
        camera.clone(),
        NativePhotoStorage::new(fs.clone(), PrefixLocator),
        prefs.clone(),
    )
    .with_clock(stepping_clock(1_700_000_000_000))
}

fn browser_service(
    camera: &FakeCamera,
    fs: &MemoryFilesystem,
    fetcher: &MapFetcher,
    prefs: &MemoryPreferences,
) -> BrowserService {
    PhotoService::new(
        camera.clone(),
        BrowserPhotoStorage::new(fs.clone(), fetcher.clone()),
        prefs.clone(),
    )
    .with_clock(stepping_clock(1_700_000_000_000))
}

fn persisted(prefs: &MemoryPreferences) -> Vec<UserPhoto> {
    let raw = prefs.raw(PHOTO_STORAGE_KEY).expect("snapshot should be written");
    serde_json::from_str(&raw).expect("snapshot should be a JSON array of photos")
}

#[test]
fn load_saved_without_snapshot_yields_empty_gallery() {
    let (camera, fs, prefs) = <(FakeCamera, MemoryFilesystem, MemoryPreferences)>::default();
    let mut service = native_service(&camera, &fs, &prefs);

    let photos = service.load_saved().expect("load without snapshot");
    assert!(photos.is_empty());
    assert_eq!(service.state(), &GalleryState::Photos(Vec::new()));
}

#[test]
fn first_capture_after_empty_load_persists_one_record() {
    let camera = FakeCamera::default();
    let fs = MemoryFilesystem::default();
    let prefs = MemoryPreferences::default();
    fs.put_external("/tmp/img1", b"\xFF\xD8\xFFfirst");
    camera.push_native("/tmp/img1");

    let mut service = native_service(&camera, &fs, &prefs);
    assert!(service.load_saved().expect("empty load").is_empty());

    let saved = service.add_new_to_gallery().expect("capture and save");
    assert_eq!(service.photos().len(), 1);
    assert!(saved.file_path.ends_with(".jpeg"));
    assert_eq!(saved.file_path, "file:///app/data/1700000000000.jpeg");
    assert_eq!(
        saved.web_view_path,
        "http://localhost/_app_file_/app/data/1700000000000.jpeg"
    );
    assert_eq!(
        fs.data_file("1700000000000.jpeg"),
        Some(STANDARD.encode(b"\xFF\xD8\xFFfirst"))
    );
    assert_eq!(persisted(&prefs).len(), 1);
}

#[test]
fn capture_uses_fixed_camera_options() {
    let camera = FakeCamera::default();
    let fs = MemoryFilesystem::default();
    let prefs = MemoryPreferences::default();
    fs.put_external("/tmp/img1", b"jpeg");
    camera.push_native("/tmp/img1");

    let mut service = native_service(&camera, &fs, &prefs);
    service.add_new_to_gallery().expect("capture");

    assert_eq!(camera.seen_options(), vec![CameraOptions::gallery_capture()]);
}

#[test]
fn captures_are_prepended_newest_first() {
    let camera = FakeCamera::default();
    let fs = MemoryFilesystem::default();
    let prefs = MemoryPreferences::with_value(
        PHOTO_STORAGE_KEY,
        r#"[{"filePath":"file:///app/data/1.jpeg","webViewPath":"http://localhost/_app_file_/app/data/1.jpeg"}]"#,
    );
    for index in 0..3 {
        let path = format!("/tmp/img{index}");
        fs.put_external(&path, format!("bytes-{index}").as_bytes());
        camera.push_native(&path);
    }

    let mut service = native_service(&camera, &fs, &prefs);
    assert_eq!(service.load_saved().expect("load prior").len(), 1);

    let mut captured = Vec::new();
    for _ in 0..3 {
        captured.push(service.add_new_to_gallery().expect("capture"));
    }

    let photos = service.photos();
    assert_eq!(photos.len(), 4);
    assert_eq!(photos[0], captured[2]);
    assert_eq!(photos[1], captured[1]);
    assert_eq!(photos[2], captured[0]);
    assert_eq!(photos[3].file_path, "file:///app/data/1.jpeg");
    assert_eq!(persisted(&prefs), photos.to_vec());
}

#[test]
fn persisted_gallery_reloads_in_same_order() {
    let camera = FakeCamera::default();
    let fs = MemoryFilesystem::default();
    let prefs = MemoryPreferences::default();
    for index in 0..2 {
        let path = format!("/tmp/shot{index}");
        fs.put_external(&path, b"jpeg");
        camera.push_native(&path);
    }

    let mut first = native_service(&camera, &fs, &prefs);
    first.add_new_to_gallery().expect("first capture");
    first.add_new_to_gallery().expect("second capture");
    let expected: Vec<String> = first
        .photos()
        .iter()
        .map(|photo| photo.file_path.clone())
        .collect();

    let mut reloaded = native_service(&camera, &fs, &prefs);
    let loaded: Vec<String> = reloaded
        .load_saved()
        .expect("reload")
        .iter()
        .map(|photo| photo.file_path.clone())
        .collect();
    assert_eq!(loaded, expected);
    assert_eq!(reloaded.photos(), first.photos());
}

#[test]
fn browser_capture_stores_payload_and_keeps_session_url() {
    let camera = FakeCamera::default();
    let fs = MemoryFilesystem::default();
    let fetcher = MapFetcher::default();
    let prefs = MemoryPreferences::default();
    fetcher.insert_jpeg("blob:http://localhost/abc", b"\xFF\xD8\xFFweb");
    camera.push_web("blob:http://localhost/abc");

    let mut service = browser_service(&camera, &fs, &fetcher, &prefs);
    let saved = service.add_new_to_gallery().expect("browser capture");

    assert_eq!(saved.file_path, "1700000000000.jpeg");
    assert_eq!(saved.web_view_path, "blob:http://localhost/abc");
    assert_eq!(
        fs.data_file("1700000000000.jpeg"),
        Some(STANDARD.encode(b"\xFF\xD8\xFFweb"))
    );
}

#[test]
fn browser_reload_rebuilds_jpeg_data_uris() {
    let camera = FakeCamera::default();
    let fs = MemoryFilesystem::default();
    let fetcher = MapFetcher::default();
    let prefs = MemoryPreferences::default();
    for index in 0..3 {
        let url = format!("blob:http://localhost/{index}");
        fetcher.insert_jpeg(&url, format!("image-{index}").as_bytes());
        camera.push_web(&url);
    }

    let mut session = browser_service(&camera, &fs, &fetcher, &prefs);
    for _ in 0..3 {
        session.add_new_to_gallery().expect("capture");
    }

    let mut next_session = browser_service(&camera, &fs, &MapFetcher::default(), &prefs);
    let photos = next_session.load_saved().expect("reload");
    assert_eq!(photos.len(), 3);
    for photo in photos {
        let payload = photo
            .web_view_path
            .strip_prefix(JPEG_DATA_URI_PREFIX)
            .expect("web view path should be a JPEG data URI");
        STANDARD
            .decode(payload)
            .expect("payload should be valid base64");
    }
    assert_eq!(
        photos[0].web_view_path,
        format!("{JPEG_DATA_URI_PREFIX}{}", STANDARD.encode(b"image-2"))
    );
}

#[test]
fn browser_reload_fills_record_saved_without_locator() {
    let (camera, fs, fetcher) = <(FakeCamera, MemoryFilesystem, MapFetcher)>::default();
    fs.put_data_raw("5.jpeg", &STANDARD.encode(b"old-image"));
    let prefs = MemoryPreferences::with_value(PHOTO_STORAGE_KEY, r#"[{"filePath":"5.jpeg"}]"#);

    let mut service = browser_service(&camera, &fs, &fetcher, &prefs);
    let photos = service.load_saved().expect("record without webViewPath");
    assert_eq!(
        photos[0].web_view_path,
        format!("{JPEG_DATA_URI_PREFIX}{}", STANDARD.encode(b"old-image"))
    );
}

#[test]
fn browser_reload_fails_on_missing_file_and_keeps_memory() {
    let (camera, fs, fetcher) = <(FakeCamera, MemoryFilesystem, MapFetcher)>::default();
    let prefs = MemoryPreferences::with_value(
        PHOTO_STORAGE_KEY,
        r#"[{"filePath":"gone.jpeg","webViewPath":"blob:old"}]"#,
    );

    let mut service = browser_service(&camera, &fs, &fetcher, &prefs);
    let err = service.load_saved().expect_err("missing photo file");
    assert!(matches!(err, GalleryError::Storage(PlatformError::NotFound(_))));
    assert!(service.photos().is_empty());
}

#[test]
fn browser_reload_rejects_non_base64_file() {
    let (camera, fs, fetcher) = <(FakeCamera, MemoryFilesystem, MapFetcher)>::default();
    fs.put_data_raw("1.jpeg", "%%% not base64 %%%");
    let prefs = MemoryPreferences::with_value(
        PHOTO_STORAGE_KEY,
        r#"[{"filePath":"1.jpeg","webViewPath":"blob:old"}]"#,
    );

    let mut service = browser_service(&camera, &fs, &fetcher, &prefs);
    let err = service.load_saved().expect_err("invalid payload");
    assert!(matches!(err, GalleryError::Storage(PlatformError::InvalidData(_))));
}

#[test]
fn native_reload_keeps_stored_locators() {
    let (camera, fs) = <(FakeCamera, MemoryFilesystem)>::default();
    let prefs = MemoryPreferences::with_value(
        PHOTO_STORAGE_KEY,
        r#"[{"filePath":"file:///app/data/9.jpeg","webViewPath":"http://localhost/_app_file_/app/data/9.jpeg"}]"#,
    );

    let mut service = native_service(&camera, &fs, &prefs);
    let photos = service.load_saved().expect("native reload");
    assert_eq!(
        photos[0].web_view_path,
        "http://localhost/_app_file_/app/data/9.jpeg"
    );
}

#[test]
fn corrupted_snapshot_is_reset_by_next_capture() {
    let (camera, fs) = <(FakeCamera, MemoryFilesystem)>::default();
    let prefs = MemoryPreferences::with_value(PHOTO_STORAGE_KEY, r#"{"not":"a list"}"#);
    fs.put_external("/tmp/img1", b"jpeg");
    camera.push_native("/tmp/img1");

    let mut service = native_service(&camera, &fs, &prefs);
    assert!(service.load_saved().expect("corrupted load").is_empty());
    assert_eq!(service.state(), &GalleryState::Corrupted { found: "object" });

    service.add_new_to_gallery().expect("capture after corruption");
    assert_eq!(service.photos().len(), 1);
    assert_eq!(persisted(&prefs).len(), 1);
}

#[test]
fn malformed_snapshot_propagates_and_keeps_previous_state() {
    let (camera, fs) = <(FakeCamera, MemoryFilesystem)>::default();
    let prefs = MemoryPreferences::default();
    fs.put_external("/tmp/img1", b"jpeg");
    camera.push_native("/tmp/img1");

    let mut service = native_service(&camera, &fs, &prefs);
    service.add_new_to_gallery().expect("capture");
    let before = service.photos().to_vec();

    prefs
        .set(PHOTO_STORAGE_KEY, "[{\"filePath\":")
        .expect("overwrite snapshot");

    let err = service.load_saved().expect_err("malformed snapshot");
    assert!(matches!(err, GalleryError::MalformedSnapshot(_)));
    assert_eq!(service.photos(), before.as_slice());
}

#[test]
fn cancelled_capture_propagates_without_side_effects() {
    let (camera, fs, prefs) = <(FakeCamera, MemoryFilesystem, MemoryPreferences)>::default();
    camera.push(Err(PlatformError::Cancelled));

    let mut service = native_service(&camera, &fs, &prefs);
    let err = service.add_new_to_gallery().expect_err("cancelled");
    assert!(err.is_cancelled());
    assert!(service.photos().is_empty());
    assert_eq!(fs.data_file_count(), 0);
    assert_eq!(prefs.write_count(), 0);
}

#[test]
fn unreadable_capture_reports_storage_error() {
    let (camera, fs, prefs) = <(FakeCamera, MemoryFilesystem, MemoryPreferences)>::default();
    camera.push_native("/tmp/missing");

    let mut service = native_service(&camera, &fs, &prefs);
    let err = service.add_new_to_gallery().expect_err("missing capture file");
    assert!(matches!(err, GalleryError::Storage(PlatformError::NotFound(_))));
    assert!(service.photos().is_empty());
}

#[test]
fn capture_without_reference_for_runtime_fails() {
    let (camera, fs, fetcher, prefs) =
        <(FakeCamera, MemoryFilesystem, MapFetcher, MemoryPreferences)>::default();
    camera.push_native("/tmp/img1");

    let mut service = browser_service(&camera, &fs, &fetcher, &prefs);
    let err = service
        .add_new_to_gallery()
        .expect_err("browser needs a web path");
    assert!(matches!(err, GalleryError::Storage(PlatformError::InvalidData(_))));
}

#[test]
fn failed_persist_rolls_back_prepend() {
    let (camera, fs, prefs) = <(FakeCamera, MemoryFilesystem, MemoryPreferences)>::default();
    for index in 0..2 {
        let path = format!("/tmp/img{index}");
        fs.put_external(&path, b"jpeg");
        camera.push_native(&path);
    }

    let mut service = native_service(&camera, &fs, &prefs);
    service.add_new_to_gallery().expect("first capture");
    prefs.fail_writes(true);

    let err = service.add_new_to_gallery().expect_err("persist failure");
    match err {
        GalleryError::Persist { file_name, source } => {
            assert_eq!(file_name, "1700000000001.jpeg");
            assert!(matches!(source, PlatformError::Io(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(service.photos().len(), 1);
    assert_eq!(persisted(&prefs).len(), 1);
    assert_eq!(fs.data_file_count(), 2);
}

#[test]
fn failed_persist_after_corruption_keeps_corrupted_state() {
    let (camera, fs) = <(FakeCamera, MemoryFilesystem)>::default();
    let prefs = MemoryPreferences::with_value(PHOTO_STORAGE_KEY, "42");
    fs.put_external("/tmp/img1", b"jpeg");
    camera.push_native("/tmp/img1");

    let mut service = native_service(&camera, &fs, &prefs);
    service.load_saved().expect("corrupted load");
    prefs.fail_writes(true);

    let err = service.add_new_to_gallery().expect_err("persist failure");
    assert!(matches!(err, GalleryError::Persist { .. }));
    assert_eq!(service.state(), &GalleryState::Corrupted { found: "number" });
    assert_eq!(prefs.raw(PHOTO_STORAGE_KEY).as_deref(), Some("42"));
}
