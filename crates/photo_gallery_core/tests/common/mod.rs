#![allow(dead_code)]

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use photo_gallery_core::{
    Blob, BlobFetcher, Camera, CameraOptions, CapturedPhoto, Directory, Filesystem,
    PlatformError, PlatformResult, Preferences, ResourceLocator,
};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::rc::Rc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Camera returning queued results, recording the options it was called with.
#[derive(Clone, Default)]
pub struct FakeCamera {
    queue: Rc<RefCell<VecDeque<PlatformResult<CapturedPhoto>>>>,
    seen_options: Rc<RefCell<Vec<CameraOptions>>>,
}

impl FakeCamera {
    pub fn push(&self, result: PlatformResult<CapturedPhoto>) {
        self.queue.borrow_mut().push_back(result);
    }

    pub fn push_native(&self, path: &str) {
        self.push(Ok(CapturedPhoto::native(path, None)));
    }

    pub fn push_web(&self, web_path: &str) {
        self.push(Ok(CapturedPhoto::web(web_path)));
    }

    pub fn seen_options(&self) -> Vec<CameraOptions> {
        self.seen_options.borrow().clone()
    }
}

impl Camera for FakeCamera {
    fn capture(&self, options: &CameraOptions) -> PlatformResult<CapturedPhoto> {
        self.seen_options.borrow_mut().push(*options);
        self.queue
            .borrow_mut()
            .pop_front()
            .unwrap_or(Err(PlatformError::Cancelled))
    }
}

/// In-memory filesystem. Directory-relative files live under `data/<name>`,
/// external files under their absolute path.
#[derive(Clone, Default)]
pub struct MemoryFilesystem {
    files: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryFilesystem {
    pub fn put_external(&self, path: &str, bytes: &[u8]) {
        self.files
            .borrow_mut()
            .insert(path.to_string(), STANDARD.encode(bytes));
    }

    pub fn put_data_raw(&self, name: &str, payload: &str) {
        self.files
            .borrow_mut()
            .insert(data_key(name), payload.to_string());
    }

    pub fn data_file(&self, name: &str) -> Option<String> {
        self.files.borrow().get(&data_key(name)).cloned()
    }

    pub fn data_file_count(&self) -> usize {
        self.files
            .borrow()
            .keys()
            .filter(|key| key.starts_with("data/"))
            .count()
    }
}

fn data_key(name: &str) -> String {
    format!("data/{name}")
}

fn key_for(path: &str, directory: Option<Directory>) -> String {
    match directory {
        Some(Directory::Data) => data_key(path),
        Some(Directory::Cache) => format!("cache/{path}"),
        None => path.to_string(),
    }
}

impl Filesystem for MemoryFilesystem {
    fn read_file(&self, path: &str, directory: Option<Directory>) -> PlatformResult<String> {
        self.files
            .borrow()
            .get(&key_for(path, directory))
            .cloned()
            .ok_or_else(|| PlatformError::NotFound(path.to_string()))
    }

    fn write_file(&self, path: &str, data: &str, directory: Directory) -> PlatformResult<String> {
        self.files
            .borrow_mut()
            .insert(key_for(path, Some(directory)), data.to_string());
        Ok(format!("file:///app/{}/{path}", directory.as_str()))
    }
}

/// In-memory preferences that can be switched to fail writes.
#[derive(Clone, Default)]
pub struct MemoryPreferences {
    values: Rc<RefCell<HashMap<String, String>>>,
    fail_writes: Rc<Cell<bool>>,
    writes: Rc<Cell<usize>>,
}

impl MemoryPreferences {
    pub fn with_value(key: &str, value: &str) -> Self {
        let prefs = Self::default();
        prefs
            .values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        prefs
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl Preferences for MemoryPreferences {
    fn get(&self, key: &str) -> PlatformResult<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> PlatformResult<()> {
        if self.fail_writes.get() {
            return Err(PlatformError::Io("disk full".to_string()));
        }
        self.writes.set(self.writes.get() + 1);
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Fetcher serving fixed blobs by URL.
#[derive(Clone, Default)]
pub struct MapFetcher {
    blobs: Rc<RefCell<HashMap<String, Blob>>>,
}

impl MapFetcher {
    pub fn insert_jpeg(&self, url: &str, bytes: &[u8]) {
        self.blobs.borrow_mut().insert(
            url.to_string(),
            Blob {
                mime_type: "image/jpeg".to_string(),
                bytes: bytes.to_vec(),
            },
        );
    }
}

impl BlobFetcher for MapFetcher {
    fn fetch(&self, url: &str) -> PlatformResult<Blob> {
        self.blobs
            .borrow()
            .get(url)
            .cloned()
            .ok_or_else(|| PlatformError::NotFound(url.to_string()))
    }
}

/// Locator prefixing URIs with a fixed origin.
#[derive(Clone, Copy, Default)]
pub struct PrefixLocator;

impl ResourceLocator for PrefixLocator {
    fn convert_file_src(&self, uri: &str) -> String {
        format!("http://localhost/_app_file_{}", uri.trim_start_matches("file://"))
    }
}

/// Clock handing out increasing milliseconds starting at `start`.
pub fn stepping_clock(start: i64) -> impl Fn() -> i64 + Send + 'static {
    let next = Arc::new(AtomicI64::new(start));
    move || next.fetch_add(1, Ordering::SeqCst)
}
