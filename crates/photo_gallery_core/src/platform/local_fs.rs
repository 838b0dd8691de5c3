//! Local-disk `Filesystem` implementation.
//!
//! # Responsibility
//! - Map `Directory` areas onto directories under the configured data root.
//! - Translate between on-disk bytes and the base64 payloads of the contract.
//!
//! # Invariants
//! - Directory-relative paths never escape their area root.
//! - Written files are reported back as absolute `file://` URIs.

use super::{Directory, Filesystem, PlatformError, PlatformResult};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use log::debug;
use std::path::{Component, Path, PathBuf};
use url::Url;

/// Filesystem rooted at one data directory and one cache directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFilesystem {
    data_dir: PathBuf,
    cache_dir: PathBuf,
}

impl LocalFilesystem {
    pub fn new(data_dir: impl Into<PathBuf>, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            cache_dir: cache_dir.into(),
        }
    }

    pub fn directory_root(&self, directory: Directory) -> &Path {
        match directory {
            Directory::Data => &self.data_dir,
            Directory::Cache => &self.cache_dir,
        }
    }

    fn resolve(&self, path: &str, directory: Option<Directory>) -> PlatformResult<PathBuf> {
        match directory {
            Some(directory) => {
                let relative = Path::new(path);
                if path.trim().is_empty() {
                    return Err(PlatformError::InvalidData("file path must not be empty".to_string()));
                }
                let escapes = relative
                    .components()
                    .any(|component| !matches!(component, Component::Normal(_) | Component::CurDir));
                if escapes {
                    return Err(PlatformError::InvalidData(format!(
                        "path `{path}` must stay inside the {} directory",
                        directory.as_str()
                    )));
                }
                Ok(self.directory_root(directory).join(relative))
            }
            None => resolve_external_path(path),
        }
    }
}

impl Filesystem for LocalFilesystem {
    fn read_file(&self, path: &str, directory: Option<Directory>) -> PlatformResult<String> {
        let full_path = self.resolve(path, directory)?;
        let bytes = std::fs::read(&full_path)?;
        debug!(
            "event=fs_read module=platform status=ok bytes={} directory={}",
            bytes.len(),
            directory.map_or("none", Directory::as_str)
        );
        Ok(STANDARD.encode(bytes))
    }

    fn write_file(&self, path: &str, data: &str, directory: Directory) -> PlatformResult<String> {
        let full_path = self.resolve(path, Some(directory))?;
        let bytes = STANDARD
            .decode(data)
            .map_err(|err| PlatformError::InvalidData(format!("file data is not base64: {err}")))?;

        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&full_path, &bytes)?;

        let absolute = std::fs::canonicalize(&full_path)?;
        let uri = Url::from_file_path(&absolute).map_err(|_| {
            PlatformError::InvalidData(format!(
                "cannot express `{}` as a file URI",
                absolute.display()
            ))
        })?;
        debug!(
            "event=fs_write module=platform status=ok bytes={} directory={}",
            bytes.len(),
            directory.as_str()
        );
        Ok(uri.to_string())
    }
}

fn resolve_external_path(path: &str) -> PlatformResult<PathBuf> {
    if path.starts_with("file://") {
        let url = Url::parse(path)
            .map_err(|err| PlatformError::InvalidData(format!("invalid file URI `{path}`: {err}")))?;
        return url
            .to_file_path()
            .map_err(|_| PlatformError::InvalidData(format!("file URI has no local path: {path}")));
    }

    let candidate = Path::new(path);
    if !candidate.is_absolute() {
        return Err(PlatformError::InvalidData(format!(
            "path `{path}` must be absolute when no directory is given"
        )));
    }
    Ok(candidate.to_path_buf())
}
