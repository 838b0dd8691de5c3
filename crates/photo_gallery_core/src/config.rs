//! Environment-driven gallery configuration.
//!
//! # Responsibility
//! - Resolve data, log and preference locations for one process.
//! - Pick the runtime (native or browser) the storage adapter is built for.
//!
//! # Invariants
//! - Every derived path lives under `data_dir` unless overridden.
//! - Blank variables count as unset.

use crate::logging::{default_log_level, normalize_level};
use crate::platform::RuntimeKind;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DATA_DIR: &str = "PHOTO_GALLERY_DATA_DIR";
pub const ENV_RUNTIME: &str = "PHOTO_GALLERY_RUNTIME";
pub const ENV_LOG_LEVEL: &str = "PHOTO_GALLERY_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "PHOTO_GALLERY_LOG_DIR";
pub const ENV_WEBVIEW_ORIGIN: &str = "PHOTO_GALLERY_WEBVIEW_ORIGIN";

const DEFAULT_DATA_DIR_NAME: &str = "photo_gallery";
const DEFAULT_WEBVIEW_ORIGIN: &str = "http://localhost";
const PREFERENCES_DB_FILE_NAME: &str = "preferences.sqlite3";

/// Resolved process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryConfig {
    pub data_dir: PathBuf,
    pub runtime: RuntimeKind,
    pub log_level: String,
    pub log_dir: PathBuf,
    pub webview_origin: String,
}

impl GalleryConfig {
    /// Defaults rooted at `data_dir`.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            log_dir: data_dir.join("logs"),
            data_dir,
            runtime: RuntimeKind::Native,
            log_level: default_log_level().to_string(),
            webview_origin: DEFAULT_WEBVIEW_ORIGIN.to_string(),
        }
    }

    /// Reads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`, which maps variable names to
    /// values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let data_dir = read(ENV_DATA_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DATA_DIR_NAME));
        let mut config = Self::with_data_dir(data_dir);

        if let Some(runtime) = read(ENV_RUNTIME) {
            config.runtime = runtime
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    name: ENV_RUNTIME,
                    value: runtime.clone(),
                })?;
        }
        if let Some(level) = read(ENV_LOG_LEVEL) {
            let normalized = normalize_level(&level).map_err(|_| ConfigError::InvalidValue {
                name: ENV_LOG_LEVEL,
                value: level.clone(),
            })?;
            config.log_level = normalized.to_string();
        }
        if let Some(log_dir) = read(ENV_LOG_DIR) {
            config.log_dir = PathBuf::from(log_dir);
        }
        if let Some(origin) = read(ENV_WEBVIEW_ORIGIN) {
            if !origin.starts_with("http://") && !origin.starts_with("https://") {
                return Err(ConfigError::InvalidValue {
                    name: ENV_WEBVIEW_ORIGIN,
                    value: origin,
                });
            }
            config.webview_origin = origin;
        }

        Ok(config)
    }

    /// Application-private data area for photo files.
    pub fn photos_dir(&self) -> PathBuf {
        self.data_dir.join("photos")
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.data_dir.join("cache")
    }

    pub fn preferences_db_path(&self) -> PathBuf {
        self.data_dir.join(PREFERENCES_DB_FILE_NAME)
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue { name: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { name, value } => {
                write!(f, "invalid value `{value}` for {name}")
            }
        }
    }
}

impl Error for ConfigError {}
