//! Web view locator conversion for native runtimes.

use super::ResourceLocator;

/// Path segment the embedded web server maps back onto the filesystem.
pub const APP_FILE_PATH_PREFIX: &str = "/_app_file_";

const DEFAULT_ORIGIN: &str = "http://localhost";

/// Converts `file://` URIs and absolute paths into web-view URLs served by
/// the embedded asset handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebViewLocator {
    origin: String,
}

impl WebViewLocator {
    pub fn new(origin: impl Into<String>) -> Self {
        let origin = origin.into();
        Self {
            origin: origin.trim_end_matches('/').to_string(),
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }
}

impl Default for WebViewLocator {
    fn default() -> Self {
        Self::new(DEFAULT_ORIGIN)
    }
}

impl ResourceLocator for WebViewLocator {
    fn convert_file_src(&self, uri: &str) -> String {
        let path = if let Some(rest) = uri.strip_prefix("file://") {
            rest
        } else if uri.starts_with('/') {
            uri
        } else {
            return uri.to_string();
        };
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        format!("{}{APP_FILE_PATH_PREFIX}{path}", self.origin)
    }
}

#[cfg(test)]
mod tests {
    use super::WebViewLocator;
    use crate::platform::ResourceLocator;

    #[test]
    fn converts_file_uri() {
        let locator = WebViewLocator::default();
        assert_eq!(
            locator.convert_file_src("file:///data/photos/1.jpeg"),
            "http://localhost/_app_file_/data/photos/1.jpeg"
        );
    }

    #[test]
    fn converts_absolute_path_with_custom_origin() {
        let locator = WebViewLocator::new("https://app.local/");
        assert_eq!(
            locator.convert_file_src("/var/mobile/1.jpeg"),
            "https://app.local/_app_file_/var/mobile/1.jpeg"
        );
    }

    #[test]
    fn passes_through_non_file_locators() {
        let locator = WebViewLocator::default();
        assert_eq!(
            locator.convert_file_src("https://cdn.example/1.jpeg"),
            "https://cdn.example/1.jpeg"
        );
    }
}
