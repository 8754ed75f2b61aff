//! Provider configuration.

use std::time::Duration;

pub const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const TMDB_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";
pub const DEFAULT_LANGUAGE: &str = "en-US";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Settings for [`TmdbClient`](crate::TmdbClient) and the poster URLs it
/// produces.
#[derive(Debug, Clone)]
pub struct MetadataConfig {
    pub api_key: String,
    /// API root, without a trailing slash
    pub base_url: String,
    /// Image CDN root, without a trailing slash
    pub image_base_url: String,
    pub language: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl MetadataConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: TMDB_BASE_URL.to_string(),
            image_base_url: TMDB_IMAGE_BASE_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
