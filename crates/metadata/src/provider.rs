//! Metadata providers.
//!
//! [`DetailsProvider`] is the seam between the cache and the network:
//! `TmdbClient` talks to the real API, tests plug in their own.

use crate::config::MetadataConfig;
use crate::details::TmdbMovie;
use crate::error::{MetadataError, Result};
use data_loader::MovieId;
use reqwest::{Client, Url};
use tracing::{debug, instrument};

/// Source of raw movie details
#[async_trait::async_trait]
pub trait DetailsProvider: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Fetch the raw details for one movie. One call is one request; no
    /// retries.
    async fn movie_details(&self, movie_id: MovieId) -> Result<TmdbMovie>;
}

/// Client for the TMDB v3 REST API
#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
    language: String,
}

impl TmdbClient {
    /// Create a client whose requests time out after `config.timeout`
    pub fn new(config: &MetadataConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| MetadataError::ClientError(e.to_string()))?;
        Ok(Self::with_http_client(client, config))
    }

    /// Use a preconfigured HTTP client. The client's own timeout applies.
    pub fn with_http_client(client: Client, config: &MetadataConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            language: config.language.clone(),
        }
    }

    /// `{base}/movie/{id}?api_key={key}&language={language}`
    pub fn details_url(&self, movie_id: MovieId) -> Result<Url> {
        Url::parse_with_params(
            &format!("{}/movie/{}", self.base_url, movie_id),
            &[("api_key", self.api_key.as_str()), ("language", self.language.as_str())],
        )
        .map_err(|e| MetadataError::InvalidUrl(e.to_string()))
    }
}

#[async_trait::async_trait]
impl DetailsProvider for TmdbClient {
    fn name(&self) -> &str {
        "tmdb"
    }

    #[instrument(skip(self))]
    async fn movie_details(&self, movie_id: MovieId) -> Result<TmdbMovie> {
        let url = self.details_url(movie_id)?;
        debug!("GET {}/movie/{}", self.base_url, movie_id);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MetadataError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| MetadataError::MalformedBody(e.to_string()))
    }
}
