//! Cached metadata lookups.
//!
//! `MetadataFetcher` never fails: any provider error is logged and replaced
//! by [`MovieDetails::error_sentinel`]. Records are cached per movie id for
//! the lifetime of the fetcher, with no eviction. That is only reasonable
//! because the catalog is small and fixed.
//!
//! Each id gets its own `OnceCell`, so concurrent callers asking for the
//! same movie wait on one in-flight request instead of issuing their own.

use crate::config::MetadataConfig;
use crate::details::MovieDetails;
use crate::error::Result;
use crate::provider::{DetailsProvider, TmdbClient};
use data_loader::MovieId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, instrument, warn};

type CacheSlot = Arc<OnceCell<Arc<MovieDetails>>>;

pub struct MetadataFetcher {
    provider: Arc<dyn DetailsProvider>,
    image_base_url: String,
    cache: Mutex<HashMap<MovieId, CacheSlot>>,
    /// Whether the error sentinel is cached like a real record
    cache_failures: bool,
}

impl MetadataFetcher {
    pub fn new(provider: Arc<dyn DetailsProvider>, image_base_url: impl Into<String>) -> Self {
        Self {
            provider,
            image_base_url: image_base_url.into(),
            cache: Mutex::new(HashMap::new()),
            cache_failures: true,
        }
    }

    /// Fetcher backed by the TMDB API
    pub fn tmdb(config: &MetadataConfig) -> Result<Self> {
        let client = TmdbClient::new(config)?;
        Ok(Self::new(Arc::new(client), config.image_base_url.clone()))
    }

    /// Configure whether failed fetches are cached (default: true).
    ///
    /// With `false`, a failure still returns the sentinel but the next call
    /// for that id tries the provider again.
    pub fn with_cache_failures(mut self, cache_failures: bool) -> Self {
        self.cache_failures = cache_failures;
        self
    }

    /// Get display metadata for a movie.
    ///
    /// Calls for an id that is already cached return the same `Arc` without
    /// touching the provider.
    #[instrument(skip(self))]
    pub async fn fetch_details(&self, movie_id: MovieId) -> Arc<MovieDetails> {
        let slot = {
            let mut cache = self.cache.lock().await;
            Arc::clone(cache.entry(movie_id).or_default())
        };

        if let Some(details) = slot.get() {
            debug!("Cache hit");
            return Arc::clone(details);
        }

        let result = slot
            .get_or_try_init(|| async {
                match self.provider.movie_details(movie_id).await {
                    Ok(movie) => Ok(Arc::new(MovieDetails::from_response(
                        movie,
                        &self.image_base_url,
                    ))),
                    Err(e) => {
                        warn!(
                            "{} fetch error for movie {}: {}",
                            self.provider.name(),
                            movie_id,
                            e
                        );
                        if self.cache_failures {
                            Ok(Arc::new(MovieDetails::error_sentinel()))
                        } else {
                            Err(e)
                        }
                    }
                }
            })
            .await;

        match result {
            Ok(details) => Arc::clone(details),
            Err(_) => Arc::new(MovieDetails::error_sentinel()),
        }
    }

    /// Number of movies with a cached record
    pub async fn cached_count(&self) -> usize {
        self.cache
            .lock()
            .await
            .values()
            .filter(|slot| slot.initialized())
            .count()
    }
}
