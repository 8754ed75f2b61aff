//! # Recommendation Service
//!
//! One recommendation cycle:
//! 1. Look up the movies most similar to the chosen title
//! 2. Fetch display metadata for each of them, in rank order
//! 3. Return them ready for rendering
//!
//! Fetches run one after another. Each is bounded by the provider timeout
//! and cached, so a repeated query costs no network calls.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, instrument};

use data_loader::{CatalogEntry, MovieId};
use metadata::{MetadataFetcher, MovieDetails};
use similarity::SimilarityIndex;

/// One enriched recommendation
#[derive(Debug, Clone)]
pub struct MovieRecommendation {
    /// 1-based position in the result list
    pub rank: usize,
    pub movie: CatalogEntry,
    pub details: Arc<MovieDetails>,
}

/// Coordinates the similarity lookup and metadata enrichment
#[derive(Clone)]
pub struct RecommendationService {
    index: SimilarityIndex,
    fetcher: Arc<MetadataFetcher>,
}

impl RecommendationService {
    pub fn new(index: SimilarityIndex, fetcher: Arc<MetadataFetcher>) -> Self {
        Self { index, fetcher }
    }

    pub fn index(&self) -> &SimilarityIndex {
        &self.index
    }

    /// Similar movies without metadata
    pub fn recommend(&self, title: &str, limit: usize) -> Vec<CatalogEntry> {
        self.index.recommend(title, limit)
    }

    /// Display metadata for a single movie
    pub async fn fetch_details(&self, movie_id: MovieId) -> Arc<MovieDetails> {
        self.fetcher.fetch_details(movie_id).await
    }

    /// Main entry point: similar movies for `title`, enriched with metadata
    ///
    /// # Returns
    /// Recommendations in similarity order. Empty when the title is not in
    /// the catalog; failed metadata fetches show up as sentinel details.
    #[instrument(skip(self))]
    pub async fn get_recommendations(&self, title: &str, limit: usize) -> Vec<MovieRecommendation> {
        let start_time = Instant::now();

        let movies = self.index.recommend(title, limit);
        if movies.is_empty() {
            info!("No recommendations found");
            return Vec::new();
        }
        info!("Found {} similar movies", movies.len());

        let mut recommendations = Vec::with_capacity(movies.len());
        for (i, movie) in movies.into_iter().enumerate() {
            let details = self.fetcher.fetch_details(movie.id).await;
            recommendations.push(MovieRecommendation {
                rank: i + 1,
                movie,
                details,
            });
        }

        let failed = recommendations
            .iter()
            .filter(|r| r.details.is_error_sentinel())
            .count();
        info!(
            "Enriched {} recommendations ({} without metadata) in {:.2?}",
            recommendations.len(),
            failed,
            start_time.elapsed()
        );

        recommendations
    }
}
