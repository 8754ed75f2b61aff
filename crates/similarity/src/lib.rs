//! # Similarity Crate
//!
//! Content-based "more like this" recommendations over a precomputed
//! similarity matrix.
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::CatalogData;
//! use similarity::{SimilarityIndex, DEFAULT_RECOMMENDATIONS};
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(CatalogData::load_from_file("data/movie_data.json".as_ref())?);
//! let index = SimilarityIndex::new(catalog);
//!
//! for movie in index.recommend("Avatar", DEFAULT_RECOMMENDATIONS) {
//!     println!("{} ({})", movie.title, movie.id);
//! }
//! ```
//!
//! Lookups never mutate anything, so a `SimilarityIndex` can be cloned
//! freely and shared between tasks.

// Public modules
pub mod types;
pub mod index;

// Re-export commonly used types
pub use index::SimilarityIndex;
pub use types::{DEFAULT_RECOMMENDATIONS, ScoredEntry};
