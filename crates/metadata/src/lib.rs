//! Movie metadata for display, fetched from The Movie Database (TMDB).
//!
//! This crate provides:
//! - `TmdbClient`: one HTTP GET per movie against TMDB's details endpoint
//! - `MovieDetails`: the normalized record (poster URL, title, overview,
//!   rating, year)
//! - `MetadataFetcher`: a per-id cache in front of any `DetailsProvider` that
//!   turns every failure into a sentinel record
//!
//! ## Example Usage
//! ```ignore
//! use metadata::{MetadataConfig, MetadataFetcher};
//!
//! let fetcher = MetadataFetcher::tmdb(&MetadataConfig::new(api_key))?;
//! let details = fetcher.fetch_details(19995).await;
//! println!("{} ({}) - {}", details.title, details.year, details.rating);
//! ```

pub mod config;
pub mod details;
pub mod error;
pub mod fetcher;
pub mod provider;

// Re-export main types
pub use config::MetadataConfig;
pub use details::{MovieDetails, Rating, TmdbMovie};
pub use error::{MetadataError, Result};
pub use fetcher::MetadataFetcher;
pub use provider::{DetailsProvider, TmdbClient};
