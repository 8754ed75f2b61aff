//! # Data Loader Crate
//!
//! Loads the movie catalog and its precomputed similarity matrix.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (CatalogEntry, CatalogData)
//! - **parser**: Deserialize the JSON artifact
//! - **index**: Validate the artifact and build the in-memory form
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::CatalogData;
//! use std::path::Path;
//!
//! let catalog = CatalogData::load_from_file(Path::new("data/movie_data.json"))?;
//!
//! let row = catalog.position_of_title("Avatar").unwrap();
//! println!("{} has {} similarity scores", catalog.entry(row).unwrap().title, catalog.row(row).len());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{CatalogData, CatalogEntry, MovieId, Score};
