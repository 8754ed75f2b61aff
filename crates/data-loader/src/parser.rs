//! Parser for the precomputed similarity artifact.
//!
//! The artifact is a single JSON document holding both the catalog and the
//! matrix:
//!
//! ```text
//! {
//!   "movies":     [{"id": 19995, "title": "Avatar"}, ...],
//!   "similarity": [[1.0, 0.12, ...], ...]
//! }
//! ```
//!
//! Parsing only checks the document shape; `index` validates the contents.

use crate::error::{DataLoadError, Result};
use crate::types::{CatalogEntry, Score};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Raw artifact as it appears on disk
#[derive(Debug, Deserialize)]
pub struct SimilarityArtifact {
    pub movies: Vec<CatalogEntry>,
    pub similarity: Vec<Vec<Score>>,
}

/// Read and deserialize the artifact at `path`
pub fn parse_artifact(path: &Path) -> Result<SimilarityArtifact> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|e| DataLoadError::ParseError {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Deserialize an artifact already held in memory
pub fn parse_artifact_str(source: &str) -> Result<SimilarityArtifact> {
    serde_json::from_str(source).map_err(|e| DataLoadError::ParseError {
        file: "<memory>".to_string(),
        reason: e.to_string(),
    })
}
