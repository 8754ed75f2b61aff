//! Core domain types for the movie catalog.
//!
//! The catalog and its similarity matrix are loaded once at startup and are
//! never mutated afterwards. Callers share a `CatalogData` behind an `Arc`
//! and only ever see it through the read-only accessors below.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Stable identifier of a movie (the TMDB movie id)
pub type MovieId = u32;

/// Similarity score between two catalog rows
pub type Score = f32;

// =============================================================================
// Catalog Types
// =============================================================================

/// One movie in the catalog.
///
/// Titles are not guaranteed unique; `id` is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: MovieId,
    pub title: String,
}

impl CatalogEntry {
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

// =============================================================================
// CatalogData - catalog plus similarity matrix
// =============================================================================

/// The fixed catalog together with its precomputed pairwise similarity matrix.
///
/// The matrix is stored flat, row-major, `len() * len()` scores. Row `i`
/// holds the similarity of catalog entry `i` to every other entry.
#[derive(Debug)]
pub struct CatalogData {
    pub(crate) entries: Vec<CatalogEntry>,
    pub(crate) matrix: Vec<Score>,
    /// Row position of each movie id
    pub(crate) id_index: HashMap<MovieId, usize>,
}

impl CatalogData {
    /// Number of catalog entries (and matrix rows/columns)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All catalog entries in row order
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Get the entry at a matrix row
    pub fn entry(&self, row: usize) -> Option<&CatalogEntry> {
        self.entries.get(row)
    }

    /// Get a full similarity row
    ///
    /// Returns an empty slice for an out-of-range row.
    pub fn row(&self, row: usize) -> &[Score] {
        let n = self.len();
        if row >= n {
            return &[];
        }
        &self.matrix[row * n..(row + 1) * n]
    }

    /// Row of the first entry whose title matches exactly (byte-exact,
    /// case-sensitive). Duplicate titles resolve to the lowest row.
    pub fn position_of_title(&self, title: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.title == title)
    }

    /// Row of the entry with the given id
    pub fn position_of_id(&self, id: MovieId) -> Option<usize> {
        self.id_index.get(&id).copied()
    }

    /// Get an entry by movie id
    pub fn get_movie(&self, id: MovieId) -> Option<&CatalogEntry> {
        self.position_of_id(id).and_then(|row| self.entry(row))
    }

    /// Every title in the catalog, sorted, for building a title picker
    pub fn sorted_titles(&self) -> Vec<&str> {
        let mut titles: Vec<&str> = self.entries.iter().map(|e| e.title.as_str()).collect();
        titles.sort_unstable();
        titles
    }
}
