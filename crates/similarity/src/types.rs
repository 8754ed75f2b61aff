//! Result types for similarity lookups.

use data_loader::{CatalogEntry, Score};

/// Number of recommendations returned when the caller does not ask for a
/// specific count
pub const DEFAULT_RECOMMENDATIONS: usize = 10;

/// A catalog entry paired with its similarity to the query movie
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredEntry {
    pub entry: CatalogEntry,
    pub score: Score,
    /// Row of this entry in the catalog
    pub row: usize,
}
