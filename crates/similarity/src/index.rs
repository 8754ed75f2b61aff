//! Similarity Index - content-based nearest neighbours
//!
//! Answers "which movies are most similar to this one?" from the
//! precomputed similarity matrix.
//!
//! ## Algorithm
//! 1. Find the query movie's row (first exact title match, or by id)
//! 2. Pair every column with its score
//! 3. Select the top `k + 1` by score descending, ties by ascending row
//! 4. Drop the query's own row
//! 5. Take the first `k`

use crate::types::ScoredEntry;
use data_loader::{CatalogData, CatalogEntry, MovieId};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Top-K lookup over a shared, read-only catalog
#[derive(Clone)]
pub struct SimilarityIndex {
    /// Shared reference to the catalog (read-only, so no Mutex needed)
    catalog: Arc<CatalogData>,
}

impl SimilarityIndex {
    pub fn new(catalog: Arc<CatalogData>) -> Self {
        Self { catalog }
    }

    /// Read-only access to the underlying catalog
    pub fn catalog(&self) -> &CatalogData {
        &self.catalog
    }

    /// Recommend `k` movies similar to `title`.
    ///
    /// `title` must match a catalog title exactly. An unknown title yields an
    /// empty vec; that is a normal outcome, not an error. When several
    /// entries share the title, the first one in catalog order is used.
    pub fn recommend(&self, title: &str, k: usize) -> Vec<CatalogEntry> {
        self.recommend_scored(title, k)
            .into_iter()
            .map(|scored| scored.entry)
            .collect()
    }

    /// Like [`recommend`](Self::recommend) but keeps the similarity scores
    #[instrument(skip(self))]
    pub fn recommend_scored(&self, title: &str, k: usize) -> Vec<ScoredEntry> {
        match self.catalog.position_of_title(title) {
            Some(row) => self.neighbours_of_row(row, k),
            None => {
                debug!("Title not in catalog");
                Vec::new()
            }
        }
    }

    /// Recommend `k` movies similar to the movie with the given id.
    ///
    /// Unlike title lookup this is unambiguous.
    #[instrument(skip(self))]
    pub fn recommend_by_id(&self, id: MovieId, k: usize) -> Vec<CatalogEntry> {
        match self.catalog.position_of_id(id) {
            Some(row) => self
                .neighbours_of_row(row, k)
                .into_iter()
                .map(|scored| scored.entry)
                .collect(),
            None => {
                debug!("Movie id not in catalog");
                Vec::new()
            }
        }
    }

    fn neighbours_of_row(&self, row: usize, k: usize) -> Vec<ScoredEntry> {
        let mut scores: Vec<(usize, f32)> = self
            .catalog
            .row(row)
            .iter()
            .copied()
            .enumerate()
            .collect();

        // Only the top k + 1 can survive once the query row is dropped
        if k == 0 || scores.is_empty() {
            return Vec::new();
        }
        let keep = k.saturating_add(1).min(scores.len());
        if keep < scores.len() {
            scores.select_nth_unstable_by(keep - 1, by_rank);
            scores.truncate(keep);
        }
        scores.sort_unstable_by(by_rank);

        let neighbours: Vec<ScoredEntry> = scores
            .into_iter()
            .filter(|&(column, _)| column != row)
            .take(k)
            .filter_map(|(column, score)| {
                self.catalog.entry(column).map(|entry| ScoredEntry {
                    entry: entry.clone(),
                    score,
                    row: column,
                })
            })
            .collect();

        debug!("Found {} neighbours for row {}", neighbours.len(), row);
        neighbours
    }
}

/// Score descending, then row ascending. A total order, so partial
/// selection and a full sort agree.
fn by_rank(a: &(usize, f32), b: &(usize, f32)) -> Ordering {
    b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::Score;

    fn create_test_index(titles: &[&str], rows: Vec<Vec<Score>>) -> SimilarityIndex {
        let entries = titles
            .iter()
            .enumerate()
            .map(|(i, title)| CatalogEntry::new(100 + i as MovieId, *title))
            .collect();
        let catalog = CatalogData::from_parts(entries, rows).unwrap();
        SimilarityIndex::new(Arc::new(catalog))
    }

    fn three_entry_index() -> SimilarityIndex {
        create_test_index(
            &["EntryA", "EntryB", "EntryC"],
            vec![
                vec![1.0, 0.8, 0.3],
                vec![0.8, 1.0, 0.5],
                vec![0.3, 0.5, 1.0],
            ],
        )
    }

    #[test]
    fn test_recommend_orders_by_similarity() {
        let index = three_entry_index();

        let titles: Vec<String> = index
            .recommend("EntryA", 2)
            .into_iter()
            .map(|e| e.title)
            .collect();

        assert_eq!(titles, vec!["EntryB", "EntryC"]);
    }

    #[test]
    fn test_unknown_title_is_empty() {
        let index = three_entry_index();

        assert!(index.recommend("Nope", 10).is_empty());
        assert!(index.recommend("entrya", 10).is_empty());
    }

    #[test]
    fn test_length_is_capped_by_catalog() {
        let index = three_entry_index();

        assert_eq!(index.recommend("EntryB", 10).len(), 2);
        assert_eq!(index.recommend("EntryB", 1).len(), 1);
        assert!(index.recommend("EntryB", 0).is_empty());
    }

    #[test]
    fn test_ties_break_by_row() {
        let index = create_test_index(
            &["Q", "W", "E", "R"],
            vec![
                vec![0.5, 0.9, 0.5, 0.5],
                vec![0.9, 1.0, 0.2, 0.2],
                vec![0.5, 0.2, 1.0, 0.4],
                vec![0.5, 0.2, 0.4, 1.0],
            ],
        );

        let rows: Vec<usize> = index.recommend_scored("Q", 3).iter().map(|s| s.row).collect();
        assert_eq!(rows, vec![1, 2, 3]);
    }

    #[test]
    fn test_self_is_dropped_even_when_not_top() {
        // Row 0 scores another movie above itself
        let index = create_test_index(
            &["X", "Y", "Z"],
            vec![
                vec![0.7, 0.9, 0.1],
                vec![0.9, 1.0, 0.1],
                vec![0.1, 0.1, 1.0],
            ],
        );

        let titles: Vec<String> = index.recommend("X", 5).into_iter().map(|e| e.title).collect();
        assert_eq!(titles, vec!["Y", "Z"]);
    }

    #[test]
    fn test_duplicate_title_uses_first_row() {
        let index = create_test_index(
            &["Dup", "Other", "Dup"],
            vec![
                vec![1.0, 0.1, 0.9],
                vec![0.1, 1.0, 0.2],
                vec![0.9, 0.2, 1.0],
            ],
        );

        let scored = index.recommend_scored("Dup", 2);
        assert_eq!(scored[0].row, 2);
        assert_eq!(scored[1].row, 1);
    }

    #[test]
    fn test_partial_selection_matches_full_sort() {
        let n = 40;
        let titles: Vec<String> = (0..n).map(|i| format!("T{}", i)).collect();
        let title_refs: Vec<&str> = titles.iter().map(String::as_str).collect();
        let rows = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| if i == j { 0.5 } else { ((i * 3 + j * 5) % 6) as Score / 10.0 })
                    .collect()
            })
            .collect();
        let index = create_test_index(&title_refs, rows);

        for row in 0..n {
            let mut expected: Vec<(usize, f32)> =
                index.catalog().row(row).iter().copied().enumerate().collect();
            expected.sort_by(by_rank);
            let expected: Vec<usize> = expected
                .into_iter()
                .map(|(column, _)| column)
                .filter(|&column| column != row)
                .collect();

            for k in [1, 3, 7, n - 1, n + 5] {
                let rows: Vec<usize> = index
                    .recommend_scored(&titles[row], k)
                    .iter()
                    .map(|s| s.row)
                    .collect();
                assert_eq!(rows, expected[..k.min(n - 1)], "row {} k {}", row, k);
            }
        }
    }

    #[test]
    fn test_recommend_by_id() {
        let index = three_entry_index();

        let ids: Vec<MovieId> = index.recommend_by_id(102, 2).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![101, 100]);
        assert!(index.recommend_by_id(999, 2).is_empty());
    }
}
