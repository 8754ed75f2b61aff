//! CatalogData building and validation.
//!
//! Turns a parsed artifact into the flat, validated in-memory form used for
//! lookups. Anything wrong with the artifact is reported here, once, at
//! startup.

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

impl CatalogData {
    /// Load the catalog and similarity matrix from a JSON artifact
    ///
    /// Steps:
    /// 1. Parse the artifact
    /// 2. Validate shape and scores
    /// 3. Flatten the matrix and build the id index
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading similarity artifact from {:?}", path);

        let artifact = parser::parse_artifact(path)?;
        let data = Self::from_parts(artifact.movies, artifact.similarity)?;

        let n = data.len();
        info!("Loaded {n} movies with a {n}x{n} similarity matrix");
        Ok(data)
    }

    /// Build from an in-memory catalog and matrix rows
    pub fn from_parts(entries: Vec<CatalogEntry>, rows: Vec<Vec<Score>>) -> Result<Self> {
        validate(&entries, &rows)?;

        let mut id_index = HashMap::with_capacity(entries.len());
        for (row, entry) in entries.iter().enumerate() {
            if id_index.insert(entry.id, row).is_some() {
                return Err(DataLoadError::DuplicateId { id: entry.id });
            }
        }

        let matrix: Vec<Score> = rows.into_iter().flatten().collect();
        debug!("Flattened similarity matrix into {} scores", matrix.len());

        Ok(Self {
            entries,
            matrix,
            id_index,
        })
    }
}

/// Validate data integrity
///
/// Check that:
/// - The catalog is not empty
/// - There is one matrix row per catalog entry
/// - Every row is as wide as the catalog
/// - Every score is finite and non-negative
fn validate(entries: &[CatalogEntry], rows: &[Vec<Score>]) -> Result<()> {
    if entries.is_empty() {
        return Err(DataLoadError::EmptyCatalog);
    }
    if rows.len() != entries.len() {
        return Err(DataLoadError::RowCountMismatch {
            rows: rows.len(),
            entries: entries.len(),
        });
    }

    let n = entries.len();
    match rows
        .par_iter()
        .enumerate()
        .find_map_first(|(row, scores)| validate_row(row, scores, n).err())
    {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn validate_row(row: usize, scores: &[Score], expected: usize) -> Result<()> {
    if scores.len() != expected {
        return Err(DataLoadError::ColumnCountMismatch {
            row,
            expected,
            found: scores.len(),
        });
    }
    for (column, &value) in scores.iter().enumerate() {
        if !value.is_finite() || value < 0.0 {
            return Err(DataLoadError::InvalidScore { row, column, value });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn three_entries() -> Vec<CatalogEntry> {
        vec![
            CatalogEntry::new(10, "EntryA"),
            CatalogEntry::new(20, "EntryB"),
            CatalogEntry::new(30, "EntryC"),
        ]
    }

    fn three_rows() -> Vec<Vec<Score>> {
        vec![
            vec![1.0, 0.8, 0.3],
            vec![0.8, 1.0, 0.5],
            vec![0.3, 0.5, 1.0],
        ]
    }

    #[test]
    fn test_from_parts() {
        let data = CatalogData::from_parts(three_entries(), three_rows()).unwrap();

        assert_eq!(data.len(), 3);
        assert_eq!(data.row(1), &[0.8, 1.0, 0.5]);
        assert_eq!(data.position_of_id(30), Some(2));
        assert_eq!(data.get_movie(20).unwrap().title, "EntryB");
        assert!(data.row(3).is_empty());
    }

    #[test]
    fn test_empty_catalog() {
        let err = CatalogData::from_parts(vec![], vec![]).unwrap_err();
        assert!(matches!(err, DataLoadError::EmptyCatalog));
    }

    #[test]
    fn test_row_count_mismatch() {
        let mut rows = three_rows();
        rows.pop();
        let err = CatalogData::from_parts(three_entries(), rows).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::RowCountMismatch { rows: 2, entries: 3 }
        ));
    }

    #[test]
    fn test_non_square_matrix() {
        let mut rows = three_rows();
        rows[1].push(0.1);
        let err = CatalogData::from_parts(three_entries(), rows).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::ColumnCountMismatch { row: 1, expected: 3, found: 4 }
        ));
    }

    #[test]
    fn test_invalid_scores() {
        let mut rows = three_rows();
        rows[2][0] = -0.1;
        let err = CatalogData::from_parts(three_entries(), rows).unwrap_err();
        assert!(matches!(err, DataLoadError::InvalidScore { row: 2, column: 0, .. }));

        let mut rows = three_rows();
        rows[0][1] = f32::NAN;
        let err = CatalogData::from_parts(three_entries(), rows).unwrap_err();
        assert!(matches!(err, DataLoadError::InvalidScore { row: 0, column: 1, .. }));
    }

    #[test]
    fn test_duplicate_ids() {
        let mut entries = three_entries();
        entries[2].id = 10;
        let err = CatalogData::from_parts(entries, three_rows()).unwrap_err();
        assert!(matches!(err, DataLoadError::DuplicateId { id: 10 }));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "data-loader-test-{}.json",
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{"movies":[{{"id":1,"title":"Up"}},{{"id":2,"title":"Cars"}}],
               "similarity":[[1.0,0.4],[0.4,1.0]]}}"#
        )
        .unwrap();
        drop(file);

        let data = CatalogData::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(data.len(), 2);
        assert_eq!(data.sorted_titles(), vec!["Cars", "Up"]);
    }
}
