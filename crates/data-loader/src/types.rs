//! Core domain types for the precomputed recommendation artifacts.
//!
//! The catalog and the similarity matrix are joined by position: row `i`
//! of the matrix describes the movie at position `i` of the catalog.
//! Both are built once and never mutated afterwards.

use crate::error::{DataLoadError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

// =============================================================================
// Type Aliases
// =============================================================================

/// Position of a movie in the catalog; doubles as the row/column into the matrix
pub type MovieIndex = usize;

// =============================================================================
// Movie Records
// =============================================================================

/// A single movie as produced by the offline data-preparation pipeline.
///
/// `genres` and `overview` are optional in the artifact; callers that need
/// a display value apply their own defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub title: String,
    #[serde(default)]
    pub genres: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
}

impl MovieRecord {
    /// Record with a title and no metadata
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            genres: None,
            overview: None,
        }
    }

    pub fn with_genres(mut self, genres: impl Into<String>) -> Self {
        self.genres = Some(genres.into());
        self
    }

    pub fn with_overview(mut self, overview: impl Into<String>) -> Self {
        self.overview = Some(overview.into());
        self
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Ordered sequence of movies with a title lookup.
///
/// Titles are expected to be unique. When they are not, the lookup keeps
/// the first position, which is what a linear scan for the title would find.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<MovieRecord>,
    title_index: HashMap<String, MovieIndex>,
}

impl Catalog {
    /// Build a catalog, indexing titles by first occurrence
    pub fn new(records: Vec<MovieRecord>) -> Self {
        let mut title_index = HashMap::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            if let Some(&first) = title_index.get(&record.title) {
                warn!(
                    "Duplicate title {:?} at position {} (lookups resolve to position {})",
                    record.title, idx, first
                );
                continue;
            }
            title_index.insert(record.title.clone(), idx);
        }
        Self {
            records,
            title_index,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get a movie by catalog position
    pub fn get(&self, idx: MovieIndex) -> Option<&MovieRecord> {
        self.records.get(idx)
    }

    /// Position of the first movie whose title matches exactly (case-sensitive)
    pub fn position(&self, title: &str) -> Option<MovieIndex> {
        self.title_index.get(title).copied()
    }

    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }

    /// All titles in catalog order
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.title.as_str())
    }

    /// Case-insensitive substring search over titles.
    ///
    /// Exact (case-insensitive) matches come first, then substring matches;
    /// within each group results keep catalog order.
    pub fn search(&self, query: &str, limit: usize) -> Vec<(MovieIndex, &MovieRecord)> {
        let query_lower = query.to_lowercase();
        let mut matches: Vec<(u8, MovieIndex, &MovieRecord)> = self
            .records
            .iter()
            .enumerate()
            .filter_map(|(idx, record)| {
                let title_lower = record.title.to_lowercase();
                if title_lower == query_lower {
                    Some((0, idx, record))
                } else if title_lower.contains(&query_lower) {
                    Some((1, idx, record))
                } else {
                    None
                }
            })
            .collect();

        matches.sort_by_key(|&(rank, idx, _)| (rank, idx));
        matches
            .into_iter()
            .take(limit)
            .map(|(_, idx, record)| (idx, record))
            .collect()
    }
}

// =============================================================================
// Similarity Matrix
// =============================================================================

/// Dense, square, row-major similarity table.
///
/// The diagonal is expected to hold the self-similarity but nothing here
/// relies on that, nor on symmetry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Build from a flat row-major buffer of `size * size` values
    pub fn from_flat(size: usize, values: Vec<f64>) -> Result<Self> {
        if values.len() != size * size {
            return Err(DataLoadError::ValidationError(format!(
                "expected {} values for a {}x{} matrix, found {}",
                size * size,
                size,
                size,
                values.len()
            )));
        }
        Ok(Self { size, values })
    }

    /// Build from nested rows, checking that the table is square
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let size = rows.len();
        let mut values = Vec::with_capacity(size * size);
        for row in rows {
            if row.len() != size {
                return Err(DataLoadError::DimensionMismatch {
                    expected: size,
                    rows: size,
                    cols: row.len(),
                });
            }
            values.extend(row);
        }
        Ok(Self { size, values })
    }

    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.size
    }

    /// Row `idx`, or `None` if out of range
    pub fn row(&self, idx: MovieIndex) -> Option<&[f64]> {
        if idx >= self.size {
            return None;
        }
        let start = idx * self.size;
        Some(&self.values[start..start + self.size])
    }

    pub fn get(&self, row: MovieIndex, col: MovieIndex) -> Option<f64> {
        self.row(row).and_then(|r| r.get(col).copied())
    }

    /// Iterate rows in order
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks(0) panics, and an empty matrix has no rows anyway
        self.values.chunks(self.size.max(1))
    }
}

// =============================================================================
// DataIndex - the loaded, read-only handle
// =============================================================================

/// Catalog plus similarity matrix, checked to line up.
///
/// This is the only thing the recommender needs. It is built once (see
/// [`DataIndex::load_from_files`]) and shared behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct DataIndex {
    pub(crate) catalog: Catalog,
    pub(crate) similarity: SimilarityMatrix,
}

impl DataIndex {
    /// Pair a catalog with its matrix, enforcing the N x N invariant
    pub fn new(catalog: Catalog, similarity: SimilarityMatrix) -> Result<Self> {
        if similarity.size() != catalog.len() {
            return Err(DataLoadError::DimensionMismatch {
                expected: catalog.len(),
                rows: similarity.size(),
                cols: similarity.size(),
            });
        }
        Ok(Self {
            catalog,
            similarity,
        })
    }

    /// Convenience constructor for in-memory data
    pub fn from_parts(records: Vec<MovieRecord>, rows: Vec<Vec<f64>>) -> Result<Self> {
        let index = Self::new(Catalog::new(records), SimilarityMatrix::from_rows(rows)?)?;
        index.validate()?;
        Ok(index)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    /// Number of movies
    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }
}
