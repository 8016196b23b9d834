//! DataIndex loading and validation.
//!
//! Loading is the only I/O in the whole system. It runs once, before any
//! query, and produces an immutable `DataIndex`:
//! 1. Parse the catalog and the matrix in parallel
//! 2. Check the N x N invariant
//! 3. Reject non-finite similarity values

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::info;

/// Catalog file name inside a data directory
pub const CATALOG_FILE: &str = "movies.json";

/// Matrix file names inside a data directory, in lookup order
pub const MATRIX_FILES: [&str; 2] = ["similarity.bin", "similarity.json"];

impl DataIndex {
    /// Load both artifacts from a directory
    ///
    /// Expects `movies.json` plus `similarity.bin` or `similarity.json`
    /// (the binary matrix wins when both exist).
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        info!("Loading artifacts from {:?}", data_dir);

        let catalog_path = data_dir.join(CATALOG_FILE);
        let matrix_path = find_matrix(data_dir)?;

        Self::load(&catalog_path, &matrix_path)
    }

    /// Load from explicit paths; the matrix format follows its extension
    pub fn load(catalog_path: &Path, matrix_path: &Path) -> Result<Self> {
        // The two artifacts are independent, so parse them side by side
        let (records, matrix) = rayon::join(
            || parser::parse_catalog(catalog_path),
            || parser::parse_matrix(matrix_path),
        );
        let records = records?;
        let matrix = matrix?;

        info!(
            "Parsed {} movies and a {}x{} similarity matrix",
            records.len(),
            matrix.size(),
            matrix.size()
        );

        let index = DataIndex::new(Catalog::new(records), matrix)?;
        index.validate()?;

        info!("DataIndex successfully built and validated");
        Ok(index)
    }

    /// Validate data integrity
    ///
    /// Every similarity value must be finite so that ranking is a total order.
    /// Dimensions are already checked by [`DataIndex::new`].
    pub fn validate(&self) -> Result<()> {
        // Earliest bad cell wins, whatever the thread scheduling
        let bad = (0..self.similarity.size())
            .into_par_iter()
            .find_map_first(|row_idx| {
                let row = self.similarity.row(row_idx)?;
                row.iter()
                    .position(|v| !v.is_finite())
                    .map(|col_idx| (row_idx, col_idx, row[col_idx]))
            });

        match bad {
            Some((row, col, value)) => Err(DataLoadError::InvalidValue {
                field: format!("similarity[{}][{}]", row, col),
                value: value.to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// First matrix artifact present in `data_dir`
fn find_matrix(data_dir: &Path) -> Result<PathBuf> {
    MATRIX_FILES
        .iter()
        .map(|name| data_dir.join(name))
        .find(|path| path.exists())
        .ok_or_else(|| DataLoadError::FileNotFound {
            path: data_dir.join(MATRIX_FILES[1]).display().to_string(),
        })
}
