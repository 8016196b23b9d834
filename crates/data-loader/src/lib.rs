//! # Data Loader Crate
//!
//! This crate loads the precomputed artifacts behind the recommender: the
//! movie catalog and the dense item-item similarity matrix.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (MovieRecord, Catalog, SimilarityMatrix, DataIndex)
//! - **parser**: Read the JSON / binary artifacts into those types
//! - **index**: Load, join and validate everything into a `DataIndex`
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::DataIndex;
//! use std::path::Path;
//!
//! let index = DataIndex::load_from_files(Path::new("data/sample"))?;
//!
//! let idx = index.catalog().position("Avatar").unwrap();
//! let row = index.similarity().row(idx).unwrap();
//!
//! println!("{} movies, {} scores for Avatar", index.len(), row.len());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use index::{CATALOG_FILE, MATRIX_FILES};
pub use parser::MatrixFormat;
pub use types::{Catalog, DataIndex, MovieIndex, MovieRecord, SimilarityMatrix};
