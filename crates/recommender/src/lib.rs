//! # Recommender Crate
//!
//! Content-based "more like this" lookups over a precomputed item-item
//! similarity matrix.
//!
//! ## Components
//!
//! - **recommender**: `Recommender`, the top-k lookup
//! - **config**: `RecommenderConfig` and the `SelfMatchPolicy`
//! - **types**: `Recommendation` and its display defaults
//! - **error**: `RecommendError`
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::DataIndex;
//! use recommender::Recommender;
//! use std::sync::Arc;
//!
//! let data_index = Arc::new(DataIndex::load_from_files("data/sample".as_ref())?);
//! let recommender = Recommender::new(data_index);
//!
//! for rec in recommender.recommend("Avatar")? {
//!     println!("{} ({:.2}%)", rec.title, rec.score);
//! }
//! ```
//!
//! The `DataIndex` is immutable once loaded, so one `Recommender` can be
//! cloned into as many threads as needed.

// Public modules
pub mod config;
pub mod error;
pub mod recommender;
pub mod types;

// Re-export commonly used types
pub use config::{DEFAULT_TOP_K, RecommenderConfig, SelfMatchPolicy};
pub use error::{RecommendError, Result};
pub use recommender::{Recommender, rank_row};
pub use types::{DEFAULT_GENRES, DEFAULT_OVERVIEW, Recommendation, to_percentage};

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{DataIndex, MovieRecord};
    use std::sync::Arc;

    #[test]
    fn test_recommender_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Recommender>();
    }

    #[test]
    fn test_empty_catalog_is_not_found() {
        let recommender = Recommender::new(Arc::new(DataIndex::default()));
        assert!(matches!(
            recommender.recommend("Anything"),
            Err(RecommendError::NotFound { .. })
        ));
    }

    #[test]
    fn test_single_movie_catalog() {
        let index = DataIndex::from_parts(vec![MovieRecord::new("Solo")], vec![vec![1.0]]).unwrap();
        let recommender = Recommender::new(Arc::new(index));

        assert!(recommender.recommend("Solo").unwrap().is_empty());
    }
}
