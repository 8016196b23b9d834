//! Query-time errors.

use thiserror::Error;

/// The only way a lookup can fail.
///
/// An unknown title is an error, never an empty result, so callers can tell
/// "not in the catalog" apart from "nothing similar".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecommendError {
    #[error("Movie {title:?} not found in catalog")]
    NotFound { title: String },
}

pub type Result<T> = std::result::Result<T, RecommendError>;
