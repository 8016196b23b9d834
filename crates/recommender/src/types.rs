//! Result types handed to the presentation layer.

use data_loader::{MovieIndex, MovieRecord};
use serde::Serialize;

/// Shown when a movie has no genres
pub const DEFAULT_GENRES: &str = "N/A";

/// Shown when a movie has no overview
pub const DEFAULT_OVERVIEW: &str = "No overview available";

/// One recommended movie.
///
/// `score` is the raw similarity as a percentage rounded to 2 decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    #[serde(skip)]
    pub movie_index: MovieIndex,
    pub title: String,
    pub score: f64,
    pub genres: String,
    pub overview: String,
}

impl Recommendation {
    /// Build from a catalog record and its raw similarity to the query
    pub fn from_record(movie_index: MovieIndex, record: &MovieRecord, similarity: f64) -> Self {
        Self {
            movie_index,
            title: record.title.clone(),
            score: to_percentage(similarity),
            genres: record
                .genres
                .clone()
                .unwrap_or_else(|| DEFAULT_GENRES.to_string()),
            overview: record
                .overview
                .clone()
                .unwrap_or_else(|| DEFAULT_OVERVIEW.to_string()),
        }
    }

    /// First `max_chars` characters of the overview followed by "..."
    pub fn overview_snippet(&self, max_chars: usize) -> String {
        let end = self
            .overview
            .char_indices()
            .nth(max_chars)
            .map(|(byte_idx, _)| byte_idx)
            .unwrap_or(self.overview.len());
        format!("{}...", &self.overview[..end])
    }
}

/// Scale a similarity to a percentage with 2 decimals.
///
/// Rounds the exact binary value of `similarity * 100`, so 0.79735 gives
/// 79.73 (the product sits just below 79.735).
pub fn to_percentage(similarity: f64) -> f64 {
    let scaled = similarity * 100.0;
    format!("{:.2}", scaled).parse().unwrap_or(scaled)
}
