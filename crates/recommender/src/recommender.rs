//! Top-k lookup over the precomputed similarity matrix.
//!
//! ## Algorithm
//! 1. Resolve the title to its catalog position (first match)
//! 2. Pair every entry of that matrix row with its column index
//! 3. Stable sort by score descending, index ascending
//! 4. Remove the self-match according to [`SelfMatchPolicy`]
//! 5. Take the first k and attach catalog metadata

use crate::config::{RecommenderConfig, SelfMatchPolicy};
use crate::error::{RecommendError, Result};
use crate::types::Recommendation;
use data_loader::{DataIndex, MovieIndex};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Answers "what is similar to this movie?" from a loaded `DataIndex`.
///
/// Cheap to clone and safe to share across threads: the index is read-only.
#[derive(Debug, Clone)]
pub struct Recommender {
    /// Shared reference to the loaded artifacts (read-only, so no Mutex needed)
    data_index: Arc<DataIndex>,
    config: RecommenderConfig,
}

impl Recommender {
    /// Create a recommender with the default configuration
    pub fn new(data_index: Arc<DataIndex>) -> Self {
        Self::with_config(data_index, RecommenderConfig::default())
    }

    pub fn with_config(data_index: Arc<DataIndex>, config: RecommenderConfig) -> Self {
        Self { data_index, config }
    }

    /// Configure the default number of results (default: 5)
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.config.top_k = top_k;
        self
    }

    /// Configure how the self-match is removed (default: drop top-ranked)
    pub fn with_self_match(mut self, policy: SelfMatchPolicy) -> Self {
        self.config.self_match = policy;
        self
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    pub fn data_index(&self) -> &Arc<DataIndex> {
        &self.data_index
    }

    /// Top `config.top_k` movies most similar to `title`
    pub fn recommend(&self, title: &str) -> Result<Vec<Recommendation>> {
        self.recommend_k(title, self.config.top_k)
    }

    /// Top `k` movies most similar to `title`.
    ///
    /// Fails with `NotFound` if the title is not in the catalog. Returns fewer
    /// than `k` results only when the catalog has fewer than `k + 1` movies.
    #[instrument(skip(self))]
    pub fn recommend_k(&self, title: &str, k: usize) -> Result<Vec<Recommendation>> {
        let catalog = self.data_index.catalog();
        let not_found = || RecommendError::NotFound {
            title: title.to_string(),
        };

        let query_idx = catalog.position(title).ok_or_else(not_found)?;
        let row = self
            .data_index
            .similarity()
            .row(query_idx)
            .ok_or_else(not_found)?;

        let ranked = rank_row(row);
        let neighbors: Vec<(MovieIndex, f64)> = match self.config.self_match {
            SelfMatchPolicy::DropTopRanked => ranked.into_iter().skip(1).take(k).collect(),
            SelfMatchPolicy::ExcludeQueryIndex => ranked
                .into_iter()
                .filter(|&(idx, _)| idx != query_idx)
                .take(k)
                .collect(),
        };

        let recommendations: Vec<Recommendation> = neighbors
            .into_iter()
            .filter_map(|(idx, score)| {
                catalog
                    .get(idx)
                    .map(|record| Recommendation::from_record(idx, record, score))
            })
            .collect();

        debug!(
            "Recommended {} movies for {:?} (row {})",
            recommendations.len(),
            title,
            query_idx
        );
        Ok(recommendations)
    }
}

/// Pair each score with its column and sort best first.
///
/// Ties keep ascending index order so results are deterministic; `0.0` and
/// `-0.0` count as a tie. Rows are finite after `DataIndex::validate`.
pub fn rank_row(row: &[f64]) -> Vec<(MovieIndex, f64)> {
    let mut ranked: Vec<(MovieIndex, f64)> = row.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::MovieRecord;

    fn create_test_index() -> Arc<DataIndex> {
        let records = vec![
            MovieRecord::new("A"),
            MovieRecord::new("B"),
            MovieRecord::new("C"),
        ];
        let rows = vec![
            vec![1.0, 0.5, 0.2],
            vec![0.5, 1.0, 0.7],
            vec![0.2, 0.7, 1.0],
        ];
        Arc::new(DataIndex::from_parts(records, rows).unwrap())
    }

    #[test]
    fn test_rank_row_breaks_ties_by_index() {
        let ranked = rank_row(&[0.3, 0.9, 0.3, 1.0, 0.9]);
        let order: Vec<MovieIndex> = ranked.iter().map(|&(idx, _)| idx).collect();
        assert_eq!(order, vec![3, 1, 4, 0, 2]);
    }

    #[test]
    fn test_rank_row_signed_zeros_tie() {
        let ranked = rank_row(&[-0.0, 0.0, 0.5, -0.1]);
        let order: Vec<MovieIndex> = ranked.iter().map(|&(idx, _)| idx).collect();
        assert_eq!(order, vec![2, 0, 1, 3]);
    }

    #[test]
    fn test_rank_row_empty() {
        assert!(rank_row(&[]).is_empty());
    }

    #[test]
    fn test_recommend_basic() {
        let recommender = Recommender::new(create_test_index());

        let recs = recommender.recommend("A").unwrap();
        let titles: Vec<&str> = recs.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "C"]);
        assert_eq!(recs[0].score, 50.0);
        assert_eq!(recs[1].score, 20.0);
    }

    #[test]
    fn test_recommend_k_limits_results() {
        let recommender = Recommender::new(create_test_index());

        let recs = recommender.recommend_k("B", 1).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].title, "C");
        assert_eq!(recs[0].score, 70.0);

        assert!(recommender.recommend_k("B", 0).unwrap().is_empty());
    }

    #[test]
    fn test_with_top_k() {
        let recommender = Recommender::new(create_test_index()).with_top_k(1);
        assert_eq!(recommender.recommend("C").unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_title() {
        let recommender = Recommender::new(create_test_index());

        let err = recommender.recommend("Nonexistent Title 12345").unwrap_err();
        assert_eq!(
            err,
            RecommendError::NotFound {
                title: "Nonexistent Title 12345".to_string()
            }
        );
        // Titles match exactly
        assert!(recommender.recommend("a").is_err());
    }
}
