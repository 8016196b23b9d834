//! Recommender settings.

/// Number of recommendations returned by default
pub const DEFAULT_TOP_K: usize = 5;

/// Which entry of the ranked row counts as the query movie itself.
///
/// With a well-formed matrix the query's self-similarity is the unique row
/// maximum and both policies agree. They differ when another movie ties or
/// beats the diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelfMatchPolicy {
    /// Drop whatever ranks first, assuming it is the query.
    #[default]
    DropTopRanked,
    /// Drop the query's own index wherever it ranks.
    ExcludeQueryIndex,
}

/// Tunable knobs for [`crate::Recommender`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommenderConfig {
    pub top_k: usize,
    pub self_match: SelfMatchPolicy,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            self_match: SelfMatchPolicy::default(),
        }
    }
}

impl RecommenderConfig {
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_self_match(mut self, policy: SelfMatchPolicy) -> Self {
        self.self_match = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RecommenderConfig::default();
        assert_eq!(config.top_k, 5);
        assert_eq!(config.self_match, SelfMatchPolicy::DropTopRanked);
    }

    #[test]
    fn test_builder() {
        let config = RecommenderConfig::default()
            .with_top_k(10)
            .with_self_match(SelfMatchPolicy::ExcludeQueryIndex);
        assert_eq!(config.top_k, 10);
        assert_eq!(config.self_match, SelfMatchPolicy::ExcludeQueryIndex);
    }
}
