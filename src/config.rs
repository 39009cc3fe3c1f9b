//! Configuration for the search engine.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};

/// Default cap on the number of documents returned by a ranked query.
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Relevance values closer than this are considered equal and ordered by rating.
pub const DEFAULT_RELEVANCE_EPSILON: f64 = 1e-6;

/// Default number of lock-protected shards in the relevance accumulator.
pub const DEFAULT_ACCUMULATOR_SHARDS: usize = 8;

/// Configuration for [`SearchEngine`](crate::search::engine::SearchEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchEngineConfig {
    /// Maximum number of documents returned by a ranked query.
    pub max_results: usize,

    /// Relevance difference under which two documents tie.
    pub relevance_epsilon: f64,

    /// Shard count of the accumulator used by parallel ranking.
    pub accumulator_shards: usize,

    /// Worker count of a dedicated thread pool for parallel execution.
    /// If None, the global rayon pool is used.
    pub thread_pool_size: Option<usize>,
}

impl Default for SearchEngineConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            relevance_epsilon: DEFAULT_RELEVANCE_EPSILON,
            accumulator_shards: DEFAULT_ACCUMULATOR_SHARDS,
            thread_pool_size: None,
        }
    }
}

impl SearchEngineConfig {
    /// Load a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the maximum number of results.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Set the relevance tie threshold.
    pub fn with_relevance_epsilon(mut self, epsilon: f64) -> Self {
        self.relevance_epsilon = epsilon;
        self
    }

    /// Set the accumulator shard count.
    pub fn with_accumulator_shards(mut self, shards: usize) -> Self {
        self.accumulator_shards = shards;
        self
    }

    /// Use a dedicated thread pool of the given size.
    pub fn with_thread_pool_size(mut self, size: usize) -> Self {
        self.thread_pool_size = Some(size);
        self
    }

    /// Use a dedicated thread pool with one worker per logical CPU.
    pub fn with_dedicated_thread_pool(mut self) -> Self {
        self.thread_pool_size = Some(num_cpus::get());
        self
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<()> {
        if self.max_results == 0 {
            return Err(SearchError::invalid_config("max_results must be positive"));
        }
        if !(self.relevance_epsilon >= 0.0) {
            return Err(SearchError::invalid_config(format!(
                "relevance_epsilon must be a non-negative number, got {}",
                self.relevance_epsilon
            )));
        }
        if self.accumulator_shards == 0 {
            return Err(SearchError::invalid_config(
                "accumulator_shards must be positive",
            ));
        }
        if self.thread_pool_size == Some(0) {
            return Err(SearchError::invalid_config(
                "thread_pool_size must be positive when set",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SearchEngineConfig::default();
        assert_eq!(config.max_results, 5);
        assert_eq!(config.relevance_epsilon, 1e-6);
        assert_eq!(config.accumulator_shards, 8);
        assert_eq!(config.thread_pool_size, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = SearchEngineConfig::default()
            .with_max_results(10)
            .with_relevance_epsilon(1e-3)
            .with_accumulator_shards(16)
            .with_thread_pool_size(2);

        assert_eq!(config.max_results, 10);
        assert_eq!(config.relevance_epsilon, 1e-3);
        assert_eq!(config.accumulator_shards, 16);
        assert_eq!(config.thread_pool_size, Some(2));
    }

    #[test]
    fn test_dedicated_thread_pool() {
        let config = SearchEngineConfig::default().with_dedicated_thread_pool();
        assert_eq!(config.thread_pool_size, Some(num_cpus::get()));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = SearchEngineConfig::from_json(r#"{ "max_results": 3 }"#).unwrap();
        assert_eq!(config.max_results, 3);
        assert_eq!(config.accumulator_shards, DEFAULT_ACCUMULATOR_SHARDS);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(matches!(
            SearchEngineConfig::default().with_max_results(0).validate(),
            Err(SearchError::InvalidConfig(_))
        ));
        assert!(matches!(
            SearchEngineConfig::default()
                .with_relevance_epsilon(f64::NAN)
                .validate(),
            Err(SearchError::InvalidConfig(_))
        ));
        assert!(matches!(
            SearchEngineConfig::default()
                .with_accumulator_shards(0)
                .validate(),
            Err(SearchError::InvalidConfig(_))
        ));
        assert!(matches!(
            SearchEngineConfig::from_json(r#"{ "thread_pool_size": 0 }"#),
            Err(SearchError::InvalidConfig(_))
        ));
        assert!(matches!(
            SearchEngineConfig::from_json("{"),
            Err(SearchError::Json(_))
        ));
    }
}
