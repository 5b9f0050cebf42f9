//! # Search Configuration
//!
//! Tunables for product search. Layout geometry, field limits and DPI are
//! not configurable: they must match the backend exactly.
//!
//! ```
//! use kleykod_label::config::SearchConfig;
//!
//! let config: SearchConfig = serde_json::from_str(r#"{ "embed_batch_size": 8 }"#).unwrap();
//! assert_eq!(config.embed_batch_size, 8);
//! assert_eq!(config.retry.max_attempts, 3);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::LabelError;

/// Embedding model endpoint (OpenAI-compatible `/embeddings`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub endpoint: String,
    pub model: String,
    pub timeout_secs: u64,
    /// Prepended to queries (e5-family models expect `"query: "`).
    pub query_prefix: String,
    /// Prepended to catalog entries (e5-family models expect `"passage: "`).
    pub passage_prefix: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8088/v1/embeddings".to_string(),
            model: "multilingual-e5-small".to_string(),
            timeout_secs: 20,
            query_prefix: "query: ".to_string(),
            passage_prefix: "passage: ".to_string(),
        }
    }
}

impl ModelConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// How often a failed model load may be retried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Load attempts before giving up for the searcher's lifetime.
    pub max_attempts: u32,
    /// Wait before the first retry; doubles after each failure.
    pub backoff_secs: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_secs: 30,
        }
    }
}

impl RetryPolicy {
    /// Wait required after `failures` consecutive failed attempts.
    pub fn backoff_after(&self, failures: u32) -> Duration {
        let exponent = failures.saturating_sub(1).min(16);
        Duration::from_secs(self.backoff_secs.saturating_mul(1u64 << exponent))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Highest normalized edit distance still counted as a fuzzy match
    /// (0 = exact substring, 1 = anything).
    pub fuzzy_threshold: f64,
    /// Catalog entries embedded per model call.
    pub embed_batch_size: usize,
    /// Semantic hits scoring at or below this cosine similarity are dropped.
    /// When none remain, the search answers from the fuzzy tier.
    pub min_similarity: f32,
    pub retry: RetryPolicy,
    pub model: ModelConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: 0.4,
            embed_batch_size: 16,
            min_similarity: 0.0,
            retry: RetryPolicy::default(),
            model: ModelConfig::default(),
        }
    }
}

impl SearchConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, LabelError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.embed_batch_size, 16);
        assert_eq!(config.model.query_prefix, "query: ");
    }

    #[test]
    fn test_backoff_doubles() {
        let policy = RetryPolicy {
            max_attempts: 5,
            backoff_secs: 10,
        };
        assert_eq!(policy.backoff_after(1), Duration::from_secs(10));
        assert_eq!(policy.backoff_after(2), Duration::from_secs(20));
        assert_eq!(policy.backoff_after(4), Duration::from_secs(80));
    }

    #[test]
    fn test_partial_nested_json() {
        let config: SearchConfig =
            serde_json::from_str(r#"{ "model": { "model": "e5-base" }, "retry": { "max_attempts": 1 } }"#)
                .unwrap();
        assert_eq!(config.model.model, "e5-base");
        assert_eq!(config.model.timeout_secs, 20);
        assert_eq!(config.retry.max_attempts, 1);
        assert_eq!(config.retry.backoff_secs, 30);
    }
}
