//! # Product Search
//!
//! Two tiers for the product-card picker:
//!
//! | Tier | Availability | Matching |
//! |------|--------------|----------|
//! | [`fuzzy`] | always, synchronous | typo-tolerant substring match |
//! | [`semantic`] | after the embedding model loads | cosine similarity of embeddings |
//!
//! The semantic tier never fails outward: any model or embedding error falls
//! back to the fuzzy tier for the same query.

pub mod embedder;
pub mod fuzzy;
pub mod semantic;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use embedder::{
    Embedder, EmbedderLoader, HttpEmbedderLoader, check_model, cosine_similarity,
};
pub use fuzzy::{FuzzyIndex, fuzzy_search};
pub use semantic::{ModelStatus, SemanticSearcher};

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Embedding model failed to load: {0}")]
    ModelLoad(String),

    #[error("Embedding failed: {0}")]
    Embedding(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Anything the picker can search.
pub trait Searchable {
    /// Text matched against queries: every searchable attribute, joined.
    fn search_text(&self) -> String;
}

/// Product card as shown in the picker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductCard {
    pub name: String,
    pub article: String,
    pub barcode: String,
    pub size: String,
    pub color: String,
    pub brand: String,
}

impl Searchable for ProductCard {
    fn search_text(&self) -> String {
        [
            &self.name,
            &self.article,
            &self.barcode,
            &self.size,
            &self.color,
            &self.brand,
        ]
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

/// Which tier produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchTier {
    Fuzzy,
    Semantic,
}

/// Result of a semantic search call.
#[derive(Debug, PartialEq)]
pub enum SearchOutcome<'a, T> {
    Hits { tier: SearchTier, items: Vec<&'a T> },
    /// A newer search started while this one was waiting; drop the result.
    Superseded,
}

impl<'a, T> SearchOutcome<'a, T> {
    pub fn items(&self) -> Option<&[&'a T]> {
        match self {
            Self::Hits { items, .. } => Some(items),
            Self::Superseded => None,
        }
    }

    pub fn tier(&self) -> Option<SearchTier> {
        match self {
            Self::Hits { tier, .. } => Some(*tier),
            Self::Superseded => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_search_text_skips_empty() {
        let card = ProductCard {
            name: "Кроссовки".into(),
            article: " RUN-1 ".into(),
            color: "синий".into(),
            ..Default::default()
        };
        assert_eq!(card.search_text(), "Кроссовки RUN-1 синий");
    }
}
