//! Semantic tier: embedding similarity with a lazily loaded model.
//!
//! The model moves through an explicit state machine:
//!
//! ```text
//! Unloaded ──▶ Loading ──▶ Ready
//!                 │
//!                 ▼
//!              Failed ──(backoff elapsed, attempts left)──▶ Loading
//! ```
//!
//! Only one load runs at a time; concurrent searches wait for it. Once the
//! retry budget is spent the searcher stays fuzzy-only. Catalog vectors are
//! cached by search text and embedded in sequential batches, only for
//! entries not seen before.
//!
//! Every call to [`SemanticSearcher::search`] takes a generation number. A
//! call that finds a newer generation after one of its awaits returns
//! [`SearchOutcome::Superseded`] instead of stale results.

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use tracing::{debug, info, warn};

use super::embedder::{Embedder, EmbedderLoader, HttpEmbedderLoader, cosine_similarity};
use super::fuzzy::FuzzyIndex;
use super::{SearchError, SearchOutcome, SearchTier, Searchable};
use crate::config::SearchConfig;

/// Public view of the model state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelStatus {
    Unloaded,
    Loading,
    Ready,
    Failed,
}

enum ModelState {
    Unloaded,
    Loading { failures: u32 },
    Ready(Arc<dyn Embedder>),
    Failed { failures: u32, at: Instant },
}

pub struct SemanticSearcher {
    loader: Arc<dyn EmbedderLoader>,
    config: SearchConfig,
    state: Mutex<ModelState>,
    load_gate: tokio::sync::Mutex<()>,
    vectors: Mutex<HashMap<String, Vec<f32>>>,
    generation: AtomicU64,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SemanticSearcher {
    pub fn new(loader: Arc<dyn EmbedderLoader>, config: SearchConfig) -> Self {
        Self {
            loader,
            config,
            state: Mutex::new(ModelState::Unloaded),
            load_gate: tokio::sync::Mutex::new(()),
            vectors: Mutex::new(HashMap::new()),
            generation: AtomicU64::new(0),
        }
    }

    /// Searcher backed by the HTTP embedding endpoint from `config.model`.
    pub fn http(config: SearchConfig) -> Self {
        let loader = HttpEmbedderLoader::new(config.model.clone());
        Self::new(Arc::new(loader), config)
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn status(&self) -> ModelStatus {
        match *lock(&self.state) {
            ModelState::Unloaded => ModelStatus::Unloaded,
            ModelState::Loading { .. } => ModelStatus::Loading,
            ModelState::Ready(_) => ModelStatus::Ready,
            ModelState::Failed { .. } => ModelStatus::Failed,
        }
    }

    pub fn is_semantic_ready(&self) -> bool {
        self.status() == ModelStatus::Ready
    }

    pub fn is_semantic_loading(&self) -> bool {
        self.status() == ModelStatus::Loading
    }

    /// Number of catalog entries with a cached vector.
    pub fn cached_vectors(&self) -> usize {
        lock(&self.vectors).len()
    }

    /// Drop cached vectors, e.g. after the catalog was replaced.
    pub fn clear_vectors(&self) {
        lock(&self.vectors).clear();
    }

    // ========================================================================
    // MODEL STATE
    // ========================================================================

    fn ready_embedder(&self) -> Option<Arc<dyn Embedder>> {
        match &*lock(&self.state) {
            ModelState::Ready(embedder) => Some(Arc::clone(embedder)),
            _ => None,
        }
    }

    fn retry_allowed(&self) -> bool {
        match *lock(&self.state) {
            ModelState::Failed { failures, at } => {
                let retry = &self.config.retry;
                failures < retry.max_attempts && at.elapsed() >= retry.backoff_after(failures)
            }
            _ => true,
        }
    }

    /// Load the model if needed. `None` means the fuzzy tier must be used.
    async fn ensure_model(&self) -> Option<Arc<dyn Embedder>> {
        if let Some(embedder) = self.ready_embedder() {
            return Some(embedder);
        }
        if !self.retry_allowed() {
            return None;
        }

        let _gate = self.load_gate.lock().await;

        // the load may have finished while this call waited for the gate
        if let Some(embedder) = self.ready_embedder() {
            return Some(embedder);
        }
        if !self.retry_allowed() {
            return None;
        }

        let failures = {
            let mut state = lock(&self.state);
            let failures = match *state {
                ModelState::Failed { failures, .. } | ModelState::Loading { failures } => failures,
                _ => 0,
            };
            *state = ModelState::Loading { failures };
            failures
        };

        info!(attempt = failures + 1, "loading embedding model");
        match self.loader.load().await {
            Ok(embedder) => {
                *lock(&self.state) = ModelState::Ready(Arc::clone(&embedder));
                info!("embedding model ready");
                Some(embedder)
            }
            Err(e) => {
                let failures = failures + 1;
                warn!(error = %e, failures, "embedding model unavailable, using fuzzy search");
                *lock(&self.state) = ModelState::Failed {
                    failures,
                    at: Instant::now(),
                };
                None
            }
        }
    }

    // ========================================================================
    // SEARCH
    // ========================================================================

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    fn fuzzy<'a, T: Searchable>(&self, items: &'a [T], query: &str, max_results: usize) -> SearchOutcome<'a, T> {
        let hits = FuzzyIndex::new(items)
            .with_threshold(self.config.fuzzy_threshold)
            .search(query, max_results);
        SearchOutcome::Hits {
            tier: SearchTier::Fuzzy,
            items: hits,
        }
    }

    /// Rank `items` by similarity to `query`, falling back to fuzzy
    /// matching whenever the model or an embedding call fails.
    ///
    /// Entries scoring at or below `min_similarity` are left out, so a
    /// semantic result can hold fewer than `max_results` items. When no
    /// entry clears the floor the fuzzy tier answers instead.
    pub async fn search<'a, T: Searchable>(
        &self,
        items: &'a [T],
        query: &str,
        max_results: usize,
    ) -> SearchOutcome<'a, T> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if query.trim().is_empty() {
            return SearchOutcome::Hits {
                tier: SearchTier::Fuzzy,
                items: items.iter().take(max_results).collect(),
            };
        }

        let embedder = self.ensure_model().await;
        if !self.is_current(generation) {
            debug!(generation, "search superseded while loading model");
            return SearchOutcome::Superseded;
        }
        let Some(embedder) = embedder else {
            return self.fuzzy(items, query, max_results);
        };

        match self.rank(embedder.as_ref(), items, query, max_results, generation).await {
            Ok(outcome) => outcome,
            Err(e) => {
                if !self.is_current(generation) {
                    return SearchOutcome::Superseded;
                }
                warn!(error = %e, "semantic search failed, using fuzzy search");
                self.fuzzy(items, query, max_results)
            }
        }
    }

    async fn rank<'a, T: Searchable>(
        &self,
        embedder: &dyn Embedder,
        items: &'a [T],
        query: &str,
        max_results: usize,
        generation: u64,
    ) -> Result<SearchOutcome<'a, T>, SearchError> {
        let query_input = format!("{}{}", self.config.model.query_prefix, query.trim());
        let query_vector = embedder
            .embed(std::slice::from_ref(&query_input))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| SearchError::Embedding("no vector for query".into()))?;
        if !self.is_current(generation) {
            debug!(generation, "search superseded while embedding query");
            return Ok(SearchOutcome::Superseded);
        }

        let texts: Vec<String> = items.iter().map(Searchable::search_text).collect();
        if !self.embed_missing(embedder, &texts, generation).await? {
            debug!(generation, "search superseded while embedding catalog");
            return Ok(SearchOutcome::Superseded);
        }

        let mut scored: Vec<(usize, f32)> = {
            let vectors = lock(&self.vectors);
            texts
                .iter()
                .enumerate()
                .filter_map(|(i, text)| {
                    let score = cosine_similarity(&query_vector, vectors.get(text)?);
                    (score > self.config.min_similarity).then_some((i, score))
                })
                .collect()
        };
        if scored.is_empty() {
            debug!(
                min_similarity = self.config.min_similarity,
                "no entry above the similarity floor, using fuzzy search"
            );
            return Ok(self.fuzzy(items, query, max_results));
        }
        // stable: equal scores keep catalog order
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        Ok(SearchOutcome::Hits {
            tier: SearchTier::Semantic,
            items: scored
                .into_iter()
                .take(max_results)
                .map(|(i, _)| &items[i])
                .collect(),
        })
    }

    /// Embed texts without a cached vector, one batch at a time.
    /// Returns `false` if a newer search started in between.
    async fn embed_missing(
        &self,
        embedder: &dyn Embedder,
        texts: &[String],
        generation: u64,
    ) -> Result<bool, SearchError> {
        let missing: Vec<&String> = {
            let vectors = lock(&self.vectors);
            let mut seen = HashSet::new();
            texts
                .iter()
                .filter(|&t| !vectors.contains_key(t) && seen.insert(t.as_str()))
                .collect()
        };
        if missing.is_empty() {
            return Ok(true);
        }

        let batch_size = self.config.embed_batch_size.max(1);
        debug!(entries = missing.len(), batch_size, "embedding catalog entries");

        for batch in missing.chunks(batch_size) {
            let inputs: Vec<String> = batch
                .iter()
                .map(|t| format!("{}{}", self.config.model.passage_prefix, t))
                .collect();
            let embedded = embedder.embed(&inputs).await?;
            if embedded.len() != batch.len() {
                return Err(SearchError::Embedding(format!(
                    "expected {} vectors, got {}",
                    batch.len(),
                    embedded.len()
                )));
            }

            {
                let mut vectors = lock(&self.vectors);
                for (text, vector) in batch.iter().zip(embedded) {
                    vectors.insert((*text).clone(), vector);
                }
            }

            if !self.is_current(generation) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
