//! Embedding model access.
//!
//! The model is reached through two traits so the semantic tier can be
//! exercised without a network: an [`EmbedderLoader`] produces an
//! [`Embedder`] once, and the embedder turns batches of text into vectors.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use super::SearchError;
use crate::config::ModelConfig;
use crate::error::LabelError;

/// Turns text into embedding vectors, one per input, in input order.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, SearchError>;
}

/// Loads the embedding model. Called lazily, at most once per attempt.
#[async_trait]
pub trait EmbedderLoader: Send + Sync {
    async fn load(&self) -> Result<Arc<dyn Embedder>, SearchError>;
}

/// Cosine similarity of two vectors.
///
/// Mismatched lengths, empty input and zero vectors score 0 rather than NaN
/// so ranking stays total.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denominator = norm_a.sqrt() * norm_b.sqrt();
    if denominator == 0.0 {
        return 0.0;
    }
    let similarity = dot / denominator;
    if similarity.is_finite() { similarity } else { 0.0 }
}

// ============================================================================
// HTTP EMBEDDER
// ============================================================================

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    #[serde(default)]
    index: usize,
}

/// Embedder backed by an OpenAI-compatible `/embeddings` endpoint.
pub struct HttpEmbedder {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

#[async_trait]
impl Embedder for HttpEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, SearchError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let response: EmbeddingResponse = self
            .client
            .post(&self.endpoint)
            .json(&EmbeddingRequest {
                model: &self.model,
                input: texts,
            })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        parse_embeddings(response, texts.len())
    }
}

fn parse_embeddings(
    mut response: EmbeddingResponse,
    expected: usize,
) -> Result<Vec<Vec<f32>>, SearchError> {
    if response.data.len() != expected {
        return Err(SearchError::Embedding(format!(
            "expected {} vectors, got {}",
            expected,
            response.data.len()
        )));
    }
    response.data.sort_by_key(|d| d.index);
    Ok(response.data.into_iter().map(|d| d.embedding).collect())
}

/// Loads [`HttpEmbedder`]s: builds the client and embeds one warm-up text.
pub struct HttpEmbedderLoader {
    config: ModelConfig,
}

impl HttpEmbedderLoader {
    pub fn new(config: ModelConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl EmbedderLoader for HttpEmbedderLoader {
    async fn load(&self) -> Result<Arc<dyn Embedder>, SearchError> {
        info!(endpoint = %self.config.endpoint, model = %self.config.model, "connecting to embedding model");

        let client = reqwest::Client::builder()
            .user_agent(concat!("kleykod-label/", env!("CARGO_PKG_VERSION")))
            .timeout(self.config.timeout())
            .build()?;

        let embedder = HttpEmbedder {
            client,
            endpoint: self.config.endpoint.clone(),
            model: self.config.model.clone(),
        };

        let warmup = embedder
            .embed(&[format!("{}ping", self.config.query_prefix)])
            .await
            .map_err(|e| SearchError::ModelLoad(e.to_string()))?;
        let dimensions = warmup.first().map(Vec::len).unwrap_or(0);
        if dimensions == 0 {
            return Err(SearchError::ModelLoad("model returned an empty vector".into()));
        }
        debug!(dimensions, "embedding model ready");

        Ok(Arc::new(embedder))
    }
}

/// Connect to the configured model once, reporting why it is unusable.
///
/// Search itself never fails on a missing model; this is for checking a
/// deployment up front.
pub async fn check_model(config: ModelConfig) -> Result<(), LabelError> {
    HttpEmbedderLoader::new(config).load().await?;
    Ok(())
}
