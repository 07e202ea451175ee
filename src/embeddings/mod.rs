//! Embedding generation for trait clustering
//!
//! Provides a local (fastembed) backend, an HTTP backend for
//! OpenAI/Voyage-compatible endpoints, and a deterministic hashed backend
//! that needs neither a model nor a network. Every backend returns
//! unit-normalized vectors of a fixed dimension.

pub mod hashed;
pub mod local;
pub mod remote;

pub use hashed::HashedEmbeddingService;
pub use local::LocalEmbeddingService;
pub use remote::RemoteEmbeddingService;

use crate::config::{EmbeddingBackend, EmbeddingConfig};
use crate::error::{Result, TraitlensError};
use async_trait::async_trait;
use std::sync::Arc;

/// Embedding service trait defining required operations
#[async_trait]
pub trait EmbeddingService: Send + Sync {
    /// Generate a unit-normalized embedding for a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for multiple texts (batched)
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;

    /// Embedding dimensionality (e.g. 384 for all-MiniLM-L6-v2)
    fn dimensions(&self) -> usize;

    fn model_name(&self) -> &str;
}

/// Construct the configured backend
pub async fn create_embedding_service(config: &EmbeddingConfig) -> Result<Arc<dyn EmbeddingService>> {
    Ok(match config.backend {
        EmbeddingBackend::Local => Arc::new(LocalEmbeddingService::new(config.clone()).await?),
        EmbeddingBackend::Remote => Arc::new(RemoteEmbeddingService::from_config(config)?),
        EmbeddingBackend::Hashed => Arc::new(HashedEmbeddingService::new(config.dimensions())),
    })
}

/// Calculate cosine similarity between two vectors
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let magnitude_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let magnitude_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    dot_product / (magnitude_a * magnitude_b)
}

/// Scale a vector to unit length in place
///
/// Zero vectors and vectors with non-finite components are rejected; they
/// have no direction to compare.
pub fn normalize(vector: &mut [f32]) -> Result<()> {
    if vector.iter().any(|x| !x.is_finite()) {
        return Err(TraitlensError::Embedding(
            "Embedding contains invalid values (NaN or Inf)".to_string(),
        ));
    }
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm == 0.0 {
        return Err(TraitlensError::Embedding(
            "Cannot normalize a zero vector".to_string(),
        ));
    }
    for x in vector.iter_mut() {
        *x /= norm;
    }
    Ok(())
}

/// Check a vector's size against the expected dimension
pub fn check_dimensions(vector: &[f32], expected: usize) -> Result<()> {
    if vector.len() != expected {
        return Err(TraitlensError::Embedding(format!(
            "Expected {} dimensions, got {}",
            expected,
            vector.len()
        )));
    }
    Ok(())
}
