//! In-process trait embeddings with fastembed
//!
//! The ONNX model is fetched into `cache_dir` the first time it is needed.
//! fastembed's API is synchronous and takes `&mut self`, so every call runs
//! on the blocking pool against a shared, locked model.

use crate::config::EmbeddingConfig;
use crate::embeddings::{check_dimensions, normalize, EmbeddingService};
use crate::error::{Result, TraitlensError};
use async_trait::async_trait;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// fastembed model for a configured model name
fn fastembed_model(name: &str) -> Option<EmbeddingModel> {
    Some(match name {
        "all-MiniLM-L6-v2" => EmbeddingModel::AllMiniLML6V2,
        "all-MiniLM-L12-v2" => EmbeddingModel::AllMiniLML12V2,
        "bge-small-en-v1.5" => EmbeddingModel::BGESmallENV15,
        "bge-base-en-v1.5" => EmbeddingModel::BGEBaseENV15,
        "nomic-embed-text-v1.5" => EmbeddingModel::NomicEmbedTextV15,
        _ => return None,
    })
}

fn join_error(e: tokio::task::JoinError) -> TraitlensError {
    TraitlensError::Other(format!("Embedding task failed: {}", e))
}

pub struct LocalEmbeddingService {
    model: Arc<Mutex<TextEmbedding>>,
    model_name: String,
    dimensions: usize,
    batch_size: usize,
}

impl LocalEmbeddingService {
    /// Load (downloading on first use) the configured model
    pub async fn new(config: EmbeddingConfig) -> Result<Self> {
        config.validate()?;
        let model = fastembed_model(&config.model).ok_or_else(|| {
            TraitlensError::Validation(format!("Unsupported local model: '{}'", config.model))
        })?;

        info!("Loading embedding model {} from {:?}", config.model, config.cache_dir);

        let mut options = InitOptions::default();
        options.model_name = model;
        options.cache_dir = config.cache_dir.clone();
        options.show_download_progress = config.show_download_progress;

        let loaded = tokio::task::spawn_blocking(move || TextEmbedding::try_new(options))
            .await
            .map_err(join_error)?
            .map_err(|e| TraitlensError::Embedding(format!("Cannot load {}: {}", config.model, e)))?;

        Ok(Self {
            model: Arc::new(Mutex::new(loaded)),
            dimensions: config.dimensions(),
            batch_size: config.batch_size.max(1),
            model_name: config.model,
        })
    }

    async fn run(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
        let expected = texts.len();
        let model = Arc::clone(&self.model);

        let mut vectors = tokio::task::spawn_blocking(move || {
            let mut model = model
                .lock()
                .map_err(|_| TraitlensError::Embedding("Embedding model lock poisoned".to_string()))?;
            model
                .embed(texts, None)
                .map_err(|e| TraitlensError::Embedding(e.to_string()))
        })
        .await
        .map_err(join_error)??;

        if vectors.len() != expected {
            return Err(TraitlensError::Embedding(format!(
                "Model returned {} vectors for {} texts",
                vectors.len(),
                expected
            )));
        }
        for vector in &mut vectors {
            check_dimensions(vector, self.dimensions)?;
            normalize(vector)?;
        }
        Ok(vectors)
    }
}

#[async_trait]
impl EmbeddingService for LocalEmbeddingService {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vectors = self.embed_batch(&[text]).await?;
        vectors
            .pop()
            .ok_or_else(|| TraitlensError::Embedding("Model returned no vector".to_string()))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.iter().any(|t| t.trim().is_empty()) {
            return Err(TraitlensError::Validation(
                "Cannot embed empty text".to_string(),
            ));
        }

        let mut out = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(self.batch_size) {
            debug!("Embedding {} phrases with {}", chunk.len(), self.model_name);
            out.extend(self.run(chunk.iter().map(|t| t.to_string()).collect()).await?);
        }
        Ok(out)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_models() {
        assert!(fastembed_model("all-MiniLM-L6-v2").is_some());
        assert!(fastembed_model("nomic-embed-text-v1.5").is_some());
        assert!(fastembed_model("gpt-embed").is_none());
    }

    // needs the model download: cargo test -- --ignored
    #[tokio::test]
    #[ignore]
    async fn test_paraphrases_are_closer_than_unrelated_traits() {
        let service = LocalEmbeddingService::new(EmbeddingConfig::default()).await.unwrap();

        let vectors = service.embed_batch(&["nice", "friendly", "punctual"]).await.unwrap();
        assert_eq!(vectors[0].len(), 384);
        let norm: f32 = vectors[0].iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-4);

        let close = crate::embeddings::cosine_similarity(&vectors[0], &vectors[1]);
        let far = crate::embeddings::cosine_similarity(&vectors[0], &vectors[2]);
        assert!(close > far);
        assert!(service.embed("  ").await.is_err());
    }
}
