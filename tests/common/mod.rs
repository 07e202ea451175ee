//! Common test utilities and helpers

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use traitlens_core::{
    ClusteringConfig, EmbeddingService, InMemoryVectorIndex, PipelineConfig, ProfileBuilder,
    Result, Submission, TraitClusterer, TraitPipeline, TraitlensError, VectorIndex,
};

pub const DIMS: usize = 4;

/// Embedding service returning hand-picked vectors; unknown text is an error
pub struct FixedEmbedder {
    vectors: HashMap<String, Vec<f32>>,
}

impl FixedEmbedder {
    pub fn new(entries: &[(&str, [f32; DIMS])]) -> Self {
        Self {
            vectors: entries
                .iter()
                .map(|(text, v)| (text.to_string(), normalized(v)))
                .collect(),
        }
    }
}

#[async_trait]
impl EmbeddingService for FixedEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.vectors
            .get(text)
            .cloned()
            .ok_or_else(|| TraitlensError::Embedding(format!("no fixture vector for '{}'", text)))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            out.push(self.embed(text).await?);
        }
        Ok(out)
    }

    fn dimensions(&self) -> usize {
        DIMS
    }

    fn model_name(&self) -> &str {
        "fixed"
    }
}

fn normalized(v: &[f32; DIMS]) -> Vec<f32> {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    v.iter().map(|x| x / norm).collect()
}

/// Pipeline with built-in analyzer, scorer, and synonym table
pub fn test_pipeline() -> Arc<TraitPipeline> {
    Arc::new(TraitPipeline::with_defaults(PipelineConfig::default()).expect("Failed to build pipeline"))
}

/// Profile builder that uses canonical labels only
pub fn unclustered_builder() -> ProfileBuilder {
    ProfileBuilder::new(test_pipeline(), None)
}

/// Profile builder clustering against the given index
pub fn clustered_builder(
    embedder: Arc<dyn EmbeddingService>,
    index: Arc<dyn VectorIndex>,
) -> ProfileBuilder {
    let clusterer = TraitClusterer::new(embedder, index, &ClusteringConfig::default());
    ProfileBuilder::new(test_pipeline(), Some(Arc::new(clusterer)))
}

pub fn memory_index() -> Arc<InMemoryVectorIndex> {
    Arc::new(InMemoryVectorIndex::new(DIMS))
}

/// Build submissions from `(vote, comment)` pairs
pub fn submissions(pairs: &[(i64, &str)]) -> Vec<Submission> {
    pairs
        .iter()
        .map(|(vote, comment)| Submission::new(*vote, *comment).expect("valid vote"))
        .collect()
}
