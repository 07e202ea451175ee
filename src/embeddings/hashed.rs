//! Deterministic hashed embeddings
//!
//! Feature hashing over words and character n-grams, SHA-256 for the bucket
//! and sign. No model and no network, so it is what tests and offline runs
//! use. Similarity tracks surface overlap ("nice" vs "nice guy"), not
//! meaning ("nice" vs "kind").

use crate::embeddings::{normalize, EmbeddingService};
use crate::error::{Result, TraitlensError};
use crate::text::normalize_phrase;
use async_trait::async_trait;
use sha2::{Digest, Sha256};

const WORD_WEIGHT: f32 = 1.0;
const NGRAM_WEIGHT: f32 = 0.5;
const NGRAM_SIZES: std::ops::RangeInclusive<usize> = 3..=4;

pub struct HashedEmbeddingService {
    dimensions: usize,
}

impl HashedEmbeddingService {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    fn add_feature(&self, vector: &mut [f32], feature: &str, weight: f32) {
        let digest = Sha256::digest(feature.as_bytes());
        let mut bucket = [0u8; 8];
        bucket.copy_from_slice(&digest[..8]);
        let index = (u64::from_le_bytes(bucket) % self.dimensions as u64) as usize;
        let sign = if digest[8] & 1 == 0 { 1.0 } else { -1.0 };
        vector[index] += sign * weight;
    }

    fn vectorize(&self, text: &str) -> Result<Vec<f32>> {
        let normalized = normalize_phrase(text);
        if normalized.is_empty() {
            return Err(TraitlensError::Validation(
                "Text cannot be empty".to_string(),
            ));
        }

        let mut vector = vec![0.0; self.dimensions];
        for word in normalized.split(' ') {
            self.add_feature(&mut vector, &format!("w:{}", word), WORD_WEIGHT);

            let padded: Vec<char> = format!(" {} ", word).chars().collect();
            for n in NGRAM_SIZES {
                for gram in padded.windows(n) {
                    let gram: String = gram.iter().collect();
                    self.add_feature(&mut vector, &format!("c:{}", gram), NGRAM_WEIGHT);
                }
            }
        }

        normalize(&mut vector)?;
        Ok(vector)
    }
}

#[async_trait]
impl EmbeddingService for HashedEmbeddingService {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.vectorize(text)
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.vectorize(t)).collect()
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_name(&self) -> &str {
        "hashed-ngrams"
    }
}
