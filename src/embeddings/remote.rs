//! Remote embedding service over HTTP
//!
//! Talks to any endpoint that speaks the OpenAI/Voyage `POST /embeddings`
//! shape. Failures are returned to the caller as-is: there is no internal
//! retry, so the clustering engine's deadline and fallback stay in charge.

use crate::config::EmbeddingConfig;
use crate::embeddings::{check_dimensions, normalize, EmbeddingService};
use crate::error::{Result, TraitlensError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Environment variable consulted when the config carries no API key
pub const API_KEY_ENV: &str = "TRAITLENS_EMBEDDING_API_KEY";

/// Maximum texts per request
const MAX_BATCH_SIZE: usize = 128;

/// Request timeout
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// HTTP embedding service
pub struct RemoteEmbeddingService {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
    dimensions: usize,
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    input: &'a [String],
    model: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

impl RemoteEmbeddingService {
    /// Create a service for `base_url` (without the `/embeddings` suffix)
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        dimensions: usize,
    ) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(TraitlensError::Validation(
                "Remote embedding URL cannot be empty".to_string(),
            ));
        }
        if dimensions == 0 {
            return Err(TraitlensError::Validation(
                "Embedding dimensions must be positive".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.filter(|k| !k.is_empty()),
            model: model.into(),
            base_url,
            dimensions,
        })
    }

    pub fn from_config(config: &EmbeddingConfig) -> Result<Self> {
        config.validate()?;
        let base_url = config.remote_url.clone().unwrap_or_default();
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var(API_KEY_ENV).ok());
        Self::new(base_url, config.model.clone(), api_key, config.dimensions())
    }

    async fn call_api(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        debug!("Calling embedding API: {} texts, model: {}", texts.len(), self.model);

        let mut request = self
            .client
            .post(format!("{}/embeddings", self.base_url))
            .json(&EmbeddingRequest {
                input: texts,
                model: &self.model,
            });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();

        match status {
            StatusCode::OK => {
                let mut body = response.json::<EmbeddingResponse>().await?;
                if body.data.len() != texts.len() {
                    return Err(TraitlensError::Embedding(format!(
                        "Expected {} embeddings, got {}",
                        texts.len(),
                        body.data.len()
                    )));
                }
                body.data.sort_by_key(|d| d.index);
                body.data
                    .into_iter()
                    .map(|d| self.finish(d.embedding))
                    .collect()
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(TraitlensError::Embedding(
                "Invalid or missing API key".to_string(),
            )),
            StatusCode::BAD_REQUEST => {
                let message = response
                    .json::<ErrorResponse>()
                    .await
                    .ok()
                    .and_then(|e| e.error)
                    .map(|e| e.message)
                    .unwrap_or_else(|| "Bad request".to_string());
                Err(TraitlensError::Embedding(message))
            }
            _ => {
                let text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                Err(TraitlensError::Embedding(format!(
                    "API error (status {}): {}",
                    status, text
                )))
            }
        }
    }

    fn finish(&self, mut embedding: Vec<f32>) -> Result<Vec<f32>> {
        check_dimensions(&embedding, self.dimensions)?;
        normalize(&mut embedding)?;
        Ok(embedding)
    }

    fn validate_text(text: &str) -> Result<()> {
        if text.trim().is_empty() {
            return Err(TraitlensError::Validation(
                "Text cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl EmbeddingService for RemoteEmbeddingService {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Self::validate_text(text)?;
        self.call_api(&[text.to_string()])
            .await?
            .pop()
            .ok_or_else(|| TraitlensError::Embedding("Empty response from API".to_string()))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        for text in texts {
            Self::validate_text(text)?;
        }

        let mut all_embeddings = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(MAX_BATCH_SIZE) {
            let owned: Vec<String> = chunk.iter().map(|s| s.to_string()).collect();
            all_embeddings.extend(self.call_api(&owned).await?);
        }
        Ok(all_embeddings)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EmbeddingBackend;

    #[test]
    fn test_service_creation() {
        let service =
            RemoteEmbeddingService::new("http://localhost:8080/v1/", "all-MiniLM-L6-v2", None, 384)
                .unwrap();
        assert_eq!(service.dimensions(), 384);
        assert_eq!(service.model_name(), "all-MiniLM-L6-v2");
        assert_eq!(service.base_url, "http://localhost:8080/v1");
    }

    #[test]
    fn test_invalid_construction() {
        assert!(RemoteEmbeddingService::new("", "m", None, 384).is_err());
        assert!(RemoteEmbeddingService::new("http://x", "m", None, 0).is_err());
    }

    #[test]
    fn test_from_config_requires_url() {
        let config = EmbeddingConfig {
            backend: EmbeddingBackend::Remote,
            ..EmbeddingConfig::default()
        };
        assert!(RemoteEmbeddingService::from_config(&config).is_err());

        let config = EmbeddingConfig {
            backend: EmbeddingBackend::Remote,
            remote_url: Some("http://localhost:9/v1".to_string()),
            api_key: Some("secret".to_string()),
            dimensions: Some(8),
            ..EmbeddingConfig::default()
        };
        let service = RemoteEmbeddingService::from_config(&config).unwrap();
        assert_eq!(service.dimensions(), 8);
        assert_eq!(service.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_finish_normalizes_and_checks_size() {
        let service = RemoteEmbeddingService::new("http://x", "m", None, 2).unwrap();
        let v = service.finish(vec![3.0, 4.0]).unwrap();
        assert!((v[0] - 0.6).abs() < 1e-6);
        assert!(service.finish(vec![1.0, 2.0, 3.0]).is_err());
        assert!(service.finish(vec![f32::INFINITY, 0.0]).is_err());
    }

    #[tokio::test]
    async fn test_empty_text_rejected_before_network() {
        let service = RemoteEmbeddingService::new("http://127.0.0.1:9", "m", None, 2).unwrap();
        assert!(matches!(
            service.embed("  ").await,
            Err(TraitlensError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_an_error() {
        let service = RemoteEmbeddingService::new("http://127.0.0.1:9", "m", None, 2).unwrap();
        assert!(service.embed("nice").await.is_err());
    }
}
