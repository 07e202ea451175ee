//! Configuration for the Traitlens pipeline
//!
//! Settings are read from an optional TOML file and then overridden by
//! `TRAITLENS__<SECTION>__<KEY>` environment variables, e.g.
//! `TRAITLENS__CLUSTERING__SIMILARITY_THRESHOLD=0.8`.

use crate::error::{Result, TraitlensError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "TRAITLENS";

/// Embedding models the local backend knows how to load, with their dimensions
const SUPPORTED_LOCAL_MODELS: &[(&str, usize)] = &[
    ("all-MiniLM-L6-v2", 384),
    ("all-MiniLM-L12-v2", 384),
    ("bge-small-en-v1.5", 384),
    ("bge-base-en-v1.5", 768),
    ("nomic-embed-text-v1.5", 768),
];

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TraitlensConfig {
    pub pipeline: PipelineConfig,
    pub clustering: ClusteringConfig,
    pub embedding: EmbeddingConfig,
    pub index: IndexConfig,
}

impl TraitlensConfig {
    /// Load configuration from an optional file layered under environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            debug!("Loading configuration from {}", path.display());
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let config: TraitlensConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: TraitlensConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.pipeline.validate()?;
        self.clustering.validate()?;
        self.embedding.validate()?;
        self.index.validate()?;
        Ok(())
    }
}

/// Heuristic knobs for segmentation, scoring, extraction, and aggregation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Compound score at or above which a clause is positive
    pub positive_threshold: f32,

    /// Compound score at or below which a clause is negative
    pub negative_threshold: f32,

    /// Comments with at most this many words are taken verbatim as a trait
    pub short_comment_max_words: usize,

    /// Extracted phrases shorter than this are dropped
    pub min_phrase_chars: usize,

    /// Noun chunks with more words than this are dropped
    pub max_chunk_words: usize,

    /// Canonical labels keep at most this many lemmas
    pub max_label_tokens: usize,

    /// Traits returned per polarity
    pub top_k: usize,

    /// Evidence snippets kept per trait
    pub max_examples: usize,

    /// Optional TOML synonym table appended to the built-in one
    pub synonyms_path: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            positive_threshold: 0.15,
            negative_threshold: -0.15,
            short_comment_max_words: 3,
            min_phrase_chars: 3,
            max_chunk_words: 5,
            max_label_tokens: 3,
            top_k: 8,
            max_examples: 3,
            synonyms_path: None,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.positive_threshold) {
            return Err(TraitlensError::Validation(
                "pipeline.positive_threshold must be within [0, 1]".to_string(),
            ));
        }
        if !(-1.0..=0.0).contains(&self.negative_threshold) {
            return Err(TraitlensError::Validation(
                "pipeline.negative_threshold must be within [-1, 0]".to_string(),
            ));
        }
        if self.max_label_tokens == 0 || self.max_chunk_words == 0 {
            return Err(TraitlensError::Validation(
                "pipeline.max_label_tokens and pipeline.max_chunk_words must be positive".to_string(),
            ));
        }
        if self.max_examples == 0 {
            return Err(TraitlensError::Validation(
                "pipeline.max_examples must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Settings for the online trait clustering engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringConfig {
    /// Disable to use canonical labels without consulting the index
    pub enabled: bool,

    /// Minimum cosine similarity for a phrase to join an existing cluster
    pub similarity_threshold: f32,

    /// Deadline for one embedding call
    #[serde(rename = "embed_timeout_ms", with = "serde_duration_ms")]
    pub embed_timeout: Duration,

    /// Deadline for one index call
    #[serde(rename = "index_timeout_ms", with = "serde_duration_ms")]
    pub index_timeout: Duration,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            similarity_threshold: 0.75,
            embed_timeout: Duration::from_millis(5_000),
            index_timeout: Duration::from_millis(2_000),
        }
    }
}

impl ClusteringConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(TraitlensError::Validation(
                "clustering.similarity_threshold must be within [0, 1]".to_string(),
            ));
        }
        if self.embed_timeout.is_zero() || self.index_timeout.is_zero() {
            return Err(TraitlensError::Validation(
                "clustering timeouts must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Which embedding service to construct
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingBackend {
    /// fastembed model run in-process
    Local,
    /// OpenAI/Voyage-compatible HTTP endpoint
    Remote,
    /// Deterministic hashed n-gram vectors, no model needed
    Hashed,
}

/// Embedding service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub backend: EmbeddingBackend,

    /// Model name (local fastembed name or remote model id)
    pub model: String,

    /// Where fastembed caches downloaded models
    pub cache_dir: PathBuf,

    /// Texts per embedding call
    pub batch_size: usize,

    pub show_download_progress: bool,

    /// Base URL of the remote endpoint (without `/embeddings`)
    pub remote_url: Option<String>,

    /// API key for the remote endpoint
    pub api_key: Option<String>,

    /// Output size of remote or hashed vectors
    pub dimensions: Option<usize>,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            backend: EmbeddingBackend::Local,
            model: "all-MiniLM-L6-v2".to_string(),
            cache_dir: dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("traitlens")
                .join("models"),
            batch_size: 32,
            show_download_progress: false,
            remote_url: None,
            api_key: None,
            dimensions: None,
        }
    }
}

impl EmbeddingConfig {
    /// Vector size produced by the configured backend
    pub fn dimensions(&self) -> usize {
        match self.backend {
            EmbeddingBackend::Local => SUPPORTED_LOCAL_MODELS
                .iter()
                .find(|(name, _)| *name == self.model)
                .map(|(_, dims)| *dims)
                .unwrap_or(384),
            EmbeddingBackend::Remote | EmbeddingBackend::Hashed => self.dimensions.unwrap_or(384),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(TraitlensError::Validation(
                "embedding.batch_size must be positive".to_string(),
            ));
        }
        match self.backend {
            EmbeddingBackend::Local => {
                if !SUPPORTED_LOCAL_MODELS.iter().any(|(name, _)| *name == self.model) {
                    let supported: Vec<&str> =
                        SUPPORTED_LOCAL_MODELS.iter().map(|(name, _)| *name).collect();
                    return Err(TraitlensError::Validation(format!(
                        "Unsupported local model '{}'. Supported: {}",
                        self.model,
                        supported.join(", ")
                    )));
                }
            }
            EmbeddingBackend::Remote => {
                if self.remote_url.as_deref().map_or(true, str::is_empty) {
                    return Err(TraitlensError::Validation(
                        "embedding.remote_url is required for the remote backend".to_string(),
                    ));
                }
            }
            EmbeddingBackend::Hashed => {}
        }
        if self.dimensions == Some(0) {
            return Err(TraitlensError::Validation(
                "embedding.dimensions must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Which vector index to construct
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexBackend {
    /// sqlite-vec database shared by every process pointing at the same file
    Sqlite,
    /// Process-local index, lost on exit
    Memory,
}

/// Vector index configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub backend: IndexBackend,

    /// Database file; defaults to the platform data directory
    pub db_path: Option<PathBuf>,

    /// Maximum pooled connections
    pub pool_size: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            backend: IndexBackend::Sqlite,
            db_path: None,
            pool_size: 8,
        }
    }
}

impl IndexConfig {
    /// Resolved database path
    pub fn db_path(&self) -> PathBuf {
        self.db_path.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("traitlens")
                .join("traits.db")
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.pool_size == 0 {
            return Err(TraitlensError::Validation(
                "index.pool_size must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

// Durations are written as integer milliseconds
mod serde_duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
