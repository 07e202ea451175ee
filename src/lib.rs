//! Traitlens - peer feedback to personality traits
//!
//! Turns a candidate's feedback history (votes plus free-text comments) into
//! a ranked profile of positive and negative traits with supporting evidence:
//! - Clause segmentation on contrast markers and per-clause polarity scoring
//! - Trait phrase extraction from noun chunks and adjectives
//! - Canonicalization against versioned synonym tables
//! - Online embedding clustering against a shared vector index
//! - Top-K aggregation with capped, distinct evidence per trait
//!
//! # Architecture
//!
//! - **Types**: Core data structures (Submission, TraitMention, CandidateProfile)
//! - **NLP / Sentiment**: Linguistic analyzer and polarity scorer collaborators
//! - **Pipeline**: Per-comment analysis and canonicalization
//! - **Embeddings / Storage**: Embedding services and vector indexes
//! - **Clustering / Profile**: Label resolution and aggregation
//!
//! # Example
//!
//! ```ignore
//! use traitlens_core::{ProfileBuilder, Submission, TraitlensConfig};
//!
//! #[tokio::main]
//! async fn main() -> traitlens_core::Result<()> {
//!     let config = TraitlensConfig::load(None)?;
//!     let builder = ProfileBuilder::from_config(&config).await?;
//!
//!     let profile = builder
//!         .build_profile(
//!             &[
//!                 Submission::new(1, "chiller")?,
//!                 Submission::new(-1, "She is nice but sometimes rude")?,
//!             ],
//!             8,
//!         )
//!         .await?;
//!
//!     for t in &profile.positives {
//!         println!("+ {} ({}): {:?}", t.label, t.count, t.examples);
//!     }
//!     Ok(())
//! }
//! ```

pub mod clustering;
pub mod config;
pub mod embeddings;
pub mod error;
pub mod nlp;
pub mod pipeline;
pub mod profile;
pub mod sentiment;
pub mod storage;
pub mod text;
pub mod types;

// Re-export commonly used types
pub use clustering::{ClusterOutcome, TraitClusterer};
pub use config::{
    ClusteringConfig, EmbeddingBackend, EmbeddingConfig, IndexBackend, IndexConfig, PipelineConfig,
    TraitlensConfig,
};
pub use embeddings::{
    create_embedding_service, EmbeddingService, HashedEmbeddingService, LocalEmbeddingService,
    RemoteEmbeddingService,
};
pub use error::{Result, TraitlensError};
pub use nlp::{Analysis, LinguisticAnalyzer, RuleBasedAnalyzer};
pub use pipeline::{Canonicalizer, SynonymTable, TraitPipeline};
pub use profile::{aggregate, ProfileBuilder};
pub use sentiment::{LexiconScorer, PolarityClassifier, PolarityScorer};
pub use storage::{
    create_vector_index, InMemoryVectorIndex, IndexHit, InsertOutcome, SqliteVectorIndex,
    VectorIndex,
};
pub use types::{
    CandidateProfile, Clause, ClusterId, MentionCandidate, Polarity, Submission, TraitCluster,
    TraitMention, TraitSummary, Vote, VoteSummary,
};
