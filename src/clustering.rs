//! Online trait clustering
//!
//! Maps canonical phrases onto a growing set of stable trait labels:
//!
//! 1. embed the phrase (unit-normalized)
//! 2. look up the nearest cluster in the shared index
//! 3. at or above the similarity threshold, reuse that cluster's label
//! 4. otherwise register a new cluster labelled with the phrase
//!
//! A cluster's representative vector is whatever its first writer stored;
//! joining never moves it. Within a process, new-cluster registration is
//! serialized and re-checks the index after taking the lock, so two
//! concurrent near-duplicates cannot both create clusters. Across processes
//! the index's label-keyed `insert_if_absent` stops exact duplicates;
//! near-duplicates created concurrently by different processes can still
//! coexist, and later mentions settle on whichever one is nearest.
//!
//! Embedding and index failures never surface as errors. They produce
//! [`ClusterOutcome::Unavailable`] carrying the unclustered label, and the
//! caller decides what to do with it.

use crate::config::ClusteringConfig;
use crate::embeddings::{check_dimensions, normalize, EmbeddingService};
use crate::error::{Result, TraitlensError};
use crate::storage::{IndexHit, InsertOutcome, VectorIndex};
use crate::types::{ClusterId, TraitCluster};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// What happened to one phrase
#[derive(Debug, Clone, PartialEq)]
pub enum ClusterOutcome {
    /// Absorbed into an existing cluster
    Joined {
        label: String,
        cluster_id: ClusterId,
        similarity: f32,
    },
    /// Registered as a new cluster labelled with the phrase itself
    Created { cluster: TraitCluster },
    /// The embedding service or index failed; `label` is the input phrase
    Unavailable { label: String, reason: String },
}

impl ClusterOutcome {
    /// The label to record for the mention
    pub fn label(&self) -> &str {
        match self {
            ClusterOutcome::Joined { label, .. } => label,
            ClusterOutcome::Created { cluster } => &cluster.label,
            ClusterOutcome::Unavailable { label, .. } => label,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, ClusterOutcome::Unavailable { .. })
    }
}

/// Trait clustering engine over an embedding service and a shared index
pub struct TraitClusterer {
    embedder: Arc<dyn EmbeddingService>,
    index: Arc<dyn VectorIndex>,
    threshold: f32,
    embed_timeout: Duration,
    index_timeout: Duration,
    insert_lock: Mutex<()>,
}

impl TraitClusterer {
    pub fn new(
        embedder: Arc<dyn EmbeddingService>,
        index: Arc<dyn VectorIndex>,
        config: &ClusteringConfig,
    ) -> Self {
        Self {
            embedder,
            index,
            threshold: config.similarity_threshold,
            embed_timeout: config.embed_timeout,
            index_timeout: config.index_timeout,
            insert_lock: Mutex::new(()),
        }
    }

    /// Resolve a canonical phrase to a cluster label
    pub async fn assign(&self, phrase: &str) -> ClusterOutcome {
        match self.try_assign(phrase).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Clustering unavailable for '{}', using it unclustered: {}", phrase, e);
                ClusterOutcome::Unavailable {
                    label: phrase.to_string(),
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn try_assign(&self, phrase: &str) -> Result<ClusterOutcome> {
        if phrase.trim().is_empty() {
            return Err(TraitlensError::Validation(
                "Cannot cluster an empty phrase".to_string(),
            ));
        }

        let mut vector = with_deadline("embedding", self.embed_timeout, self.embedder.embed(phrase)).await?;
        check_dimensions(&vector, self.index.dimensions())?;
        normalize(&mut vector)?;

        if let Some(outcome) = self.nearest_match(phrase, &vector).await? {
            return Ok(outcome);
        }

        let _guard = self.insert_lock.lock().await;

        // another task may have registered a close phrase while we waited
        if let Some(outcome) = self.nearest_match(phrase, &vector).await? {
            return Ok(outcome);
        }

        let cluster = TraitCluster::new(ClusterId::new(), vector, phrase)?;
        match with_deadline("index insert", self.index_timeout, self.index.insert_if_absent(&cluster)).await? {
            InsertOutcome::Inserted => {
                info!("New trait cluster '{}' ({})", cluster.label, cluster.id);
                Ok(ClusterOutcome::Created { cluster })
            }
            InsertOutcome::Existing(hit) => {
                debug!("'{}' already registered as cluster {}", phrase, hit.id);
                Ok(joined(hit))
            }
        }
    }

    async fn nearest_match(&self, phrase: &str, vector: &[f32]) -> Result<Option<ClusterOutcome>> {
        let hits = with_deadline("index search", self.index_timeout, self.index.search(vector, 1)).await?;
        let Some(hit) = hits.into_iter().next() else {
            return Ok(None);
        };

        if hit.similarity >= self.threshold && !hit.label.trim().is_empty() {
            debug!(
                "'{}' -> '{}' (similarity {:.3})",
                phrase, hit.label, hit.similarity
            );
            return Ok(Some(joined(hit)));
        }
        Ok(None)
    }
}

fn joined(hit: IndexHit) -> ClusterOutcome {
    ClusterOutcome::Joined {
        label: hit.label,
        cluster_id: hit.id,
        similarity: hit.similarity,
    }
}

async fn with_deadline<T>(
    what: &str,
    deadline: Duration,
    call: impl Future<Output = Result<T>>,
) -> Result<T> {
    tokio::time::timeout(deadline, call)
        .await
        .map_err(|_| TraitlensError::Timeout(format!("{} exceeded {:?}", what, deadline)))?
}
