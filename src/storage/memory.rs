//! Brute-force in-memory vector index

use crate::embeddings::{check_dimensions, cosine_similarity, normalize};
use crate::error::{Result, TraitlensError};
use crate::storage::{IndexHit, InsertOutcome, VectorIndex};
use crate::types::TraitCluster;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Process-local index; clusters are lost when it is dropped
pub struct InMemoryVectorIndex {
    clusters: RwLock<Vec<TraitCluster>>,
    dimensions: usize,
}

impl InMemoryVectorIndex {
    pub fn new(dimensions: usize) -> Self {
        Self {
            clusters: RwLock::new(Vec::new()),
            dimensions,
        }
    }

    fn prepare(&self, vector: &[f32]) -> Result<Vec<f32>> {
        check_dimensions(vector, self.dimensions)?;
        let mut vector = vector.to_vec();
        normalize(&mut vector)?;
        Ok(vector)
    }

    fn hit(cluster: &TraitCluster, query: &[f32]) -> IndexHit {
        IndexHit {
            id: cluster.id,
            similarity: cosine_similarity(&cluster.representative_vector, query),
            label: cluster.label.clone(),
        }
    }
}

#[async_trait]
impl VectorIndex for InMemoryVectorIndex {
    async fn ensure_ready(&self) -> Result<()> {
        Ok(())
    }

    async fn search(&self, vector: &[f32], limit: usize) -> Result<Vec<IndexHit>> {
        let query = self.prepare(vector)?;
        let clusters = self.clusters.read().await;

        let mut hits: Vec<IndexHit> = clusters
            .iter()
            .filter(|cluster| {
                let valid = !cluster.label.trim().is_empty()
                    && cluster.representative_vector.len() == self.dimensions;
                if !valid {
                    warn!("Skipping malformed cluster {}", cluster.id);
                }
                valid
            })
            .map(|cluster| Self::hit(cluster, &query))
            .collect();

        hits.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        hits.truncate(limit);
        debug!("In-memory search returned {} hits", hits.len());
        Ok(hits)
    }

    async fn upsert(&self, cluster: &TraitCluster) -> Result<()> {
        let vector = self.prepare(&cluster.representative_vector)?;
        let cluster = TraitCluster::new(cluster.id, vector, cluster.label.clone())?;
        let mut clusters = self.clusters.write().await;

        if clusters
            .iter()
            .any(|c| c.label == cluster.label && c.id != cluster.id)
        {
            return Err(TraitlensError::Index(format!(
                "Label '{}' belongs to another cluster",
                cluster.label
            )));
        }

        match clusters.iter_mut().find(|c| c.id == cluster.id) {
            Some(existing) => *existing = cluster,
            None => clusters.push(cluster),
        }
        Ok(())
    }

    async fn insert_if_absent(&self, cluster: &TraitCluster) -> Result<InsertOutcome> {
        let vector = self.prepare(&cluster.representative_vector)?;
        let cluster = TraitCluster::new(cluster.id, vector, cluster.label.clone())?;
        let mut clusters = self.clusters.write().await;

        if let Some(existing) = clusters.iter().find(|c| c.label == cluster.label) {
            return Ok(InsertOutcome::Existing(Self::hit(
                existing,
                &cluster.representative_vector,
            )));
        }

        clusters.push(cluster);
        Ok(InsertOutcome::Inserted)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.clusters.read().await.len())
    }

    async fn reset(&self) -> Result<()> {
        self.clusters.write().await.clear();
        Ok(())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
