//! Shared vector index of trait clusters
//!
//! Clusters are global (not per candidate) and are only ever added; nothing
//! in this crate merges or deletes them apart from an explicit [`VectorIndex::reset`].

pub mod memory;
pub mod vectors;

pub use memory::InMemoryVectorIndex;
pub use vectors::SqliteVectorIndex;

use crate::config::{IndexBackend, IndexConfig};
use crate::error::Result;
use crate::types::{ClusterId, TraitCluster};
use async_trait::async_trait;
use std::sync::Arc;

/// One search result, nearest first
#[derive(Debug, Clone, PartialEq)]
pub struct IndexHit {
    pub id: ClusterId,
    /// Cosine similarity to the query
    pub similarity: f32,
    pub label: String,
}

/// Result of a label-keyed insert
#[derive(Debug, Clone, PartialEq)]
pub enum InsertOutcome {
    Inserted,
    /// A cluster with the same label already exists; nothing was written
    Existing(IndexHit),
}

/// Vector index operations needed by the clustering engine
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Create the backing collection if it does not exist yet
    async fn ensure_ready(&self) -> Result<()>;

    /// Up to `limit` nearest clusters; malformed entries are skipped
    async fn search(&self, vector: &[f32], limit: usize) -> Result<Vec<IndexHit>>;

    /// Insert or replace a cluster by id
    async fn upsert(&self, cluster: &TraitCluster) -> Result<()>;

    /// Insert a cluster unless one with the same label exists, atomically
    async fn insert_if_absent(&self, cluster: &TraitCluster) -> Result<InsertOutcome>;

    /// Number of stored clusters
    async fn count(&self) -> Result<usize>;

    /// Drop every cluster and recreate the empty collection
    async fn reset(&self) -> Result<()>;

    fn dimensions(&self) -> usize;
}

/// Construct and initialise the configured index
pub async fn create_vector_index(
    config: &IndexConfig,
    dimensions: usize,
) -> Result<Arc<dyn VectorIndex>> {
    let index: Arc<dyn VectorIndex> = match config.backend {
        IndexBackend::Memory => Arc::new(InMemoryVectorIndex::new(dimensions)),
        IndexBackend::Sqlite => {
            let path = config.db_path();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            Arc::new(SqliteVectorIndex::with_pool_size(path, dimensions, config.pool_size)?)
        }
    };
    index.ensure_ready().await?;
    Ok(index)
}
