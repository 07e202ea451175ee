//! Vector index implementation using sqlite-vec
//!
//! Two tables in one database file:
//! - `trait_clusters`: id, label (UNIQUE), creation time
//! - `trait_vectors`: sqlite-vec `vec0` virtual table keyed by cluster id
//!
//! vec0 ranks by L2 distance. Every stored and queried vector is
//! unit-normalized, so cosine similarity is recovered as `1 - d²/2`.
//! Connections come from a deadpool-sqlite pool.

use crate::embeddings::{check_dimensions, normalize};
use crate::error::{Result, TraitlensError};
use crate::storage::{IndexHit, InsertOutcome, VectorIndex};
use crate::types::{ClusterId, TraitCluster};
use async_trait::async_trait;
use deadpool_sqlite::{Config, Pool, PoolConfig, Runtime};
use rusqlite::{OptionalExtension, TransactionBehavior};
use std::fmt::Display;
use std::path::Path;
use std::sync::Once;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default connection pool size
const DEFAULT_POOL_SIZE: usize = 8;

/// How long a connection waits on another writer's lock
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

static REGISTER_SQLITE_VEC: Once = Once::new();

/// Register sqlite-vec for every connection opened after this call
fn register_sqlite_vec() {
    REGISTER_SQLITE_VEC.call_once(|| unsafe {
        use rusqlite::ffi::sqlite3_auto_extension;

        #[allow(clippy::missing_transmute_annotations)]
        sqlite3_auto_extension(Some(std::mem::transmute(
            sqlite_vec::sqlite3_vec_init as *const (),
        )));
    });
}

fn db_error<E: Display>(context: &'static str) -> impl FnOnce(E) -> TraitlensError {
    move |e| TraitlensError::Database(format!("{}: {}", context, e))
}

/// L2 distance between unit vectors to cosine similarity
fn distance_to_similarity(distance: f64) -> f32 {
    (1.0 - distance * distance / 2.0).clamp(-1.0, 1.0) as f32
}

/// Vector index backed by sqlite-vec with connection pooling
pub struct SqliteVectorIndex {
    pool: Pool,
    dimensions: usize,
}

impl SqliteVectorIndex {
    /// Open (or create) an index database
    ///
    /// # Example
    /// ```ignore
    /// let index = SqliteVectorIndex::new("traits.db", 384)?;
    /// index.ensure_ready().await?;
    /// ```
    pub fn new<P: AsRef<Path>>(db_path: P, dimensions: usize) -> Result<Self> {
        Self::with_pool_size(db_path, dimensions, DEFAULT_POOL_SIZE)
    }

    pub fn with_pool_size<P: AsRef<Path>>(
        db_path: P,
        dimensions: usize,
        pool_size: usize,
    ) -> Result<Self> {
        if dimensions == 0 {
            return Err(TraitlensError::Validation(
                "Index dimensions must be positive".to_string(),
            ));
        }

        let path_str = db_path.as_ref().to_string_lossy().to_string();
        info!(
            "Opening trait index at: {} (dimensions: {}, pool_size: {})",
            path_str, dimensions, pool_size
        );

        register_sqlite_vec();

        let mut config = Config::new(path_str);
        config.pool = Some(PoolConfig::new(pool_size.max(1)));
        let pool = config
            .create_pool(Runtime::Tokio1)
            .map_err(db_error("Failed to create connection pool"))?;

        Ok(Self { pool, dimensions })
    }

    fn prepare(&self, vector: &[f32]) -> Result<String> {
        check_dimensions(vector, self.dimensions)?;
        let mut vector = vector.to_vec();
        normalize(&mut vector)?;
        Ok(serde_json::to_string(&vector)?)
    }

    async fn interact<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut rusqlite::Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = self
            .pool
            .get()
            .await
            .map_err(db_error("Failed to get connection from pool"))?;
        conn.interact(move |conn| {
            conn.busy_timeout(BUSY_TIMEOUT)
                .map_err(db_error("Failed to set busy timeout"))?;
            f(conn)
        })
        .await
        .map_err(db_error("Pool interaction failed"))?
    }

    fn schema_sql(dimensions: usize) -> (String, String) {
        let clusters = "CREATE TABLE IF NOT EXISTS trait_clusters (
                id TEXT PRIMARY KEY,
                label TEXT NOT NULL UNIQUE,
                created_at TEXT NOT NULL
            )"
        .to_string();
        let vectors = format!(
            "CREATE VIRTUAL TABLE IF NOT EXISTS trait_vectors USING vec0(
                cluster_id TEXT PRIMARY KEY,
                embedding FLOAT[{}]
            )",
            dimensions
        );
        (clusters, vectors)
    }
}

#[async_trait]
impl VectorIndex for SqliteVectorIndex {
    async fn ensure_ready(&self) -> Result<()> {
        let (clusters, vectors) = Self::schema_sql(self.dimensions);
        self.interact(move |conn| {
            conn.execute(&clusters, [])
                .map_err(db_error("Failed to create trait_clusters"))?;
            conn.execute(&vectors, [])
                .map_err(db_error("Failed to create trait_vectors"))?;
            Ok(())
        })
        .await?;
        debug!("Trait index tables ready");
        Ok(())
    }

    async fn search(&self, vector: &[f32], limit: usize) -> Result<Vec<IndexHit>> {
        let query = self.prepare(vector)?;
        let limit = limit as i64;

        let hits = self
            .interact(move |conn| {
                let mut stmt = conn
                    .prepare(
                        "SELECT v.cluster_id, v.distance, c.label
                         FROM (
                             SELECT cluster_id, distance
                             FROM trait_vectors
                             WHERE embedding MATCH vec_f32(?1)
                             ORDER BY distance
                             LIMIT ?2
                         ) v
                         LEFT JOIN trait_clusters c ON c.id = v.cluster_id
                         ORDER BY v.distance",
                    )
                    .map_err(db_error("Failed to prepare search"))?;

                let rows = stmt
                    .query_map(rusqlite::params![query, limit], |row| {
                        Ok((
                            row.get::<_, String>(0)?,
                            row.get::<_, f64>(1)?,
                            row.get::<_, Option<String>>(2)?,
                        ))
                    })
                    .and_then(|mapped| mapped.collect::<rusqlite::Result<Vec<_>>>())
                    .map_err(db_error("Failed to execute vector search"))?;

                let mut hits = Vec::with_capacity(rows.len());
                for (id, distance, label) in rows {
                    let Ok(cluster_id) = ClusterId::from_string(&id) else {
                        warn!("Skipping index row with malformed id '{}'", id);
                        continue;
                    };
                    let Some(label) = label.filter(|l| !l.trim().is_empty()) else {
                        warn!("Skipping cluster {} without a label", cluster_id);
                        continue;
                    };
                    hits.push(IndexHit {
                        id: cluster_id,
                        similarity: distance_to_similarity(distance),
                        label,
                    });
                }
                Ok(hits)
            })
            .await?;

        debug!("Vector search returned {} hits", hits.len());
        Ok(hits)
    }

    async fn upsert(&self, cluster: &TraitCluster) -> Result<()> {
        let embedding = self.prepare(&cluster.representative_vector)?;
        let id = cluster.id.to_string();
        let label = cluster.label.clone();
        let created_at = chrono::Utc::now().to_rfc3339();

        self.interact(move |conn| {
            let tx = conn
                .transaction_with_behavior(TransactionBehavior::Immediate)
                .map_err(db_error("Failed to begin transaction"))?;

            tx.execute(
                "INSERT INTO trait_clusters (id, label, created_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(id) DO UPDATE SET label = excluded.label",
                rusqlite::params![&id, &label, &created_at],
            )
            .map_err(db_error("Failed to store cluster"))?;

            // vec0 tables don't support INSERT OR REPLACE
            tx.execute(
                "DELETE FROM trait_vectors WHERE cluster_id = ?1",
                rusqlite::params![&id],
            )
            .map_err(db_error("Failed to delete existing vector"))?;
            tx.execute(
                "INSERT INTO trait_vectors (cluster_id, embedding) VALUES (?1, vec_f32(?2))",
                rusqlite::params![&id, &embedding],
            )
            .map_err(db_error("Failed to store vector"))?;

            tx.commit().map_err(db_error("Failed to commit transaction"))
        })
        .await
    }

    async fn insert_if_absent(&self, cluster: &TraitCluster) -> Result<InsertOutcome> {
        let embedding = self.prepare(&cluster.representative_vector)?;
        let id = cluster.id.to_string();
        let label = cluster.label.clone();
        let created_at = chrono::Utc::now().to_rfc3339();

        let outcome = self
            .interact(move |conn| {
                // IMMEDIATE takes the write lock up front, so two processes
                // cannot both miss the label check
                let tx = conn
                    .transaction_with_behavior(TransactionBehavior::Immediate)
                    .map_err(db_error("Failed to begin transaction"))?;

                let existing: Option<(String, f64)> = tx
                    .query_row(
                        "SELECT c.id, vec_distance_l2(v.embedding, vec_f32(?2))
                         FROM trait_clusters c
                         JOIN trait_vectors v ON v.cluster_id = c.id
                         WHERE c.label = ?1",
                        rusqlite::params![&label, &embedding],
                        |row| Ok((row.get(0)?, row.get(1)?)),
                    )
                    .optional()
                    .map_err(db_error("Failed to look up label"))?;

                if let Some((existing_id, distance)) = existing {
                    tx.commit().map_err(db_error("Failed to commit transaction"))?;
                    return Ok(InsertOutcome::Existing(IndexHit {
                        id: ClusterId::from_string(&existing_id)?,
                        similarity: distance_to_similarity(distance),
                        label,
                    }));
                }

                tx.execute(
                    "INSERT INTO trait_clusters (id, label, created_at) VALUES (?1, ?2, ?3)",
                    rusqlite::params![&id, &label, &created_at],
                )
                .map_err(db_error("Failed to store cluster"))?;
                tx.execute(
                    "INSERT INTO trait_vectors (cluster_id, embedding) VALUES (?1, vec_f32(?2))",
                    rusqlite::params![&id, &embedding],
                )
                .map_err(db_error("Failed to store vector"))?;
                tx.commit().map_err(db_error("Failed to commit transaction"))?;

                Ok(InsertOutcome::Inserted)
            })
            .await?;

        if outcome == InsertOutcome::Inserted {
            info!("Stored new trait cluster '{}' ({})", cluster.label, cluster.id);
        }
        Ok(outcome)
    }

    async fn count(&self) -> Result<usize> {
        self.interact(|conn| {
            let count: i64 = conn
                .query_row("SELECT COUNT(*) FROM trait_clusters", [], |row| row.get(0))
                .map_err(db_error("Failed to count clusters"))?;
            Ok(count as usize)
        })
        .await
    }

    async fn reset(&self) -> Result<()> {
        let (clusters, vectors) = Self::schema_sql(self.dimensions);
        self.interact(move |conn| {
            conn.execute_batch(
                "DROP TABLE IF EXISTS trait_vectors;
                 DROP TABLE IF EXISTS trait_clusters;",
            )
            .map_err(db_error("Failed to drop trait tables"))?;
            conn.execute(&clusters, [])
                .map_err(db_error("Failed to create trait_clusters"))?;
            conn.execute(&vectors, [])
                .map_err(db_error("Failed to create trait_vectors"))?;
            Ok(())
        })
        .await?;
        info!("Trait index reset");
        Ok(())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn create_test_index() -> (SqliteVectorIndex, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let index = SqliteVectorIndex::new(temp_dir.path().join("test.db"), 3).unwrap();
        index.ensure_ready().await.unwrap();
        (index, temp_dir)
    }

    fn cluster(label: &str, vector: Vec<f32>) -> TraitCluster {
        TraitCluster::new(ClusterId::new(), vector, label).unwrap()
    }

    #[test]
    fn test_distance_to_similarity() {
        assert!((distance_to_similarity(0.0) - 1.0).abs() < 1e-6);
        assert!(distance_to_similarity(std::f64::consts::SQRT_2).abs() < 1e-6);
        assert!((distance_to_similarity(2.0) + 1.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_search_similar() {
        let (index, _temp) = create_test_index().await;
        let nice = cluster("nice", vec![1.0, 0.0, 0.0]);
        index.upsert(&nice).await.unwrap();
        index.upsert(&cluster("kind", vec![0.9, 0.1, 0.0])).await.unwrap();
        index.upsert(&cluster("late", vec![0.0, 0.0, 1.0])).await.unwrap();

        let hits = index.search(&[2.0, 0.0, 0.0], 3).await.unwrap();
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].id, nice.id);
        assert_eq!(hits[0].label, "nice");
        assert!(hits[0].similarity > 0.99);
        assert_eq!(hits[1].label, "kind");
        assert!(hits[1].similarity > 0.9);
        assert!(hits[2].similarity.abs() < 0.01);
    }

    #[tokio::test]
    async fn test_dimension_mismatch() {
        let (index, _temp) = create_test_index().await;
        let result = index.upsert(&cluster("nice", vec![1.0, 2.0])).await;
        assert!(result.unwrap_err().to_string().contains("dimensions"));
    }

    #[tokio::test]
    async fn test_insert_if_absent() {
        let (index, _temp) = create_test_index().await;
        let first = cluster("rude", vec![1.0, 0.0, 0.0]);
        assert_eq!(index.insert_if_absent(&first).await.unwrap(), InsertOutcome::Inserted);

        let again = cluster("rude", vec![1.0, 0.0, 0.0]);
        match index.insert_if_absent(&again).await.unwrap() {
            InsertOutcome::Existing(hit) => {
                assert_eq!(hit.id, first.id);
                assert_eq!(hit.label, "rude");
                assert!(hit.similarity > 0.99);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(index.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_orphan_vector_is_skipped() {
        let (index, _temp) = create_test_index().await;
        index.upsert(&cluster("nice", vec![1.0, 0.0, 0.0])).await.unwrap();

        // a vector row whose cluster row is missing
        index
            .interact(|conn| {
                conn.execute(
                    "INSERT INTO trait_vectors (cluster_id, embedding) VALUES ('not-a-uuid', vec_f32('[1.0, 0.0, 0.0]'))",
                    [],
                )
                .map_err(db_error("insert"))?;
                Ok(())
            })
            .await
            .unwrap();

        let hits = index.search(&[1.0, 0.0, 0.0], 5).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].label, "nice");
    }

    #[tokio::test]
    async fn test_reset_and_persistence() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("traits.db");
        {
            let index = SqliteVectorIndex::new(&path, 3).unwrap();
            index.ensure_ready().await.unwrap();
            index.upsert(&cluster("chill", vec![0.0, 1.0, 0.0])).await.unwrap();
        }

        let reopened = SqliteVectorIndex::new(&path, 3).unwrap();
        reopened.ensure_ready().await.unwrap();
        assert_eq!(reopened.count().await.unwrap(), 1);

        reopened.reset().await.unwrap();
        assert_eq!(reopened.count().await.unwrap(), 0);
        assert!(reopened.search(&[0.0, 1.0, 0.0], 1).await.unwrap().is_empty());
    }
}
