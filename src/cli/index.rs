//! Vector index maintenance commands

use clap::Subcommand;
use serde_json::json;
use traitlens_core::{
    create_embedding_service, create_vector_index, error::Result, TraitlensConfig, TraitlensError,
};
use tracing::warn;

use super::helpers::print_json;

#[derive(Subcommand)]
pub enum IndexAction {
    /// Show index location and cluster count
    Stats,

    /// Delete every trait cluster
    Reset {
        /// Skip the confirmation check
        #[arg(long)]
        yes: bool,
    },
}

/// Handle index maintenance command
pub async fn handle(config: &TraitlensConfig, action: IndexAction) -> Result<()> {
    let embedder = create_embedding_service(&config.embedding).await?;
    let index = create_vector_index(&config.index, embedder.dimensions()).await?;

    match action {
        IndexAction::Stats => print_json(&json!({
            "backend": config.index.backend,
            "db_path": config.index.db_path(),
            "model": embedder.model_name(),
            "dimensions": index.dimensions(),
            "clusters": index.count().await?,
        })),
        IndexAction::Reset { yes } => {
            if !yes {
                return Err(TraitlensError::Validation(
                    "Refusing to reset the index without --yes".to_string(),
                ));
            }
            let before = index.count().await?;
            index.reset().await?;
            warn!("Removed {} trait clusters", before);
            print_json(&json!({ "removed": before }))
        }
    }
}
