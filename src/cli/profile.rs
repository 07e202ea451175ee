//! Profile command: aggregate a submission history

use super::helpers::{print_json, read_submissions};
use traitlens_core::{error::Result, ProfileBuilder, TraitlensConfig};
use tracing::info;

/// Handle profile command
pub async fn handle(config: &TraitlensConfig, input: &str, top_k: Option<usize>) -> Result<()> {
    let submissions = read_submissions(input)?;
    info!("Building profile from {} submissions", submissions.len());

    let builder = ProfileBuilder::from_config(config).await?;
    let top_k = top_k.unwrap_or(config.pipeline.top_k);
    let profile = builder.build_profile(&submissions, top_k).await?;

    print_json(&profile)
}
