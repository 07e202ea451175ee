//! Analyze command: show how one comment is read

use super::helpers::print_json;
use serde::Serialize;
use traitlens_core::{
    error::Result, Clause, ProfileBuilder, Submission, TraitMention, TraitlensConfig,
};

#[derive(Serialize)]
struct Analysis {
    short_comment: bool,
    clauses: Vec<Clause>,
    mentions: Vec<TraitMention>,
}

/// Handle analyze command
pub async fn handle(config: &TraitlensConfig, vote: i64, comment: &str) -> Result<()> {
    let submission = Submission::new(vote, comment)?;
    let builder = ProfileBuilder::from_config(config).await?;
    let pipeline = builder.pipeline();

    let short_comment = pipeline.is_short(comment);
    let clauses = if short_comment || comment.trim().is_empty() {
        Vec::new()
    } else {
        pipeline.clauses(comment, submission.vote, 0)?
    };
    let mentions = builder.mentions(std::slice::from_ref(&submission)).await?;

    print_json(&Analysis {
        short_comment,
        clauses,
        mentions,
    })
}
