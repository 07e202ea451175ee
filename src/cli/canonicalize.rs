//! Canonicalize command: fold phrases into the controlled vocabulary

use serde::Serialize;
use traitlens_core::{error::Result, TraitPipeline, TraitlensConfig};

use super::helpers::print_json;

#[derive(Serialize)]
struct Canonical<'a> {
    phrase: &'a str,
    label: String,
}

/// Handle canonicalize command
pub fn handle(config: &TraitlensConfig, phrases: &[String]) -> Result<()> {
    let pipeline = TraitPipeline::with_defaults(config.pipeline.clone())?;

    let results = phrases
        .iter()
        .map(|phrase| {
            Ok(Canonical {
                phrase,
                label: pipeline.canonicalize(phrase)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    print_json(&results)
}
