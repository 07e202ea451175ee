//! Shared helper functions for CLI commands

use serde::Serialize;
use std::io::Read;
use std::path::Path;
use traitlens_core::{error::Result, Submission, TraitlensConfig, TraitlensError};
use tracing::debug;

/// Load configuration from the optional `--config` file plus environment
pub fn load_config(path: Option<&Path>) -> Result<TraitlensConfig> {
    TraitlensConfig::load(path)
}

/// Read submissions from a file, or stdin when `input` is `-`
///
/// Accepts a JSON array of `{"vote": -1|0|1, "comment": "..."}` objects or
/// the same objects one per line.
pub fn read_submissions(input: &str) -> Result<Vec<Submission>> {
    let content = if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(input)?
    };
    parse_submissions(&content)
}

pub fn parse_submissions(content: &str) -> Result<Vec<Submission>> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.starts_with('[') {
        return Ok(serde_json::from_str(trimmed)?);
    }

    let mut submissions = Vec::new();
    for (n, line) in trimmed.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let submission = serde_json::from_str(line).map_err(|e| {
            TraitlensError::Validation(format!("Line {}: {}", n + 1, e))
        })?;
        submissions.push(submission);
    }
    debug!("Parsed {} submissions", submissions.len());
    Ok(submissions)
}

/// Pretty-print a value as JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
