//! Core data types for the Traitlens pipeline
//!
//! This module defines the values that flow through the feedback pipeline:
//! submissions coming in from the surrounding application, the clause and
//! mention records produced along the way, trait clusters kept in the shared
//! vector index, and the candidate profile handed back to the caller.

use crate::error::{Result, TraitlensError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for trait clusters
///
/// Wraps a UUID so cluster ids are globally unique across concurrent
/// request handlers and process instances sharing one index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterId(pub Uuid);

impl ClusterId {
    /// Create a new random cluster ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a cluster ID from a string
    pub fn from_string(s: &str) -> std::result::Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for ClusterId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ClusterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A reviewer's vote on a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Vote {
    Down,
    Neutral,
    Up,
}

impl Vote {
    /// Polarity carried by the vote itself, if any
    pub fn polarity(self) -> Option<Polarity> {
        match self {
            Vote::Up => Some(Polarity::Positive),
            Vote::Down => Some(Polarity::Negative),
            Vote::Neutral => None,
        }
    }
}

impl TryFrom<i64> for Vote {
    type Error = TraitlensError;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            -1 => Ok(Vote::Down),
            0 => Ok(Vote::Neutral),
            1 => Ok(Vote::Up),
            other => Err(TraitlensError::InvalidVote(other)),
        }
    }
}

impl From<Vote> for i64 {
    fn from(vote: Vote) -> Self {
        match vote {
            Vote::Down => -1,
            Vote::Neutral => 0,
            Vote::Up => 1,
        }
    }
}

/// Direction of a trait mention. Neutral text never becomes a mention,
/// so neutrality is expressed as `Option<Polarity>` where it can occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Negative,
    Positive,
}

impl std::fmt::Display for Polarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Polarity::Negative => write!(f, "negative"),
            Polarity::Positive => write!(f, "positive"),
        }
    }
}

/// One piece of feedback: a vote plus an optional free-text comment.
///
/// Owned by the external storage layer; the pipeline only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub vote: Vote,
    #[serde(default)]
    pub comment: String,
}

impl Submission {
    /// Build a submission from a raw integer vote, rejecting values outside {-1, 0, 1}
    pub fn new(vote: i64, comment: impl Into<String>) -> Result<Self> {
        Ok(Self {
            vote: Vote::try_from(vote)?,
            comment: comment.into(),
        })
    }
}

/// A contiguous span of a comment scored on its own
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    pub text: String,
    /// `None` when the clause is neutral
    pub polarity: Option<Polarity>,
    /// Index of the originating submission
    pub comment_index: usize,
}

/// A trait phrase pulled out of a comment before canonicalization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionCandidate {
    pub polarity: Polarity,
    pub raw_phrase: String,
    pub evidence: String,
}

/// A fully resolved trait mention
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitMention {
    pub polarity: Polarity,
    pub raw_phrase: String,
    pub canonical_label: String,
    pub evidence: String,
}

/// A group of canonical phrases treated as one trait
///
/// The representative vector is the first writer's embedding and is never
/// updated when later phrases join the cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitCluster {
    pub id: ClusterId,
    pub representative_vector: Vec<f32>,
    pub label: String,
}

impl TraitCluster {
    /// Create a cluster, rejecting empty labels and empty vectors
    pub fn new(id: ClusterId, representative_vector: Vec<f32>, label: impl Into<String>) -> Result<Self> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(TraitlensError::Validation(
                "Cluster label cannot be empty".to_string(),
            ));
        }
        if representative_vector.is_empty() {
            return Err(TraitlensError::Validation(
                "Cluster vector cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            id,
            representative_vector,
            label,
        })
    }
}

/// Aggregated evidence for one trait label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitSummary {
    pub label: String,
    pub count: usize,
    /// First distinct evidence snippets in input order (at most 3 by default)
    pub examples: Vec<String>,
}

/// Vote tallies over every submission, regardless of comment content
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteSummary {
    pub yes: usize,
    pub no: usize,
    pub neutral: usize,
    pub score: i64,
}

impl VoteSummary {
    pub fn from_submissions(submissions: &[Submission]) -> Self {
        let mut summary = VoteSummary::default();
        for submission in submissions {
            match submission.vote {
                Vote::Up => summary.yes += 1,
                Vote::Down => summary.no += 1,
                Vote::Neutral => summary.neutral += 1,
            }
        }
        summary.score = summary.yes as i64 - summary.no as i64;
        summary
    }
}

/// Derived trait profile for one candidate; recomputed on every request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub vote_summary: VoteSummary,
    pub positives: Vec<TraitSummary>,
    pub negatives: Vec<TraitSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vote_from_int() {
        assert_eq!(Vote::try_from(1).unwrap(), Vote::Up);
        assert_eq!(Vote::try_from(0).unwrap(), Vote::Neutral);
        assert_eq!(Vote::try_from(-1).unwrap(), Vote::Down);
        assert!(matches!(
            Vote::try_from(5),
            Err(TraitlensError::InvalidVote(5))
        ));
    }

    #[test]
    fn test_submission_json_roundtrip_uses_integer_votes() {
        let json = r#"[{"vote": -1, "comment": "rude"}, {"vote": 0}]"#;
        let parsed: Vec<Submission> = serde_json::from_str(json).unwrap();
        assert_eq!(parsed[0].vote, Vote::Down);
        assert_eq!(parsed[1].comment, "");

        let out = serde_json::to_value(&parsed[0]).unwrap();
        assert_eq!(out["vote"], -1);
    }

    #[test]
    fn test_submission_rejects_bad_vote() {
        assert!(serde_json::from_str::<Submission>(r#"{"vote": 3, "comment": "x"}"#).is_err());
        assert!(Submission::new(-2, "x").is_err());
    }

    #[test]
    fn test_vote_summary() {
        let submissions = vec![
            Submission::new(1, "nice").unwrap(),
            Submission::new(-1, "rude").unwrap(),
            Submission::new(0, "").unwrap(),
        ];
        let summary = VoteSummary::from_submissions(&submissions);
        assert_eq!(
            summary,
            VoteSummary {
                yes: 1,
                no: 1,
                neutral: 1,
                score: 0
            }
        );
    }

    #[test]
    fn test_cluster_requires_label() {
        assert!(TraitCluster::new(ClusterId::new(), vec![1.0], "  ").is_err());
        assert!(TraitCluster::new(ClusterId::new(), vec![], "nice").is_err());
        assert!(TraitCluster::new(ClusterId::new(), vec![1.0], "nice").is_ok());
    }

    #[test]
    fn test_cluster_id_parse() {
        let id = ClusterId::new();
        let parsed = ClusterId::from_string(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }
}
