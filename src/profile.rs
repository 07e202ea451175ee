//! Candidate profile aggregation
//!
//! Runs every submission through the pipeline, resolves each mention to a
//! trait label (canonicalizer, then the clustering engine when one is
//! attached), and folds the mentions into ranked per-polarity summaries.

use crate::clustering::{ClusterOutcome, TraitClusterer};
use crate::config::TraitlensConfig;
use crate::embeddings::create_embedding_service;
use crate::error::Result;
use crate::pipeline::TraitPipeline;
use crate::storage::create_vector_index;
use crate::types::{CandidateProfile, Polarity, Submission, TraitMention, TraitSummary, Vote, VoteSummary};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, info};

/// Builds [`CandidateProfile`]s from a candidate's full submission history
pub struct ProfileBuilder {
    pipeline: Arc<TraitPipeline>,
    clusterer: Option<Arc<TraitClusterer>>,
    max_examples: usize,
}

impl ProfileBuilder {
    pub fn new(pipeline: Arc<TraitPipeline>, clusterer: Option<Arc<TraitClusterer>>) -> Self {
        let max_examples = pipeline.config().max_examples;
        Self {
            pipeline,
            clusterer,
            max_examples,
        }
    }

    /// Builder wired from configuration: built-in pipeline plus, when
    /// clustering is enabled, the configured embedding service and index
    pub async fn from_config(config: &TraitlensConfig) -> Result<Self> {
        let pipeline = Arc::new(TraitPipeline::with_defaults(config.pipeline.clone())?);
        if !config.clustering.enabled {
            info!("Clustering disabled; using canonical labels");
            return Ok(Self::new(pipeline, None));
        }

        let embedder = create_embedding_service(&config.embedding).await?;
        let index = create_vector_index(&config.index, embedder.dimensions()).await?;
        info!(
            "Clustering with {} ({} dims), threshold {}",
            embedder.model_name(),
            embedder.dimensions(),
            config.clustering.similarity_threshold
        );
        let clusterer = TraitClusterer::new(embedder, index, &config.clustering);
        Ok(Self::new(pipeline, Some(Arc::new(clusterer))))
    }

    pub fn pipeline(&self) -> &TraitPipeline {
        &self.pipeline
    }

    /// Profile with the configured `top_k`
    pub async fn build(&self, submissions: &[Submission]) -> Result<CandidateProfile> {
        self.build_profile(submissions, self.pipeline.config().top_k).await
    }

    /// Profile keeping at most `top_k` traits per polarity
    pub async fn build_profile(&self, submissions: &[Submission], top_k: usize) -> Result<CandidateProfile> {
        let mentions = self.mentions(submissions).await?;
        let (positives, negatives) = aggregate(&mentions, top_k, self.max_examples);

        info!(
            "Built profile from {} submissions: {} mentions, {} positive and {} negative traits",
            submissions.len(),
            mentions.len(),
            positives.len(),
            negatives.len()
        );

        Ok(CandidateProfile {
            vote_summary: VoteSummary::from_submissions(submissions),
            positives,
            negatives,
        })
    }

    /// Every resolved trait mention, in submission order
    ///
    /// Neutral votes and empty comments contribute nothing here; they still
    /// count towards the vote summary. A canonical phrase is clustered once
    /// per call and later mentions of it reuse that label.
    pub async fn mentions(&self, submissions: &[Submission]) -> Result<Vec<TraitMention>> {
        let mut resolved: HashMap<String, String> = HashMap::new();
        let mut mentions = Vec::new();

        for (index, submission) in submissions.iter().enumerate() {
            if submission.vote == Vote::Neutral || submission.comment.trim().is_empty() {
                continue;
            }

            let candidates = self
                .pipeline
                .analyze_comment(&submission.comment, submission.vote, index)?;
            for candidate in candidates {
                let canonical = self.pipeline.canonicalize(&candidate.raw_phrase)?;
                if canonical.is_empty() {
                    debug!("Dropping '{}': no canonical label", candidate.raw_phrase);
                    continue;
                }

                let cached = resolved.get(&canonical).cloned();
                let label = match cached {
                    Some(label) => label,
                    None => {
                        let label = self.resolve(&canonical, &mut resolved).await;
                        if label.trim().is_empty() {
                            continue;
                        }
                        label
                    }
                };

                debug!(
                    "Submission {}: {} '{}' -> '{}'",
                    index, candidate.polarity, candidate.raw_phrase, label
                );
                mentions.push(TraitMention {
                    polarity: candidate.polarity,
                    raw_phrase: candidate.raw_phrase,
                    canonical_label: label,
                    evidence: candidate.evidence,
                });
            }
        }

        Ok(mentions)
    }

    async fn resolve(&self, canonical: &str, resolved: &mut HashMap<String, String>) -> String {
        let Some(clusterer) = &self.clusterer else {
            return canonical.to_string();
        };

        match clusterer.assign(canonical).await {
            ClusterOutcome::Unavailable { label, .. } => label,
            outcome => {
                let label = outcome.label().to_string();
                resolved.insert(canonical.to_string(), label.clone());
                label
            }
        }
    }
}

#[derive(Default)]
struct Tally {
    count: usize,
    examples: Vec<String>,
}

/// Fold mentions into ranked `(positives, negatives)`
///
/// Each bucket is ordered by descending count, ties broken by ascending
/// label, and truncated to `top_k`. Examples are the first `max_examples`
/// distinct evidence strings in mention order.
pub fn aggregate(
    mentions: &[TraitMention],
    top_k: usize,
    max_examples: usize,
) -> (Vec<TraitSummary>, Vec<TraitSummary>) {
    let mut positive: BTreeMap<&str, Tally> = BTreeMap::new();
    let mut negative: BTreeMap<&str, Tally> = BTreeMap::new();

    for mention in mentions {
        let bucket = match mention.polarity {
            Polarity::Positive => &mut positive,
            Polarity::Negative => &mut negative,
        };
        let tally = bucket.entry(mention.canonical_label.as_str()).or_default();
        tally.count += 1;
        if tally.examples.len() < max_examples && !tally.examples.contains(&mention.evidence) {
            tally.examples.push(mention.evidence.clone());
        }
    }

    (rank(positive, top_k), rank(negative, top_k))
}

fn rank(bucket: BTreeMap<&str, Tally>, top_k: usize) -> Vec<TraitSummary> {
    let mut summaries: Vec<TraitSummary> = bucket
        .into_iter()
        .map(|(label, tally)| TraitSummary {
            label: label.to_string(),
            count: tally.count,
            examples: tally.examples,
        })
        .collect();

    summaries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    summaries.truncate(top_k);
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClusteringConfig, PipelineConfig};
    use crate::embeddings::HashedEmbeddingService;
    use crate::error::TraitlensError;
    use crate::storage::{InMemoryVectorIndex, MockVectorIndex, VectorIndex};

    fn mention(polarity: Polarity, label: &str, evidence: &str) -> TraitMention {
        TraitMention {
            polarity,
            raw_phrase: label.to_string(),
            canonical_label: label.to_string(),
            evidence: evidence.to_string(),
        }
    }

    fn builder(clusterer: Option<Arc<TraitClusterer>>) -> ProfileBuilder {
        let pipeline = TraitPipeline::with_defaults(PipelineConfig::default()).unwrap();
        ProfileBuilder::new(Arc::new(pipeline), clusterer)
    }

    #[test]
    fn test_aggregate_ranks_by_count_then_label() {
        let mentions = vec![
            mention(Polarity::Positive, "nice", "a"),
            mention(Polarity::Positive, "chill", "b"),
            mention(Polarity::Positive, "funny", "c"),
            mention(Polarity::Positive, "funny", "d"),
            mention(Polarity::Negative, "rude", "e"),
        ];
        let (pos, neg) = aggregate(&mentions, 8, 3);
        let labels: Vec<_> = pos.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["funny", "chill", "nice"]);
        assert_eq!(pos[0].count, 2);
        assert_eq!(neg.len(), 1);
    }

    #[test]
    fn test_aggregate_examples_are_distinct_and_capped() {
        let mentions: Vec<_> = ["x", "x", "y", "z", "w"]
            .iter()
            .map(|e| mention(Polarity::Negative, "late", e))
            .collect();
        let (_, neg) = aggregate(&mentions, 8, 3);
        assert_eq!(neg[0].count, 5);
        assert_eq!(neg[0].examples, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_aggregate_truncates() {
        let mentions: Vec<_> = (0..10)
            .map(|i| mention(Polarity::Positive, &format!("trait{i}"), "e"))
            .collect();
        let (pos, _) = aggregate(&mentions, 8, 3);
        assert_eq!(pos.len(), 8);
        assert_eq!(pos[0].label, "trait0");
        assert!(aggregate(&mentions, 0, 3).0.is_empty());
    }

    #[tokio::test]
    async fn test_short_comment_profile() {
        let profile = builder(None)
            .build_profile(&[Submission::new(1, "chiller").unwrap()], 8)
            .await
            .unwrap();

        assert_eq!(profile.positives.len(), 1);
        assert_eq!(profile.positives[0].label, "chill");
        assert_eq!(profile.positives[0].count, 1);
        assert_eq!(profile.positives[0].examples, vec!["chiller"]);
        assert!(profile.negatives.is_empty());
    }

    #[tokio::test]
    async fn test_neutral_votes_only_count_in_summary() {
        let submissions = vec![
            Submission::new(1, "nice").unwrap(),
            Submission::new(-1, "rude").unwrap(),
            Submission::new(0, "").unwrap(),
            Submission::new(0, "really funny").unwrap(),
        ];
        let profile = builder(None).build(&submissions).await.unwrap();

        assert_eq!(profile.vote_summary.yes, 1);
        assert_eq!(profile.vote_summary.no, 1);
        assert_eq!(profile.vote_summary.neutral, 2);
        assert_eq!(profile.vote_summary.score, 0);
        assert!(profile.positives.iter().all(|s| s.label != "funny"));
    }

    #[tokio::test]
    async fn test_hedged_down_vote_adds_no_praise() {
        let profile = builder(None)
            .build(&[Submission::new(-1, "He is kind of rude to everyone in class").unwrap()])
            .await
            .unwrap();

        let negatives: Vec<&str> = profile.negatives.iter().map(|s| s.label.as_str()).collect();
        assert!(negatives.contains(&"rude"), "negatives: {:?}", negatives);
        assert!(!negatives.contains(&"nice"), "negatives: {:?}", negatives);
        assert!(!negatives.contains(&"everyone"), "negatives: {:?}", negatives);
        assert!(profile.positives.is_empty());
    }

    #[tokio::test]
    async fn test_up_voted_praise_becomes_positive_traits() {
        let profile = builder(None)
            .build(&[
                Submission::new(1, "He is the nicest person in our class").unwrap(),
                Submission::new(1, "She is very outgoing and curious about everything").unwrap(),
                Submission::new(1, "Such a laid-back and easy going teammate").unwrap(),
            ])
            .await
            .unwrap();

        let positives: Vec<&str> = profile.positives.iter().map(|s| s.label.as_str()).collect();
        for label in ["nice", "outgoing", "curious", "chill"] {
            assert!(positives.contains(&label), "positives: {:?}", positives);
        }
        assert!(profile.negatives.is_empty());
    }

    #[tokio::test]
    async fn test_clustering_merges_labels() {
        let embedder = Arc::new(HashedEmbeddingService::new(128));
        let index = Arc::new(InMemoryVectorIndex::new(128));
        let clusterer = TraitClusterer::new(embedder, index.clone(), &ClusteringConfig::default());
        let builder = builder(Some(Arc::new(clusterer)));

        let submissions = vec![
            Submission::new(1, "very punctual").unwrap(),
            Submission::new(1, "punctual").unwrap(),
        ];
        let profile = builder.build(&submissions).await.unwrap();
        assert_eq!(profile.positives.len(), 1);
        assert_eq!(profile.positives[0].count, 2);
        assert_eq!(index.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_index_outage_uses_canonical_labels() {
        let mut index = MockVectorIndex::new();
        index.expect_dimensions().return_const(64usize);
        index
            .expect_search()
            .returning(|_, _| Err(TraitlensError::Index("unreachable".to_string())));

        let clusterer = TraitClusterer::new(
            Arc::new(HashedEmbeddingService::new(64)),
            Arc::new(index),
            &ClusteringConfig::default(),
        );
        let profile = builder(Some(Arc::new(clusterer)))
            .build(&[Submission::new(-1, "rude").unwrap()])
            .await
            .unwrap();

        assert_eq!(profile.negatives[0].label, "rude");
    }
}
