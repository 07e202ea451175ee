//! Feedback-to-trait pipeline
//!
//! Turns one comment into trait mention candidates:
//!
//! ```text
//! comment ─┬─ short (≤ N words) ──────────────► [comment as trait, vote polarity]
//!          └─ sentences ─► contrast clauses ─► polarity ─► phrases
//! ```
//!
//! Canonicalization is exposed separately so the aggregator can run it per
//! mention and hand the result to the clustering engine.

pub mod canonical;
pub mod extractor;
pub mod segmenter;
pub mod synonyms;

pub use canonical::Canonicalizer;
pub use extractor::PhraseExtractor;
pub use segmenter::ClauseSegmenter;
pub use synonyms::SynonymTable;

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::nlp::{LinguisticAnalyzer, RuleBasedAnalyzer};
use crate::sentiment::{LexiconScorer, PolarityClassifier, PolarityScorer};
use crate::text::word_count;
use crate::types::{Clause, MentionCandidate, Vote};
use std::sync::Arc;
use tracing::debug;

/// Per-comment analysis, stateless apart from its injected collaborators
pub struct TraitPipeline {
    config: PipelineConfig,
    classifier: PolarityClassifier,
    scorer: Arc<dyn PolarityScorer>,
    segmenter: ClauseSegmenter,
    extractor: PhraseExtractor,
    canonicalizer: Canonicalizer,
}

impl TraitPipeline {
    pub fn new(
        config: PipelineConfig,
        analyzer: Arc<dyn LinguisticAnalyzer>,
        scorer: Arc<dyn PolarityScorer>,
        synonyms: Arc<SynonymTable>,
    ) -> Self {
        Self {
            classifier: PolarityClassifier::from_config(&config),
            segmenter: ClauseSegmenter::new(Arc::clone(&analyzer)),
            extractor: PhraseExtractor::new(
                Arc::clone(&analyzer),
                Arc::clone(&synonyms),
                config.max_chunk_words,
            ),
            canonicalizer: Canonicalizer::new(analyzer, synonyms, config.max_label_tokens),
            scorer,
            config,
        }
    }

    /// Pipeline with the built-in analyzer, scorer, and synonym table
    /// (extended by `synonyms_path` when configured)
    pub fn with_defaults(config: PipelineConfig) -> Result<Self> {
        let synonyms = SynonymTable::load(config.synonyms_path.as_deref())?;
        let analyzer: Arc<dyn LinguisticAnalyzer> = Arc::new(RuleBasedAnalyzer::new());
        let scorer = LexiconScorer::with_analyzer(Arc::clone(&analyzer));
        Ok(Self::new(config, analyzer, Arc::new(scorer), Arc::new(synonyms)))
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn canonicalizer(&self) -> &Canonicalizer {
        &self.canonicalizer
    }

    pub fn canonicalize(&self, phrase: &str) -> Result<String> {
        self.canonicalizer.canonicalize(phrase)
    }

    /// Is this comment handled by the short-comment rule?
    pub fn is_short(&self, comment: &str) -> bool {
        word_count(comment) <= self.config.short_comment_max_words
    }

    /// Scored clauses of a comment, in order
    pub fn clauses(&self, comment: &str, vote: Vote, comment_index: usize) -> Result<Vec<Clause>> {
        let mut clauses = Vec::new();
        for text in self.segmenter.segment(comment)? {
            let score = self.scorer.score(&text)?;
            let polarity = self.classifier.classify_with_vote(score, vote)?;
            debug!("Clause {:?}: score={:.3} polarity={:?}", text, score, polarity);
            clauses.push(Clause {
                text,
                polarity,
                comment_index,
            });
        }
        Ok(clauses)
    }

    /// Trait mention candidates for the comment of submission `comment_index`
    ///
    /// Empty comments yield nothing. Comments of at most
    /// `short_comment_max_words` words are taken whole as the trait with the
    /// vote's polarity. Longer comments go through clause segmentation,
    /// scoring, and phrase extraction; neutral clauses are skipped.
    pub fn analyze_comment(
        &self,
        comment: &str,
        vote: Vote,
        comment_index: usize,
    ) -> Result<Vec<MentionCandidate>> {
        let comment = comment.trim();
        if comment.is_empty() {
            return Ok(Vec::new());
        }

        if self.is_short(comment) {
            return Ok(match vote.polarity() {
                Some(polarity) if self.long_enough(comment) => vec![MentionCandidate {
                    polarity,
                    raw_phrase: comment.to_string(),
                    evidence: comment.to_string(),
                }],
                _ => Vec::new(),
            });
        }

        let mut mentions = Vec::new();
        for clause in self.clauses(comment, vote, comment_index)? {
            let Some(polarity) = clause.polarity else {
                continue;
            };
            for phrase in self.extractor.extract(&clause.text)? {
                if !self.long_enough(&phrase) {
                    continue;
                }
                mentions.push(MentionCandidate {
                    polarity,
                    raw_phrase: phrase,
                    evidence: clause.text.clone(),
                });
            }
        }

        debug!("Comment {} yielded {} mention candidates", comment_index, mentions.len());
        Ok(mentions)
    }

    fn long_enough(&self, phrase: &str) -> bool {
        phrase.chars().count() >= self.config.min_phrase_chars
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Polarity;

    fn pipeline() -> TraitPipeline {
        TraitPipeline::with_defaults(PipelineConfig::default()).unwrap()
    }

    #[test]
    fn test_empty_comment() {
        assert!(pipeline().analyze_comment("   ", Vote::Up, 0).unwrap().is_empty());
    }

    #[test]
    fn test_short_comment_uses_vote() {
        let p = pipeline();
        let up = p.analyze_comment("chiller", Vote::Up, 0).unwrap();
        assert_eq!(
            up,
            vec![MentionCandidate {
                polarity: Polarity::Positive,
                raw_phrase: "chiller".to_string(),
                evidence: "chiller".to_string(),
            }]
        );

        let down = p.analyze_comment("kind of rude", Vote::Down, 0).unwrap();
        assert_eq!(down[0].polarity, Polarity::Negative);
        assert_eq!(down[0].evidence, "kind of rude");

        assert!(p.analyze_comment("nice", Vote::Neutral, 0).unwrap().is_empty());
        // too short to be a trait
        assert!(p.analyze_comment("ok", Vote::Up, 0).unwrap().is_empty());
    }

    #[test]
    fn test_contrast_split_yields_both_polarities() {
        let mentions = pipeline()
            .analyze_comment("She is nice but sometimes rude", Vote::Down, 0)
            .unwrap();

        let positive: Vec<_> = mentions.iter().filter(|m| m.polarity == Polarity::Positive).collect();
        let negative: Vec<_> = mentions.iter().filter(|m| m.polarity == Polarity::Negative).collect();
        assert!(positive.iter().any(|m| m.raw_phrase == "nice" && m.evidence == "She is nice"));
        assert!(negative.iter().any(|m| m.raw_phrase == "rude" && m.evidence == "rude"));
    }

    #[test]
    fn test_neutral_clause_overridden_by_down_vote() {
        let p = pipeline();
        let comment = "He attends every single lab session";
        assert!(p.analyze_comment(comment, Vote::Up, 0).unwrap().is_empty());

        let down = p.analyze_comment(comment, Vote::Down, 0).unwrap();
        assert!(!down.is_empty());
        assert!(down.iter().all(|m| m.polarity == Polarity::Negative));
    }

    #[test]
    fn test_clauses_keep_order_and_provenance() {
        let clauses = pipeline()
            .clauses("Great teammate. Funny but rude", Vote::Up, 7)
            .unwrap();
        let texts: Vec<&str> = clauses.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["Great teammate.", "Funny", "rude"]);
        assert!(clauses.iter().all(|c| c.comment_index == 7));
        assert_eq!(clauses[0].polarity, Some(Polarity::Positive));
        assert_eq!(clauses[2].polarity, Some(Polarity::Negative));
    }

    #[test]
    fn test_vocabulary_phrase_in_long_comment() {
        let mentions = pipeline()
            .analyze_comment("He always talks over people in meetings, which is annoying", Vote::Down, 0)
            .unwrap();
        let p = pipeline();
        let labels: Vec<String> = mentions
            .iter()
            .map(|m| p.canonicalize(&m.raw_phrase).unwrap())
            .collect();
        assert!(labels.contains(&"interrupts".to_string()));
        assert!(labels.contains(&"annoying".to_string()));
    }

    #[test]
    fn test_praise_in_long_comments_is_positive() {
        let p = pipeline();
        for (comment, label) in [
            ("He is the nicest person in our class", "nice"),
            ("She is very outgoing and curious about everything", "outgoing"),
            ("Such a laid-back and easy going teammate", "chill"),
        ] {
            let labels: Vec<String> = p
                .analyze_comment(comment, Vote::Up, 3)
                .unwrap()
                .iter()
                .filter(|m| m.polarity == Polarity::Positive)
                .map(|m| p.canonicalize(&m.raw_phrase).unwrap())
                .collect();
            assert!(labels.contains(&label.to_string()), "{}: {:?}", comment, labels);
        }
    }
}
