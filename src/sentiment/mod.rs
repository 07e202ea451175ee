//! Clause polarity
//!
//! A [`PolarityScorer`] turns text into a compound score in `[-1, 1]`;
//! [`PolarityClassifier`] applies the configured thresholds and the vote
//! override to turn that score into a clause polarity.

pub mod lexicon;

pub use lexicon::LexiconScorer;

use crate::config::PipelineConfig;
use crate::error::{Result, TraitlensError};
use crate::types::{Polarity, Vote};

/// Compound sentiment for a piece of text
pub trait PolarityScorer: Send + Sync {
    /// Score in `[-1, 1]`; negative is disapproving
    fn score(&self, text: &str) -> Result<f32>;
}

/// Threshold classifier for compound scores
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarityClassifier {
    positive_threshold: f32,
    negative_threshold: f32,
}

impl Default for PolarityClassifier {
    fn default() -> Self {
        Self::new(0.15, -0.15)
    }
}

impl PolarityClassifier {
    pub fn new(positive_threshold: f32, negative_threshold: f32) -> Self {
        Self {
            positive_threshold,
            negative_threshold,
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.positive_threshold, config.negative_threshold)
    }

    /// Classify a score; `None` means neutral
    ///
    /// Scores that are not finite or fall outside `[-1, 1]` are rejected
    /// rather than clamped, since they indicate a broken scorer.
    pub fn classify(&self, score: f32) -> Result<Option<Polarity>> {
        if !score.is_finite() || !(-1.0..=1.0).contains(&score) {
            return Err(TraitlensError::Validation(format!(
                "Polarity score {} is outside [-1, 1]",
                score
            )));
        }

        Ok(if score >= self.positive_threshold {
            Some(Polarity::Positive)
        } else if score <= self.negative_threshold {
            Some(Polarity::Negative)
        } else {
            None
        })
    }

    /// Classify a clause score for a submission with the given vote
    ///
    /// A neutral clause under a down-vote counts as negative. Up-votes never
    /// promote neutral clauses.
    pub fn classify_with_vote(&self, score: f32, vote: Vote) -> Result<Option<Polarity>> {
        let polarity = self.classify(score)?;
        Ok(match (polarity, vote) {
            (None, Vote::Down) => Some(Polarity::Negative),
            (polarity, _) => polarity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_are_inclusive() {
        let classifier = PolarityClassifier::default();
        assert_eq!(classifier.classify(0.15).unwrap(), Some(Polarity::Positive));
        assert_eq!(classifier.classify(-0.15).unwrap(), Some(Polarity::Negative));
        assert_eq!(classifier.classify(0.1).unwrap(), None);
        assert_eq!(classifier.classify(0.0).unwrap(), None);
    }

    #[test]
    fn test_custom_thresholds() {
        let classifier = PolarityClassifier::new(0.25, -0.25);
        assert_eq!(classifier.classify(0.2).unwrap(), None);
        assert_eq!(classifier.classify(0.3).unwrap(), Some(Polarity::Positive));
    }

    #[test]
    fn test_down_vote_overrides_neutral_only() {
        let classifier = PolarityClassifier::default();
        assert_eq!(
            classifier.classify_with_vote(0.0, Vote::Down).unwrap(),
            Some(Polarity::Negative)
        );
        // positive text stays positive under a down-vote
        assert_eq!(
            classifier.classify_with_vote(0.6, Vote::Down).unwrap(),
            Some(Polarity::Positive)
        );
        // no symmetric override for up-votes
        assert_eq!(classifier.classify_with_vote(0.0, Vote::Up).unwrap(), None);
        assert_eq!(classifier.classify_with_vote(0.0, Vote::Neutral).unwrap(), None);
    }

    #[test]
    fn test_out_of_range_score_is_an_error() {
        let classifier = PolarityClassifier::default();
        assert!(classifier.classify(1.5).is_err());
        assert!(classifier.classify(f32::NAN).is_err());
        assert!(classifier.classify(f32::NEG_INFINITY).is_err());
    }
}
