//! Clause segmentation
//!
//! A comment is split into sentences by the linguistic analyzer, and every
//! sentence is split again on contrast markers so that "nice but rude" is
//! scored as two clauses instead of one net-neutral sentence.

use crate::error::Result;
use crate::nlp::LinguisticAnalyzer;
use crate::text::collapse_whitespace;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

/// Words that signal a sentiment shift within a sentence
pub const CONTRAST_MARKERS: &[&str] = &["but", "however", "though", "although", "sometimes"];

static CONTRAST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)\b(?:{})\b", CONTRAST_MARKERS.join("|")))
        .expect("Valid contrast regex")
});

/// Split a sentence on contrast markers, dropping the markers themselves
///
/// ```
/// use traitlens_core::pipeline::segmenter::split_on_contrast;
/// assert_eq!(
///     split_on_contrast("She is nice but sometimes rude"),
///     vec!["She is nice", "rude"]
/// );
/// ```
pub fn split_on_contrast(sentence: &str) -> Vec<String> {
    CONTRAST
        .split(sentence)
        .map(collapse_whitespace)
        .filter(|fragment| !fragment.is_empty())
        .collect()
}

/// Sentence splitting followed by contrast splitting
pub struct ClauseSegmenter {
    analyzer: Arc<dyn LinguisticAnalyzer>,
}

impl ClauseSegmenter {
    pub fn new(analyzer: Arc<dyn LinguisticAnalyzer>) -> Self {
        Self { analyzer }
    }

    /// Ordered clause strings for one comment
    pub fn segment(&self, comment: &str) -> Result<Vec<String>> {
        let analysis = self.analyzer.analyze(comment)?;
        Ok(analysis
            .sentence_texts()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .flat_map(split_on_contrast)
            .collect())
    }
}
