//! Canonicalization of raw trait phrases
//!
//! A phrase is reduced to at most a few content lemmas and then folded into
//! the controlled vocabulary. Lookup order:
//!
//! 1. phrase map, on the normalized raw phrase
//! 2. phrase map, on the cleaned lemma string
//! 3. word map, on the cleaned string and then the raw word (single words only)
//! 4. the cleaned string unchanged
//!
//! Checking the raw phrase first keeps every table key mapping to its own
//! label even when lemmatization or stopword removal would reshape it
//! ("doesn't listen" loses "doesn't" as a stopword).

use crate::error::Result;
use crate::nlp::LinguisticAnalyzer;
use crate::pipeline::synonyms::SynonymTable;
use crate::text::normalize_phrase;
use std::sync::Arc;

/// Intensifiers, hedges, and person nouns that never carry the trait itself
pub const FILLER_WORDS: &[&str] = &[
    "very", "really", "pretty", "kind", "sort", "somewhat", "sometimes", "guy", "person", "kid",
    "student", "dude", "man", "woman",
];

pub struct Canonicalizer {
    analyzer: Arc<dyn LinguisticAnalyzer>,
    synonyms: Arc<SynonymTable>,
    max_tokens: usize,
}

impl Canonicalizer {
    pub fn new(
        analyzer: Arc<dyn LinguisticAnalyzer>,
        synonyms: Arc<SynonymTable>,
        max_tokens: usize,
    ) -> Self {
        Self {
            analyzer,
            synonyms,
            max_tokens,
        }
    }

    pub fn synonyms(&self) -> &SynonymTable {
        &self.synonyms
    }

    /// Canonical label for a raw phrase; empty only if the phrase has no words
    pub fn canonicalize(&self, phrase: &str) -> Result<String> {
        let raw = normalize_phrase(phrase);
        if let Some(label) = self.synonyms.phrase(&raw) {
            return Ok(label.to_string());
        }

        let cleaned = self.clean(phrase)?.unwrap_or_else(|| raw.clone());
        if let Some(label) = self.synonyms.phrase(&cleaned) {
            return Ok(label.to_string());
        }

        if !cleaned.contains(' ') {
            if let Some(label) = self.synonyms.word(&cleaned) {
                return Ok(label.to_string());
            }
            if !raw.contains(' ') {
                if let Some(label) = self.synonyms.word(&raw) {
                    return Ok(label.to_string());
                }
            }
        }

        Ok(cleaned)
    }

    /// Content lemmas joined by spaces, or `None` if nothing survives filtering
    fn clean(&self, phrase: &str) -> Result<Option<String>> {
        let analysis = self.analyzer.analyze(phrase)?;
        let lemmas: Vec<String> = analysis
            .tokens
            .iter()
            .filter(|token| !token.is_stop)
            .map(|token| normalize_phrase(&token.lemma))
            .filter(|lemma| !lemma.is_empty() && !FILLER_WORDS.contains(&lemma.as_str()))
            .take(self.max_tokens)
            .collect();

        Ok(if lemmas.is_empty() {
            None
        } else {
            Some(lemmas.join(" "))
        })
    }
}
