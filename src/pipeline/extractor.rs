//! Trait-phrase extraction from a polarity-bearing clause

use crate::error::Result;
use crate::nlp::{Analysis, LinguisticAnalyzer, PosTag, Span};
use crate::pipeline::synonyms::SynonymTable;
use crate::text::{normalize_phrase, word_count};
use std::sync::Arc;

/// Noun chunks that name the person rather than describe them
pub const GENERIC_REFERENTS: &[&str] = &[
    "he", "she", "they", "him", "her", "them", "person", "guy", "kid", "student", "people",
];

/// Pulls candidate trait phrases out of a clause
///
/// Candidates come from, in order: noun chunks, adjective lemmas,
/// descriptive "-er" nouns ("chiller", "talker"), and multi-word entries of
/// the controlled vocabulary that occur verbatim in the clause
/// ("talks over people"). The result is deduplicated in first-seen order.
pub struct PhraseExtractor {
    analyzer: Arc<dyn LinguisticAnalyzer>,
    synonyms: Arc<SynonymTable>,
    max_chunk_words: usize,
}

impl PhraseExtractor {
    pub fn new(
        analyzer: Arc<dyn LinguisticAnalyzer>,
        synonyms: Arc<SynonymTable>,
        max_chunk_words: usize,
    ) -> Self {
        Self {
            analyzer,
            synonyms,
            max_chunk_words,
        }
    }

    pub fn extract(&self, clause: &str) -> Result<Vec<String>> {
        let analysis = self.analyzer.analyze(clause)?;
        let mut phrases = Vec::new();

        for (span, chunk) in analysis.noun_chunks.iter().zip(analysis.noun_chunk_texts()) {
            let text = normalize_phrase(chunk);
            if text.is_empty()
                || GENERIC_REFERENTS.contains(&text.as_str())
                || word_count(&text) > self.max_chunk_words
                || describes_nothing(&analysis, *span)
            {
                continue;
            }
            push_unique(&mut phrases, text);
        }

        for token in &analysis.tokens {
            if token.pos == PosTag::Adj {
                push_unique(&mut phrases, normalize_phrase(&token.lemma));
            }
        }

        for token in &analysis.tokens {
            if token.pos.is_nominal() {
                let text = normalize_phrase(&token.text);
                if text.len() > 2 && text.ends_with("er") {
                    push_unique(&mut phrases, text);
                }
            }
        }

        self.push_vocabulary_phrases(&normalize_phrase(clause), &mut phrases);

        Ok(phrases)
    }

    /// Longest-first, non-overlapping vocabulary matches not already covered
    fn push_vocabulary_phrases(&self, clause: &str, phrases: &mut Vec<String>) {
        let mut taken: Vec<(usize, usize)> = Vec::new();

        for key in self.synonyms.multi_word_phrases() {
            let Some(start) = find_words(clause, key) else {
                continue;
            };
            let end = start + key.len();
            if taken.iter().any(|&(s, e)| start < e && s < end) {
                continue;
            }
            taken.push((start, end));
            if phrases.iter().any(|p| find_words(p, key).is_some()) {
                continue;
            }
            push_unique(phrases, key.to_string());
        }
    }
}

fn push_unique(phrases: &mut Vec<String>, phrase: String) {
    if !phrase.is_empty() && !phrases.contains(&phrase) {
        phrases.push(phrase);
    }
}

/// Byte offset of `needle` in `haystack` when it starts and ends on word boundaries
fn find_words(haystack: &str, needle: &str) -> Option<usize> {
    let padded = format!(" {} ", haystack);
    padded.find(&format!(" {} ", needle))
}

/// Chunks made only of stopwords and pronouns ("what", "everyone")
fn describes_nothing(analysis: &Analysis, span: Span) -> bool {
    analysis
        .tokens
        .iter()
        .filter(|t| t.span.start >= span.start && t.span.end <= span.end)
        .all(|t| t.is_stop || matches!(t.pos, PosTag::Punct | PosTag::Pron))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::RuleBasedAnalyzer;

    fn extractor() -> PhraseExtractor {
        PhraseExtractor::new(
            Arc::new(RuleBasedAnalyzer::new()),
            Arc::new(SynonymTable::builtin().unwrap()),
            5,
        )
    }

    #[test]
    fn test_chunks_then_adjectives() {
        let phrases = extractor().extract("He is a really nice guy").unwrap();
        assert_eq!(phrases, vec!["a really nice guy", "nice"]);
    }

    #[test]
    fn test_generic_referents_dropped() {
        let phrases = extractor().extract("She helps people").unwrap();
        assert!(!phrases.iter().any(|p| p == "she" || p == "people"));
    }

    #[test]
    fn test_pronoun_chunks_dropped() {
        let phrases = extractor().extract("rude to everyone and ignores somebody").unwrap();
        assert!(phrases.contains(&"rude".to_string()));
        assert!(!phrases.iter().any(|p| p == "everyone" || p == "somebody"));
    }

    #[test]
    fn test_hedge_is_not_an_adjective() {
        let phrases = extractor().extract("He is kind of rude to everyone in class").unwrap();
        assert!(phrases.contains(&"rude".to_string()));
        assert!(!phrases.contains(&"kind".to_string()));
    }

    #[test]
    fn test_adjective_lemmas() {
        let phrases = extractor().extract("the funniest and kindest").unwrap();
        assert!(phrases.contains(&"funny".to_string()));
        assert!(phrases.contains(&"kind".to_string()));
    }

    #[test]
    fn test_er_nouns() {
        let phrases = extractor().extract("honestly such a talker").unwrap();
        assert!(phrases.contains(&"such a talker".to_string()) || phrases.contains(&"talker".to_string()));
        let phrases = extractor().extract("total chiller").unwrap();
        assert!(phrases.contains(&"chiller".to_string()));
    }

    #[test]
    fn test_long_chunks_dropped() {
        let extractor = PhraseExtractor::new(
            Arc::new(RuleBasedAnalyzer::new()),
            Arc::new(SynonymTable::builtin().unwrap()),
            2,
        );
        let phrases = extractor.extract("a very kind helpful patient teammate").unwrap();
        assert!(!phrases.iter().any(|p| word_count(p) > 2));
        assert!(phrases.contains(&"kind".to_string()));
    }

    #[test]
    fn test_vocabulary_phrases_longest_first() {
        let phrases = extractor().extract("always talks over people in meetings").unwrap();
        assert!(phrases.contains(&"talks over people".to_string()));
        assert!(!phrases.contains(&"talks over".to_string()));
    }

    #[test]
    fn test_vocabulary_phrase_inside_chunk_not_repeated() {
        let phrases = extractor().extract("a really nice guy").unwrap();
        assert!(!phrases.contains(&"really nice".to_string()));
        assert!(!phrases.contains(&"nice guy".to_string()));
    }

    #[test]
    fn test_dedup_preserves_order() {
        let phrases = extractor().extract("nice, nice and nice").unwrap();
        assert_eq!(phrases, vec!["nice"]);
    }

    #[test]
    fn test_find_words_respects_boundaries() {
        assert_eq!(find_words("talks over people", "talks over"), Some(0));
        assert_eq!(find_words("he talks overly", "talks over"), None);
        assert_eq!(find_words("x on time", "on time"), Some(2));
    }
}
