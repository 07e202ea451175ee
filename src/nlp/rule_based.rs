//! Rule-based linguistic analyzer
//!
//! Tags tokens with dictionary lookups, suffix heuristics, and a one-token
//! look-behind, then groups `(DET)? (ADV* ADJ | NUM)* (NOUN|PROPN)+` runs
//! (and bare pronouns) into noun chunks. It is a best-effort tagger tuned for
//! short feedback comments, not a general-purpose parser.

use crate::error::Result;
use crate::nlp::dictionaries::LexicalDictionaries as Dict;
use crate::nlp::{Analysis, LinguisticAnalyzer, PosTag, Span, Token};
use once_cell::sync::Lazy;
use regex::Regex;

/// Words (with inner apostrophes or hyphens) or single punctuation marks
static TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{L}\p{N}]+(?:['’][\p{L}]+)*(?:-[\p{L}\p{N}]+)*|[^\s\p{L}\p{N}]")
        .expect("Valid token regex")
});

/// A run of non-terminal characters plus its terminal punctuation
static SENTENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^.!?]+[.!?]*|[.!?]+").expect("Valid sentence regex"));

/// Suffixes that mark unknown words as adjectives
const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "ive", "able", "ible", "less", "ish", "ic"];

/// Dictionary-driven analyzer; stateless and cheap to share
#[derive(Debug, Clone, Default)]
pub struct RuleBasedAnalyzer;

impl RuleBasedAnalyzer {
    pub fn new() -> Self {
        Self
    }

    fn split_sentences(text: &str) -> Vec<Span> {
        SENTENCE
            .find_iter(text)
            .filter_map(|m| {
                let raw = m.as_str();
                let leading = raw.len() - raw.trim_start().len();
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return None;
                }
                let start = m.start() + leading;
                Some(Span::new(start, start + trimmed.len()))
            })
            .collect()
    }

    fn tokenize(text: &str) -> Vec<Token> {
        let mut tokens: Vec<Token> = Vec::new();

        for m in TOKEN.find_iter(text) {
            let original = m.as_str();
            let lower = original.to_lowercase().replace('’', "'");
            let sentence_start = tokens
                .last()
                .map_or(true, |prev| matches!(prev.text.as_str(), "." | "!" | "?"));
            let prev_pos = tokens.last().map(|t| t.pos);

            let pos = tag_word(&lower, original, sentence_start, prev_pos);
            let lemma = lemmatize(&lower, pos);
            let is_stop = Dict::stopwords().contains(lower.as_str())
                || Dict::stopwords().contains(lower.replace('\'', "").as_str());

            tokens.push(Token {
                text: original.to_string(),
                lemma,
                pos,
                is_stop,
                span: Span::new(m.start(), m.end()),
            });
        }

        // possessive "her" before a nominal phrase behaves like a determiner
        for i in 0..tokens.len().saturating_sub(1) {
            if tokens[i].pos == PosTag::Pron
                && tokens[i].text.eq_ignore_ascii_case("her")
                && matches!(tokens[i + 1].pos, PosTag::Noun | PosTag::Propn | PosTag::Adj)
            {
                tokens[i].pos = PosTag::Det;
            }
            // "kind of", "sort of" are hedges
            if matches!(tokens[i].text.to_lowercase().as_str(), "kind" | "sort")
                && tokens[i + 1].text.eq_ignore_ascii_case("of")
            {
                tokens[i].pos = PosTag::Adv;
            }
        }

        tokens
    }

    fn noun_chunks(tokens: &[Token]) -> Vec<Span> {
        let mut chunks = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            if tokens[i].pos == PosTag::Pron {
                chunks.push(tokens[i].span);
                i += 1;
                continue;
            }

            let start = i;
            let mut j = i;
            if tokens[j].pos == PosTag::Det {
                j += 1;
            }
            let modifiers_start = j;
            while j < tokens.len() && matches!(tokens[j].pos, PosTag::Adv | PosTag::Adj | PosTag::Num) {
                j += 1;
            }

            if j < tokens.len() && tokens[j].pos.is_nominal() {
                let mut end = j;
                while end < tokens.len() && tokens[end].pos.is_nominal() {
                    end += 1;
                }

                // adverbs only belong to the chunk when they modify an adjective
                let mut chunk_start = start;
                let has_adjective = tokens[modifiers_start..j].iter().any(|t| t.pos == PosTag::Adj);
                if !has_adjective {
                    while chunk_start < j && tokens[chunk_start].pos == PosTag::Adv {
                        chunk_start += 1;
                    }
                }

                chunks.push(Span::new(tokens[chunk_start].span.start, tokens[end - 1].span.end));
                i = end;
            } else {
                i += 1;
            }
        }

        chunks
    }
}

impl LinguisticAnalyzer for RuleBasedAnalyzer {
    fn analyze(&self, text: &str) -> Result<Analysis> {
        let sentences = Self::split_sentences(text);
        let tokens = Self::tokenize(text);
        let noun_chunks = Self::noun_chunks(&tokens);

        Ok(Analysis {
            text: text.to_string(),
            sentences,
            tokens,
            noun_chunks,
        })
    }
}

fn tag_word(lower: &str, original: &str, sentence_start: bool, prev: Option<PosTag>) -> PosTag {
    if !lower.chars().any(char::is_alphanumeric) {
        return PosTag::Punct;
    }
    if lower.chars().all(|c| c.is_ascii_digit()) || Dict::number_words().contains(lower) {
        return PosTag::Num;
    }
    if Dict::pronouns().contains(lower) {
        return PosTag::Pron;
    }
    if Dict::determiners().contains(lower) {
        return PosTag::Det;
    }
    if Dict::auxiliaries().contains(lower) {
        return PosTag::Aux;
    }
    if Dict::particles().contains(lower) {
        return PosTag::Part;
    }
    if Dict::coordinating_conjunctions().contains(lower) {
        return PosTag::CConj;
    }
    if Dict::subordinating_conjunctions().contains(lower) {
        return PosTag::SConj;
    }
    if Dict::adpositions().contains(lower) {
        return PosTag::Adp;
    }
    if Dict::nouns().contains(lower) || Dict::irregular_nouns().contains_key(lower) {
        return PosTag::Noun;
    }
    if adjective_base(lower).is_some() {
        return PosTag::Adj;
    }
    if Dict::adverbs().contains(lower) {
        return PosTag::Adv;
    }

    let verb_form = verb_base(lower).is_some();
    let plural_noun = Dict::nouns().contains(singular(lower).as_str());
    match (verb_form, plural_noun) {
        // "works", "jokes": a preceding subject makes it a verb
        (true, true) => {
            return if matches!(prev, Some(PosTag::Pron | PosTag::Noun | PosTag::Propn | PosTag::Adv)) {
                PosTag::Verb
            } else {
                PosTag::Noun
            };
        }
        (true, false) => return PosTag::Verb,
        (false, true) => return PosTag::Noun,
        (false, false) => {}
    }

    if lower.len() > 4 && lower.ends_with("ly") {
        return PosTag::Adv;
    }
    if ADJECTIVE_SUFFIXES.iter().any(|suffix| lower.len() > suffix.len() + 2 && lower.ends_with(suffix)) {
        return PosTag::Adj;
    }
    if prev == Some(PosTag::Aux) && (lower.ends_with("ed") || lower.ends_with("ing")) {
        return PosTag::Verb;
    }
    if !sentence_start && original.chars().next().is_some_and(char::is_uppercase) {
        return PosTag::Propn;
    }

    PosTag::Noun
}

fn lemmatize(lower: &str, pos: PosTag) -> String {
    match pos {
        PosTag::Aux => Dict::auxiliary_lemmas()
            .get(lower)
            .map(|s| s.to_string())
            .unwrap_or_else(|| lower.to_string()),
        PosTag::Verb => verb_base(lower).unwrap_or_else(|| lower.to_string()),
        PosTag::Noun | PosTag::Propn => {
            if let Some(lemma) = Dict::irregular_nouns().get(lower) {
                lemma.to_string()
            } else if Dict::nouns().contains(lower) {
                lower.to_string()
            } else {
                singular(lower)
            }
        }
        PosTag::Adj => adjective_base(lower).unwrap_or_else(|| lower.to_string()),
        _ => lower.to_string(),
    }
}

/// Base form of a known adjective, including regular comparatives and superlatives
fn adjective_base(word: &str) -> Option<String> {
    let adjectives = Dict::adjectives();
    if adjectives.contains(word) {
        return Some(word.to_string());
    }
    if let Some(base) = Dict::irregular_adjectives().get(word) {
        return Some(base.to_string());
    }

    for suffix in ["est", "er"] {
        let Some(stem) = word.strip_suffix(suffix) else {
            continue;
        };
        // funnier -> funny
        if let Some(y_stem) = stem.strip_suffix('i') {
            let candidate = format!("{}y", y_stem);
            if adjectives.contains(candidate.as_str()) {
                return Some(candidate);
            }
        }
        // nicer -> nice
        let with_e = format!("{}e", stem);
        if adjectives.contains(with_e.as_str()) {
            return Some(with_e);
        }
        if adjectives.contains(stem) {
            return Some(stem.to_string());
        }
        // bigger -> big
        if let Some(undoubled) = undouble(stem) {
            if adjectives.contains(undoubled) {
                return Some(undoubled.to_string());
            }
        }
    }

    None
}

/// Base form of a known verb from its inflected form
fn verb_base(word: &str) -> Option<String> {
    let verbs = Dict::verbs();
    if verbs.contains(word) {
        return Some(word.to_string());
    }
    if let Some(base) = Dict::irregular_verbs().get(word) {
        return Some(base.to_string());
    }

    let mut candidates: Vec<String> = Vec::new();
    if let Some(stem) = word.strip_suffix("ies") {
        candidates.push(format!("{}y", stem));
    }
    if let Some(stem) = word.strip_suffix("es") {
        candidates.push(stem.to_string());
    }
    if let Some(stem) = word.strip_suffix('s') {
        candidates.push(stem.to_string());
    }
    if let Some(stem) = word.strip_suffix("ied") {
        candidates.push(format!("{}y", stem));
    }
    for suffix in ["ing", "ed"] {
        if let Some(stem) = word.strip_suffix(suffix) {
            candidates.push(stem.to_string());
            candidates.push(format!("{}e", stem));
            if let Some(undoubled) = undouble(stem) {
                candidates.push(undoubled.to_string());
            }
        }
    }
    if let Some(stem) = word.strip_suffix('d') {
        candidates.push(stem.to_string());
    }

    candidates.into_iter().find(|c| !c.is_empty() && verbs.contains(c.as_str()))
}

/// Singular form of a regular plural noun
fn singular(word: &str) -> String {
    if word.len() <= 3 {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix("ies") {
        return format!("{}y", stem);
    }
    for suffix in ["sses", "shes", "ches", "xes", "zes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    if word.ends_with('s') && !word.ends_with("ss") && !word.ends_with("us") && !word.ends_with("is") {
        return word[..word.len() - 1].to_string();
    }
    word.to_string()
}

/// "stopp" -> "stop"
fn undouble(stem: &str) -> Option<&str> {
    let bytes = stem.as_bytes();
    let n = bytes.len();
    if n >= 3 && bytes[n - 1] == bytes[n - 2] && bytes[n - 1].is_ascii_alphabetic() {
        Some(&stem[..n - 1])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(text: &str) -> Analysis {
        RuleBasedAnalyzer::new().analyze(text).unwrap()
    }

    fn pos_of(analysis: &Analysis, word: &str) -> PosTag {
        analysis
            .tokens
            .iter()
            .find(|t| t.text == word)
            .map(|t| t.pos)
            .unwrap()
    }

    #[test]
    fn test_sentence_split() {
        let analysis = analyze("Great guy!! Always helps out.  Sometimes late");
        let sentences: Vec<&str> = analysis.sentence_texts().collect();
        assert_eq!(sentences, vec!["Great guy!!", "Always helps out.", "Sometimes late"]);
    }

    #[test]
    fn test_basic_tags() {
        let analysis = analyze("She is nice but sometimes rude");
        assert_eq!(pos_of(&analysis, "She"), PosTag::Pron);
        assert_eq!(pos_of(&analysis, "is"), PosTag::Aux);
        assert_eq!(pos_of(&analysis, "nice"), PosTag::Adj);
        assert_eq!(pos_of(&analysis, "but"), PosTag::CConj);
        assert_eq!(pos_of(&analysis, "sometimes"), PosTag::Adv);
        assert_eq!(pos_of(&analysis, "rude"), PosTag::Adj);
    }

    #[test]
    fn test_lemmas() {
        let analysis = analyze("He talks over teammates and was the nicest of the chillers");
        let lemma = |w: &str| {
            analysis
                .tokens
                .iter()
                .find(|t| t.text == w)
                .map(|t| t.lemma.clone())
                .unwrap()
        };
        assert_eq!(lemma("talks"), "talk");
        assert_eq!(lemma("teammates"), "teammate");
        assert_eq!(lemma("was"), "be");
        assert_eq!(lemma("nicest"), "nice");
        assert_eq!(lemma("chillers"), "chiller");
    }

    #[test]
    fn test_slang_er_noun_stays_noun() {
        let analysis = analyze("what a chiller");
        assert_eq!(pos_of(&analysis, "chiller"), PosTag::Noun);
        assert_eq!(analysis.tokens.last().unwrap().lemma, "chiller");
    }

    #[test]
    fn test_noun_chunks() {
        let analysis = analyze("He is a really nice guy and a great teammate.");
        let chunks: Vec<&str> = analysis.noun_chunk_texts().collect();
        assert_eq!(chunks, vec!["He", "a really nice guy", "a great teammate"]);
    }

    #[test]
    fn test_possessive_her_is_determiner() {
        let analysis = analyze("I like her attitude");
        let chunks: Vec<&str> = analysis.noun_chunk_texts().collect();
        assert_eq!(chunks, vec!["I", "her attitude"]);
    }

    #[test]
    fn test_kind_of_is_a_hedge() {
        let analysis = analyze("He is kind of rude");
        assert_eq!(pos_of(&analysis, "kind"), PosTag::Adv);
        assert_eq!(pos_of(&analysis, "rude"), PosTag::Adj);

        let analysis = analyze("She is kind to everyone");
        assert_eq!(pos_of(&analysis, "kind"), PosTag::Adj);
    }

    #[test]
    fn test_stopword_flags() {
        let analysis = analyze("he doesn't listen");
        assert!(analysis.tokens[0].is_stop);
        assert!(analysis.tokens[1].is_stop);
        assert!(!analysis.tokens[2].is_stop);
        assert_eq!(analysis.tokens[1].text, "doesn't");
    }

    #[test]
    fn test_hyphenated_words_are_single_tokens() {
        let analysis = analyze("very laid-back");
        assert_eq!(analysis.tokens.len(), 2);
        assert_eq!(pos_of(&analysis, "laid-back"), PosTag::Adj);
    }

    #[test]
    fn test_unknown_capitalized_word_is_proper_noun() {
        let analysis = analyze("Worked with Priya on labs");
        assert_eq!(pos_of(&analysis, "Priya"), PosTag::Propn);
    }

    #[test]
    fn test_empty_text() {
        let analysis = analyze("   ");
        assert!(analysis.sentences.is_empty());
        assert!(analysis.tokens.is_empty());
        assert!(analysis.noun_chunks.is_empty());
    }
}
