//! Linguistic analysis for feedback text
//!
//! The pipeline only consumes an [`Analysis`]: sentence spans, tagged tokens
//! with lemmas and stopword flags, and noun-chunk spans. Any analyzer that
//! produces one can be plugged in through [`LinguisticAnalyzer`]; the crate
//! ships a dictionary-driven [`RuleBasedAnalyzer`] that needs no models.

pub mod dictionaries;
pub mod rule_based;

pub use rule_based::RuleBasedAnalyzer;

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Coarse part-of-speech tags (Universal Dependencies names)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PosTag {
    Adj,
    Adp,
    Adv,
    Aux,
    CConj,
    Det,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    SConj,
    Verb,
    X,
}

impl PosTag {
    /// Nouns and proper nouns
    pub fn is_nominal(self) -> bool {
        matches!(self, PosTag::Noun | PosTag::Propn)
    }
}

/// Byte range into the analyzed text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// A single analyzed token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub lemma: String,
    pub pos: PosTag,
    pub is_stop: bool,
    pub span: Span,
}

/// Output of one analyzer run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub text: String,
    pub sentences: Vec<Span>,
    pub tokens: Vec<Token>,
    pub noun_chunks: Vec<Span>,
}

impl Analysis {
    /// Text covered by a span; empty if the span does not fit the text
    pub fn slice(&self, span: Span) -> &str {
        self.text.get(span.start..span.end).unwrap_or("")
    }

    /// Sentence texts in order
    pub fn sentence_texts(&self) -> impl Iterator<Item = &str> {
        self.sentences.iter().map(move |span| self.slice(*span))
    }

    /// Noun chunk texts in order
    pub fn noun_chunk_texts(&self) -> impl Iterator<Item = &str> {
        self.noun_chunks.iter().map(move |span| self.slice(*span))
    }
}

/// Sentence splitting, tagging, lemmatization, and chunking
pub trait LinguisticAnalyzer: Send + Sync {
    fn analyze(&self, text: &str) -> Result<Analysis>;
}
