//! Text normalization helpers shared by every pipeline stage

use once_cell::sync::Lazy;
use regex::Regex;

/// Anything that is not a word character, whitespace, or a hyphen
static PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s-]").expect("Valid punctuation regex"));

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("Valid whitespace regex"));

/// Lowercase, strip punctuation (hyphens survive), and collapse whitespace
///
/// ```
/// use traitlens_core::text::normalize_phrase;
/// assert_eq!(normalize_phrase("  Doesn't   LISTEN! "), "doesnt listen");
/// ```
pub fn normalize_phrase(s: &str) -> String {
    let lowered = s.trim().to_lowercase();
    let stripped = PUNCT.replace_all(&lowered, "");
    WHITESPACE.replace_all(stripped.trim(), " ").into_owned()
}

/// Number of whitespace-separated words
pub fn word_count(s: &str) -> usize {
    s.split_whitespace().count()
}

/// Collapse runs of whitespace to single spaces without changing case
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
