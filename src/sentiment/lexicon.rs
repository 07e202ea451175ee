//! Lexicon-based compound sentiment
//!
//! Word valences on a -4..4 scale are summed after local adjustments
//! (negation, intensity modifiers, capitalisation, contrast) and squashed
//! into `[-1, 1]` with `s / sqrt(s^2 + alpha)`. Multi-word entries
//! ("easy going", "talks over people") are matched before single words.

use crate::error::Result;
use crate::nlp::{LinguisticAnalyzer, PosTag, RuleBasedAnalyzer};
use crate::sentiment::PolarityScorer;
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Normalisation constant for the compound score
const ALPHA: f32 = 15.0;

/// Valence shift applied by boosters and dampeners
const BOOST: f32 = 0.293;

/// Valence shift for an ALL-CAPS word in mixed-case text
const CAPS_BOOST: f32 = 0.733;

/// Per-'!' amplification, counted up to `MAX_EXCLAMATIONS`
const EXCLAMATION_BOOST: f32 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;

/// Multiplier for a negated valence
const NEGATION_SCALAR: f32 = -0.74;

/// How many preceding words a negator or modifier can reach
const MODIFIER_WINDOW: usize = 3;

static VALENCE: Lazy<HashMap<&'static str, f32>> = Lazy::new(|| {
    [
        // warmth
        ("nice", 1.8), ("kind", 1.9), ("friendly", 2.2), ("sweet", 2.0), ("warm", 1.5),
        ("caring", 2.2), ("helpful", 1.9), ("generous", 2.3), ("polite", 1.8),
        ("respectful", 1.9), ("supportive", 1.9), ("considerate", 1.9), ("thoughtful", 1.6),
        ("welcoming", 1.7), ("patient", 1.4), ("empathetic", 1.7), ("compassionate", 2.1),
        ("pleasant", 2.3), ("lovely", 2.8), ("gentle", 1.6), ("approachable", 1.4),
        // general approval
        ("good", 1.9), ("great", 3.1), ("awesome", 3.1), ("amazing", 2.8), ("excellent", 2.7),
        ("fantastic", 2.6), ("wonderful", 2.7), ("cool", 1.3), ("fun", 2.3), ("funny", 1.9),
        ("hilarious", 1.7), ("best", 3.2), ("better", 1.9), ("love", 3.2), ("loved", 2.9),
        ("like", 1.5), ("liked", 1.8), ("enjoy", 2.2), ("enjoyed", 2.3), ("happy", 2.7),
        ("positive", 2.3), ("smart", 1.7), ("brilliant", 2.8), ("clever", 1.6),
        ("intelligent", 2.0), ("talented", 2.3), ("creative", 1.9), ("reliable", 1.9),
        ("dependable", 1.7), ("trustworthy", 2.3), ("honest", 2.3), ("hardworking", 1.9),
        ("diligent", 1.7), ("dedicated", 1.8), ("organized", 1.2), ("responsible", 1.3),
        ("punctual", 1.1), ("calm", 1.3), ("chill", 1.2), ("relaxed", 1.5), ("easygoing", 1.5),
        ("confident", 2.2), ("motivated", 1.8), ("energetic", 1.7), ("enthusiastic", 1.9),
        ("passionate", 1.9), ("charming", 2.0), ("cheerful", 2.5), ("fair", 1.3),
        ("trust", 2.3), ("recommend", 1.5), ("appreciate", 1.7), ("thanks", 1.9),
        ("leader", 0.9), ("leadership", 1.0), ("team", 0.6), ("help", 1.7), ("helps", 1.7),
        ("helped", 1.7), ("outgoing", 1.9), ("social", 1.3), ("sociable", 1.6),
        ("humorous", 1.8), ("driven", 1.6), ("curious", 1.3), ("chiller", 1.2),
        ("laid-back", 1.5), ("laidback", 1.5), ("lowkey", 0.8),
        // disapproval
        ("bad", -2.5), ("terrible", -2.1), ("awful", -2.0), ("horrible", -2.5), ("worst", -3.1),
        ("worse", -2.1), ("rude", -2.0), ("mean", -1.8), ("arrogant", -2.2), ("cocky", -1.9),
        ("selfish", -2.1), ("lazy", -1.5), ("annoying", -1.7), ("annoy", -1.9),
        ("irritating", -1.8), ("obnoxious", -2.0), ("toxic", -2.4), ("hostile", -2.0),
        ("aggressive", -1.6), ("angry", -2.3), ("moody", -1.3), ("grumpy", -1.6),
        ("unreliable", -1.8), ("dishonest", -2.7), ("fake", -2.1), ("boring", -1.3),
        ("dull", -1.7), ("stupid", -2.4), ("dumb", -2.3), ("careless", -1.7), ("sloppy", -1.6),
        ("late", -0.6), ("disrespectful", -2.2), ("condescending", -2.0), ("bossy", -1.4),
        ("controlling", -1.5), ("stubborn", -1.2), ("impatient", -1.2), ("unfriendly", -1.9),
        ("cold", -0.9), ("hate", -2.7), ("hated", -3.2), ("dislike", -1.6), ("problem", -1.7),
        ("problems", -1.7), ("issue", -0.9), ("issues", -0.9), ("difficult", -1.5),
        ("interrupt", -1.4), ("interrupts", -1.4), ("interrupting", -1.4), ("ignore", -1.5),
        ("ignores", -1.5), ("ignored", -1.7), ("blame", -1.4), ("blames", -1.4),
        ("complain", -1.5), ("complains", -1.5), ("gossip", -1.3), ("gossips", -1.3),
        ("weird", -0.7), ("creepy", -2.4), ("shady", -1.6), ("jerk", -2.4), ("loud", -0.5),
        ("quiet", -0.2), ("shy", -1.0), ("awkward", -1.3), ("unprofessional", -2.1),
        ("disorganized", -1.4), ("irresponsible", -1.9), ("flaky", -1.5), ("messy", -1.5),
        ("avoid", -1.0), ("sad", -2.1), ("disappointing", -2.2), ("disappointed", -1.9),
        ("poor", -2.1), ("never", -0.2), ("dismissive", -1.8), ("argumentative", -1.6),
        ("inconsistent", -1.2), ("unpunctual", -1.2), ("immature", -1.7),
        ("overconfident", -1.5),
    ]
    .into_iter()
    .collect()
});

/// Multi-word valences, keyed on lowercased words without apostrophes
static PHRASE_VALENCE: Lazy<HashMap<&'static str, f32>> = Lazy::new(|| {
    [
        ("easy to talk to", 1.6), ("easy to speak with", 1.6), ("easy to communicate with", 1.6),
        ("good to talk to", 1.6), ("gets along with others", 1.8), ("works well with others", 1.9),
        ("good with others", 1.7), ("good teammate", 2.0), ("team player", 1.9),
        ("good leader", 2.0), ("natural leader", 2.0), ("shows leadership", 1.7),
        ("laid back", 1.5), ("easy going", 1.5), ("go with the flow", 1.3),
        ("shows up on time", 1.2), ("always on time", 1.3), ("on time", 1.1),
        ("hard working", 1.9), ("works hard", 1.9), ("puts in effort", 1.7), ("high effort", 1.7),
        ("talks over people", -1.6), ("talks over others", -1.6), ("talks over", -1.4),
        ("cuts people off", -1.6), ("cuts others off", -1.6), ("interrupts people", -1.6),
        ("interrupts others", -1.6), ("doesnt listen", -1.6), ("doesnt listen well", -1.6),
        ("not a good listener", -1.7), ("poor listener", -1.8),
        ("came across disrespectful", -2.2), ("was disrespectful", -2.2),
        ("acted disrespectful", -2.2), ("rude to people", -2.0), ("rude to others", -2.0),
        ("mean to people", -1.8), ("mean to others", -1.8), ("talks down to people", -2.0),
        ("talks down to others", -2.0), ("looked down on people", -2.0),
        ("looked down on others", -2.0), ("didnt try", -1.4), ("low effort", -1.4),
        ("seemed lazy", -1.5), ("takes over conversations", -1.3),
        ("dominates conversations", -1.3), ("dominates conversation", -1.3),
        ("too confident", -1.2), ("full of himself", -1.9), ("full of herself", -1.9),
        ("acts better than others", -2.0), ("immature behavior", -1.6), ("acts immature", -1.6),
        ("seemed immature", -1.6), ("kind of boring", -1.0), ("pretty boring", -1.3),
        ("seemed boring", -1.3),
    ]
    .into_iter()
    .collect()
});

static MAX_PHRASE_WORDS: Lazy<usize> = Lazy::new(|| {
    PHRASE_VALENCE
        .keys()
        .map(|key| key.split(' ').count())
        .max()
        .unwrap_or(1)
});

static BOOSTERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "very", "really", "super", "so", "extremely", "incredibly", "totally", "truly",
        "absolutely", "completely", "highly", "especially", "exceptionally", "remarkably",
        "genuinely", "always", "most", "more", "too", "hella", "mad", "pretty", "quite",
        "seriously", "insanely", "ridiculously",
    ]
    .into_iter()
    .collect()
});

static DAMPENERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "slightly", "somewhat", "barely", "hardly", "little", "occasionally", "kinda",
        "sorta", "marginally", "partly", "less", "fairly", "mildly", "bit",
    ]
    .into_iter()
    .collect()
});

static NEGATORS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "not", "no", "never", "nobody", "nothing", "none", "neither", "nor", "without",
        "cannot", "cant", "dont", "doesnt", "didnt", "isnt", "arent", "wasnt", "werent",
        "wont", "wouldnt", "shouldnt", "couldnt", "aint", "hasnt", "havent", "hadnt",
        "rarely", "seldom",
    ]
    .into_iter()
    .collect()
});

/// Built-in compound scorer with a trait-oriented valence lexicon
///
/// Words are looked up by surface form first and then by the analyzer's
/// lemma, so "nicest" scores like "nice".
#[derive(Clone)]
pub struct LexiconScorer {
    analyzer: Arc<dyn LinguisticAnalyzer>,
}

#[derive(Clone)]
struct Word {
    lower: String,
    lemma: String,
    shouting: bool,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self::with_analyzer(Arc::new(RuleBasedAnalyzer::new()))
    }

    pub fn with_analyzer(analyzer: Arc<dyn LinguisticAnalyzer>) -> Self {
        Self { analyzer }
    }

    fn words(&self, text: &str) -> Result<Vec<Word>> {
        let analysis = self.analyzer.analyze(text)?;
        let words: Vec<Word> = analysis
            .tokens
            .iter()
            .filter(|token| token.pos != PosTag::Punct)
            .map(|token| {
                let letters: Vec<char> = token.text.chars().filter(|c| c.is_alphabetic()).collect();
                Word {
                    lower: token.text.to_lowercase().replace(['\'', '’'], ""),
                    lemma: token.lemma.replace(['\'', '’'], ""),
                    shouting: letters.len() > 1 && letters.iter().all(|c| c.is_uppercase()),
                }
            })
            .collect();
        Ok(merge_phrases(&words))
    }

    fn is_negator(word: &str) -> bool {
        NEGATORS.contains(word)
    }

    /// "kind of" and "sort of" soften the next word; they carry no valence themselves
    fn is_hedge(words: &[Word], i: usize) -> bool {
        matches!(words[i].lower.as_str(), "kind" | "sort")
            && words.get(i + 1).is_some_and(|next| next.lower == "of")
    }

    fn word_valence(words: &[Word], i: usize, mixed_case: bool) -> f32 {
        let word = &words[i];
        let Some(base) = base_valence(word) else {
            return 0.0;
        };
        if Self::is_hedge(words, i) {
            return 0.0;
        }

        let sign = base.signum();
        let mut valence = base;

        if word.shouting && mixed_case {
            valence += sign * CAPS_BOOST;
        }

        for distance in 1..=MODIFIER_WINDOW.min(i) {
            let prev = &words[i - distance];
            let decay = 1.0 - 0.05 * (distance - 1) as f32;
            let mut shift = 0.0;
            if BOOSTERS.contains(prev.lower.as_str()) {
                shift = BOOST;
                if prev.shouting && mixed_case {
                    shift += CAPS_BOOST;
                }
            } else if DAMPENERS.contains(prev.lower.as_str()) {
                shift = -BOOST;
            } else if prev.lower == "of"
                && i >= distance + 1
                && matches!(words[i - distance - 1].lower.as_str(), "kind" | "sort")
            {
                shift = -BOOST;
            }
            valence += sign * shift * decay;
        }

        let negated = (1..=MODIFIER_WINDOW.min(i)).any(|d| Self::is_negator(&words[i - d].lower));
        if negated {
            valence *= NEGATION_SCALAR;
        }

        valence
    }
}

impl PolarityScorer for LexiconScorer {
    fn score(&self, text: &str) -> Result<f32> {
        let words = self.words(text)?;
        if words.is_empty() {
            return Ok(0.0);
        }

        let mixed_case = words.iter().any(|w| !w.shouting);
        let mut valences: Vec<f32> = (0..words.len())
            .map(|i| Self::word_valence(&words, i, mixed_case))
            .collect();

        // contrast: the clause after "but" dominates
        if let Some(pivot) = words.iter().position(|w| w.lower == "but") {
            for (i, valence) in valences.iter_mut().enumerate() {
                if i < pivot {
                    *valence *= 0.5;
                } else if i > pivot {
                    *valence *= 1.5;
                }
            }
        }

        let mut sum: f32 = valences.iter().sum();
        if sum != 0.0 {
            let exclamations = text.chars().filter(|c| *c == '!').count().min(MAX_EXCLAMATIONS);
            sum += sum.signum() * EXCLAMATION_BOOST * exclamations as f32;
        }

        let compound = sum / (sum * sum + ALPHA).sqrt();
        Ok(compound.clamp(-1.0, 1.0))
    }
}

fn base_valence(word: &Word) -> Option<f32> {
    PHRASE_VALENCE
        .get(word.lower.as_str())
        .or_else(|| VALENCE.get(word.lower.as_str()))
        .or_else(|| VALENCE.get(word.lemma.as_str()))
        .copied()
}

/// Collapse multi-word lexicon entries into one word, longest match first
fn merge_phrases(words: &[Word]) -> Vec<Word> {
    let mut merged = Vec::with_capacity(words.len());
    let mut i = 0;

    while i < words.len() {
        let longest = (2..=(*MAX_PHRASE_WORDS).min(words.len() - i)).rev().find_map(|n| {
            let key = words[i..i + n]
                .iter()
                .map(|w| w.lower.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            PHRASE_VALENCE.contains_key(key.as_str()).then_some((n, key))
        });

        match longest {
            Some((n, key)) => {
                merged.push(Word {
                    lemma: key.clone(),
                    lower: key,
                    shouting: words[i..i + n].iter().all(|w| w.shouting),
                });
                i += n;
            }
            None => {
                merged.push(words[i].clone());
                i += 1;
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::SynonymTable;

    fn score(text: &str) -> f32 {
        LexiconScorer::new().score(text).unwrap()
    }

    #[test]
    fn test_simple_polarity() {
        assert!(score("She is nice") >= 0.15);
        assert!(score("rude") <= -0.15);
        assert_eq!(score("He attends class on Tuesdays"), 0.0);
        assert_eq!(score(""), 0.0);
    }

    #[test]
    fn test_negation_flips() {
        assert!(score("not nice") < 0.0);
        assert!(score("he doesn't listen and isn't helpful") < 0.0);
        assert!(score("never rude") > 0.0);
    }

    #[test]
    fn test_boosters_and_dampeners() {
        assert!(score("very nice") > score("nice"));
        assert!(score("slightly rude") > score("rude"));
        assert!(score("kind of rude") > score("rude"));
        // "kind of" is a hedge, not praise
        assert!(score("kind of rude") < 0.0);
    }

    #[test]
    fn test_inflected_forms_score_by_lemma() {
        assert!(score("He is the nicest person in our class") >= 0.15);
        assert!(score("the rudest of them all") <= -0.15);
    }

    #[test]
    fn test_multi_word_entries() {
        assert!(score("Such a laid-back and easy going teammate") >= 0.15);
        assert!(score("always talks over people") <= -0.15);
        assert!(score("not a team player") < 0.0);
        assert!(score("he doesn't listen") < 0.0);
    }

    #[test]
    fn test_every_vocabulary_key_carries_valence() {
        let table = SynonymTable::builtin().unwrap();
        for (key, _) in table.phrases().chain(table.words()) {
            assert!(score(key) != 0.0, "'{}' scored neutral", key);
        }
    }

    #[test]
    fn test_emphasis() {
        assert!(score("he is NICE") > score("he is nice"));
        assert!(score("nice!!!") > score("nice"));
        assert!(score("nice!!!!!!!!") == score("nice!!!!"));
    }

    #[test]
    fn test_contrast_weights_second_half() {
        assert!(score("nice but rude") < 0.0);
        assert!(score("rude but nice") > 0.0);
    }

    #[test]
    fn test_compound_stays_in_range() {
        let gushing = "AMAZING amazing awesome great best love wonderful fantastic!!!!";
        let s = score(gushing);
        assert!(s > 0.9 && s <= 1.0);
        let s = score("worst terrible awful horrible hate toxic");
        assert!(s < -0.9 && s >= -1.0);
    }
}
