//! Dictionary-based word lists for the rule-based analyzer
//!
//! Closed-class words (pronouns, determiners, auxiliaries, adpositions) are
//! listed exhaustively; open-class lists cover the vocabulary that shows up
//! in peer feedback and fall back to suffix heuristics elsewhere.

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

fn set(words: &[&'static str]) -> HashSet<&'static str> {
    words.iter().copied().collect()
}

fn map(pairs: &[(&'static str, &'static str)]) -> HashMap<&'static str, &'static str> {
    pairs.iter().copied().collect()
}

/// Closed-class and open-class word lists
pub struct LexicalDictionaries;

impl LexicalDictionaries {
    pub fn pronouns() -> &'static HashSet<&'static str> {
        static SET: Lazy<HashSet<&'static str>> = Lazy::new(|| {
            set(&[
                "i", "me", "you", "he", "him", "she", "her", "it", "we", "us", "they", "them",
                "myself", "yourself", "himself", "herself", "itself", "ourselves", "themselves",
                "someone", "somebody", "anyone", "anybody", "everyone", "everybody", "nobody",
                "something", "anything", "everything", "nothing", "who", "whom", "whoever",
                "what", "which", "mine", "yours", "hers", "ours", "theirs", "he's", "she's",
                "it's", "they're", "i'm", "you're", "we're", "that's", "there's", "he'd",
                "she'd", "they'd", "i've", "you've", "we've", "they've", "i'll", "he'll",
                "she'll", "they'll", "hes", "shes", "theyre", "im",
            ])
        });
        &SET
    }

    pub fn determiners() -> &'static HashSet<&'static str> {
        static SET: Lazy<HashSet<&'static str>> = Lazy::new(|| {
            set(&[
                "a", "an", "the", "this", "that", "these", "those", "some", "any", "every",
                "each", "no", "his", "their", "my", "your", "our", "its", "another", "such",
                "all", "both", "either", "neither", "many", "few", "several",
            ])
        });
        &SET
    }

    pub fn auxiliaries() -> &'static HashSet<&'static str> {
        static SET: Lazy<HashSet<&'static str>> = Lazy::new(|| {
            set(&[
                "is", "are", "was", "were", "am", "be", "been", "being", "has", "have", "had",
                "having", "do", "does", "did", "will", "would", "can", "could", "should",
                "shall", "may", "might", "must", "isn't", "aren't", "wasn't", "weren't",
                "doesn't", "don't", "didn't", "hasn't", "haven't", "hadn't", "won't",
                "wouldn't", "can't", "cannot", "couldn't", "shouldn't", "mustn't", "isnt",
                "arent", "wasnt", "werent", "doesnt", "dont", "didnt", "hasnt", "havent",
                "wont", "wouldnt", "cant", "couldnt", "shouldnt",
            ])
        });
        &SET
    }

    pub fn coordinating_conjunctions() -> &'static HashSet<&'static str> {
        static SET: Lazy<HashSet<&'static str>> =
            Lazy::new(|| set(&["and", "or", "nor", "but", "yet", "plus"]));
        &SET
    }

    pub fn subordinating_conjunctions() -> &'static HashSet<&'static str> {
        static SET: Lazy<HashSet<&'static str>> = Lazy::new(|| {
            set(&[
                "because", "although", "though", "if", "while", "when", "whenever", "since",
                "unless", "whereas", "as", "than", "whether", "until", "cause", "cuz",
            ])
        });
        &SET
    }

    pub fn adpositions() -> &'static HashSet<&'static str> {
        static SET: Lazy<HashSet<&'static str>> = Lazy::new(|| {
            set(&[
                "in", "on", "at", "over", "with", "without", "to", "from", "of", "for", "by",
                "about", "around", "into", "onto", "through", "during", "before", "after",
                "above", "below", "under", "between", "among", "against", "toward", "towards",
                "across", "behind", "beyond", "near", "upon", "within", "along", "despite",
                "except", "per", "via", "off", "out", "up", "down",
            ])
        });
        &SET
    }

    pub fn particles() -> &'static HashSet<&'static str> {
        static SET: Lazy<HashSet<&'static str>> = Lazy::new(|| set(&["not", "n't", "'s"]));
        &SET
    }

    pub fn number_words() -> &'static HashSet<&'static str> {
        static SET: Lazy<HashSet<&'static str>> = Lazy::new(|| {
            set(&[
                "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
                "hundred", "thousand",
            ])
        });
        &SET
    }

    pub fn adverbs() -> &'static HashSet<&'static str> {
        static SET: Lazy<HashSet<&'static str>> = Lazy::new(|| {
            set(&[
                "very", "really", "pretty", "so", "too", "quite", "super", "extremely",
                "always", "never", "sometimes", "often", "usually", "rarely", "seldom", "just",
                "also", "still", "even", "almost", "mostly", "kinda", "sorta", "somewhat",
                "slightly", "totally", "completely", "definitely", "honestly", "genuinely",
                "actually", "literally", "basically", "generally", "barely", "hardly",
                "constantly", "ever", "again", "already", "here", "there", "now", "then",
                "well", "much", "more", "most", "less", "least", "else", "rather", "fairly",
                "highly", "incredibly", "truly", "especially", "overly", "however", "maybe",
                "perhaps", "probably", "only", "together", "away", "back", "lol",
            ])
        });
        &SET
    }

    pub fn adjectives() -> &'static HashSet<&'static str> {
        static SET: Lazy<HashSet<&'static str>> = Lazy::new(|| {
            set(&[
                // traits, positive
                "nice", "friendly", "kind", "sweet", "polite", "respectful", "funny",
                "hilarious", "humorous", "outgoing", "social", "sociable", "confident",
                "approachable", "chill", "easygoing", "laidback", "laid-back", "lowkey",
                "hardworking", "hard-working", "reliable", "dependable", "punctual", "helpful",
                "supportive", "motivated", "driven", "smart", "intelligent", "curious", "caring",
                "generous", "honest", "patient", "thoughtful", "considerate", "welcoming",
                "warm", "calm", "relaxed", "cheerful", "energetic", "enthusiastic", "creative",
                "talented", "brilliant", "genuine", "trustworthy", "organized", "loyal",
                "mature", "humble", "modest", "witty", "clever", "bright", "sharp", "lovely",
                "gentle", "open-minded", "talkative", "passionate", "dedicated", "committed",
                "diligent", "focused", "productive", "efficient", "proactive", "responsible",
                "kind-hearted", "down-to-earth", "lively", "chatty", "goofy", "fun",
                // traits, negative
                "rude", "disrespectful", "mean", "annoying", "arrogant", "condescending",
                "dismissive", "lazy", "boring", "immature", "awkward", "quiet", "shy",
                "aggressive", "argumentative", "unreliable", "inconsistent", "late",
                "unpunctual", "impatient", "cold", "distant", "dishonest", "manipulative",
                "bossy", "stubborn", "careless", "messy", "unfriendly", "unhelpful",
                "disorganized", "selfish", "fake", "toxic", "loud", "obnoxious", "irritating",
                "judgmental", "closed-minded", "narrow-minded", "irresponsible", "entitled",
                "petty", "jealous", "insecure", "defensive", "moody", "sarcastic", "cocky",
                "pushy", "controlling", "needy", "clingy", "flaky", "unprepared", "unmotivated",
                "overconfident", "creepy", "weird", "silly", "serious", "reserved",
                "introverted", "extroverted",
                // evaluative and general
                "good", "great", "bad", "poor", "awesome", "amazing", "cool", "pleasant",
                "positive", "negative", "happy", "sad", "angry", "mad", "annoyed", "excellent",
                "wonderful", "fantastic", "terrible", "awful", "horrible", "difficult", "easy",
                "hard", "open", "high", "low", "new", "old", "big", "small", "long", "short",
                "real", "true", "whole", "sure", "ready", "able", "okay", "fine", "other",
                "likely", "early", "lonely", "ugly", "holy", "jolly", "elderly", "costly",
            ])
        });
        &SET
    }

    /// Comparative and superlative forms that are not built by suffixing
    pub fn irregular_adjectives() -> &'static HashMap<&'static str, &'static str> {
        static MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
            map(&[
                ("better", "good"),
                ("best", "good"),
                ("worse", "bad"),
                ("worst", "bad"),
            ])
        });
        &MAP
    }

    pub fn nouns() -> &'static HashSet<&'static str> {
        static SET: Lazy<HashSet<&'static str>> = Lazy::new(|| {
            set(&[
                "person", "people", "guy", "kid", "student", "dude", "man", "woman", "friend",
                "teammate", "team", "player", "leader", "leadership", "listener", "talker",
                "chiller", "hater", "slacker", "worker", "thinker", "helper", "communicator",
                "presence", "attitude", "personality", "energy", "vibe", "humor", "humour",
                "sense", "effort", "work", "class", "group", "project", "meeting",
                "conversation", "time", "idea", "opinion", "feedback", "behavior", "behaviour",
                "manner", "heart", "mind", "joke", "problem", "issue", "way", "lot", "bit",
                "thing", "day", "week", "lab", "partner", "classmate", "coworker", "boss",
                "manager", "teacher", "jerk", "liar", "gossip", "flake", "know-it-all",
                "go-getter", "sweetheart", "delight", "pleasure", "pain", "nightmare", "star",
                "rockstar", "asset", "ego", "other", "life", "party", "room", "deadline",
            ])
        });
        &SET
    }

    pub fn irregular_nouns() -> &'static HashMap<&'static str, &'static str> {
        static MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
            map(&[
                ("men", "man"),
                ("women", "woman"),
                ("children", "child"),
                ("people", "people"),
                ("lives", "life"),
            ])
        });
        &MAP
    }

    pub fn verbs() -> &'static HashSet<&'static str> {
        static SET: Lazy<HashSet<&'static str>> = Lazy::new(|| {
            set(&[
                "talk", "listen", "interrupt", "cut", "work", "help", "try", "seem", "act",
                "come", "go", "get", "make", "take", "give", "show", "put", "look", "feel",
                "think", "know", "say", "tell", "ask", "care", "respect", "ignore", "complain",
                "dominate", "lead", "support", "joke", "laugh", "smile", "argue", "yell",
                "shout", "lie", "cheat", "judge", "brag", "boast", "mock", "tease", "bully",
                "blame", "criticize", "encourage", "motivate", "contribute", "participate",
                "communicate", "collaborate", "share", "speak", "hang", "play", "like", "love",
                "hate", "enjoy", "want", "need", "let", "keep", "treat", "bring", "start",
                "stop", "finish", "meet", "leave", "arrive", "miss", "forget", "remember",
                "learn", "teach", "explain", "understand", "agree", "disagree", "hear", "see",
                "watch", "read", "write", "run", "call", "text", "respond", "reply", "answer",
                "include", "exclude", "welcome", "dismiss", "annoy", "bore", "flake", "slack",
                "procrastinate", "overthink", "vibe", "rant", "whine", "sulk", "gossip",
                "appreciate", "deserve", "carry", "pull", "step", "mean",
            ])
        });
        &SET
    }

    /// Inflected verb forms whose lemma cannot be recovered by stripping suffixes
    pub fn irregular_verbs() -> &'static HashMap<&'static str, &'static str> {
        static MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
            map(&[
                ("went", "go"),
                ("gone", "go"),
                ("came", "come"),
                ("got", "get"),
                ("gotten", "get"),
                ("made", "make"),
                ("took", "take"),
                ("taken", "take"),
                ("gave", "give"),
                ("given", "give"),
                ("said", "say"),
                ("told", "tell"),
                ("thought", "think"),
                ("knew", "know"),
                ("known", "know"),
                ("felt", "feel"),
                ("kept", "keep"),
                ("left", "leave"),
                ("met", "meet"),
                ("brought", "bring"),
                ("led", "lead"),
                ("spoke", "speak"),
                ("spoken", "speak"),
                ("heard", "hear"),
                ("saw", "see"),
                ("seen", "see"),
                ("ran", "run"),
                ("understood", "understand"),
                ("taught", "teach"),
                ("meant", "mean"),
                ("hung", "hang"),
            ])
        });
        &MAP
    }

    /// Lemmas for auxiliaries, including negated contractions
    pub fn auxiliary_lemmas() -> &'static HashMap<&'static str, &'static str> {
        static MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
            map(&[
                ("is", "be"),
                ("are", "be"),
                ("was", "be"),
                ("were", "be"),
                ("am", "be"),
                ("been", "be"),
                ("being", "be"),
                ("isn't", "be"),
                ("aren't", "be"),
                ("wasn't", "be"),
                ("weren't", "be"),
                ("isnt", "be"),
                ("arent", "be"),
                ("wasnt", "be"),
                ("werent", "be"),
                ("has", "have"),
                ("had", "have"),
                ("having", "have"),
                ("hasn't", "have"),
                ("haven't", "have"),
                ("hadn't", "have"),
                ("hasnt", "have"),
                ("havent", "have"),
                ("does", "do"),
                ("did", "do"),
                ("doesn't", "do"),
                ("don't", "do"),
                ("didn't", "do"),
                ("doesnt", "do"),
                ("dont", "do"),
                ("didnt", "do"),
                ("won't", "will"),
                ("wont", "will"),
                ("wouldn't", "would"),
                ("wouldnt", "would"),
                ("can't", "can"),
                ("cant", "can"),
                ("cannot", "can"),
                ("couldn't", "could"),
                ("couldnt", "could"),
                ("shouldn't", "should"),
                ("shouldnt", "should"),
                ("mustn't", "must"),
            ])
        });
        &MAP
    }

    /// Function words flagged as stopwords
    ///
    /// Deliberately excludes trait-bearing words ("mean", "quiet", "late",
    /// "serious") that generic English stop lists sometimes contain.
    pub fn stopwords() -> &'static HashSet<&'static str> {
        static SET: Lazy<HashSet<&'static str>> = Lazy::new(|| {
            set(&[
                "a", "about", "above", "after", "again", "against", "all", "also", "always",
                "am", "an", "and", "any", "are", "as", "at", "be", "because", "been", "before",
                "being", "below", "between", "both", "but", "by", "can", "cannot", "could",
                "did", "do", "does", "doing", "down", "during", "each", "either", "else",
                "even", "ever", "every", "few", "for", "from", "further", "had", "has", "have",
                "having", "he", "her", "here", "hers", "herself", "him", "himself", "his",
                "how", "however", "i", "if", "in", "into", "is", "it", "its", "itself", "just",
                "me", "more", "most", "much", "my", "myself", "neither", "no", "nor", "not",
                "now", "of", "off", "often", "on", "once", "only", "or", "other", "others",
                "our", "ours", "ourselves", "out", "over", "own", "quite", "rather", "same",
                "she", "should", "so", "some", "someone", "something", "still", "such", "than",
                "that", "the", "their", "theirs", "them", "themselves", "then", "there",
                "these", "they", "this", "those", "though", "through", "to", "too", "under",
                "until", "up", "us", "was", "we", "were", "what", "when", "where", "which",
                "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours",
                "yourself", "yet", "n't", "'s", "he's", "she's", "it's", "they're", "i'm",
                "isn't", "aren't", "wasn't", "weren't", "doesn't", "don't", "didn't",
                "hasn't", "haven't", "won't", "wouldn't", "can't", "couldn't", "shouldn't",
                "isnt", "arent", "wasnt", "werent", "doesnt", "dont", "didnt", "hasnt",
                "havent", "wont", "wouldnt", "cant", "couldnt", "shouldnt", "hes", "shes",
                "im", "theyre",
            ])
        });
        &SET
    }
}
