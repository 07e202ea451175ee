//! Controlled trait vocabulary
//!
//! Synonym tables are versioned TOML data rather than code. The built-in
//! table is compiled in from `data/synonyms.toml`; deployments can layer an
//! external table on top with [`SynonymTable::extend`], which only ever adds
//! entries.

use crate::error::{Result, TraitlensError};
use crate::text::normalize_phrase;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::{debug, info};

const BUILTIN_TABLE: &str = include_str!("../../data/synonyms.toml");

/// On-disk layout of a synonym table
#[derive(Debug, Deserialize)]
struct RawTable {
    version: u32,
    #[serde(default)]
    phrases: BTreeMap<String, String>,
    #[serde(default)]
    words: BTreeMap<String, String>,
}

/// Phrase-level and word-level maps from surface form to canonical label
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SynonymTable {
    version: u32,
    phrases: BTreeMap<String, String>,
    words: BTreeMap<String, String>,
}

impl SynonymTable {
    /// The table shipped with the crate
    pub fn builtin() -> Result<Self> {
        Self::from_toml(BUILTIN_TABLE)
    }

    /// The built-in table, extended with an external file if one is given
    pub fn load(extra: Option<&Path>) -> Result<Self> {
        let mut table = Self::builtin()?;
        if let Some(path) = extra {
            let content = std::fs::read_to_string(path)?;
            let overlay = Self::from_toml(&content)?;
            info!(
                "Extending synonym table v{} with {:?} (v{})",
                table.version,
                path,
                overlay.version
            );
            table.extend(overlay)?;
        }
        Ok(table)
    }

    /// Parse a table, normalizing every key and label
    ///
    /// Two keys that normalize to the same string must agree on their label.
    pub fn from_toml(content: &str) -> Result<Self> {
        let raw: RawTable = toml::from_str(content)?;
        let mut table = Self {
            version: raw.version,
            ..Self::default()
        };

        for (key, label) in raw.phrases {
            table.insert_phrase(&key, &label)?;
        }
        for (key, label) in raw.words {
            table.insert_word(&key, &label)?;
        }

        debug!(
            "Loaded synonym table v{}: {} phrases, {} words",
            table.version,
            table.phrases.len(),
            table.words.len()
        );
        Ok(table)
    }

    /// Merge another table into this one without rewriting existing entries
    pub fn extend(&mut self, other: SynonymTable) -> Result<()> {
        for (key, label) in other.phrases {
            self.insert_phrase(&key, &label)?;
        }
        for (key, label) in other.words {
            self.insert_word(&key, &label)?;
        }
        self.version = self.version.max(other.version);
        Ok(())
    }

    /// Add a phrase mapping; re-adding the same mapping is a no-op
    pub fn insert_phrase(&mut self, key: &str, label: &str) -> Result<()> {
        let (key, label) = Self::normalize_entry(key, label)?;
        Self::insert_into(&mut self.phrases, key, label)
    }

    /// Add a single-word mapping; re-adding the same mapping is a no-op
    pub fn insert_word(&mut self, key: &str, label: &str) -> Result<()> {
        let (key, label) = Self::normalize_entry(key, label)?;
        if key.contains(' ') {
            return Err(TraitlensError::Validation(format!(
                "Word synonym key '{}' must be a single word",
                key
            )));
        }
        Self::insert_into(&mut self.words, key, label)
    }

    fn normalize_entry(key: &str, label: &str) -> Result<(String, String)> {
        let key = normalize_phrase(key);
        let label = normalize_phrase(label);
        if key.is_empty() || label.is_empty() {
            return Err(TraitlensError::Validation(
                "Synonym keys and labels cannot be empty".to_string(),
            ));
        }
        Ok((key, label))
    }

    fn insert_into(map: &mut BTreeMap<String, String>, key: String, label: String) -> Result<()> {
        match map.get(&key) {
            Some(existing) if *existing != label => Err(TraitlensError::SynonymConflict {
                key,
                existing: existing.clone(),
                proposed: label,
            }),
            Some(_) => Ok(()),
            None => {
                map.insert(key, label);
                Ok(())
            }
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Label for an exact (normalized) phrase
    pub fn phrase(&self, key: &str) -> Option<&str> {
        self.phrases.get(key).map(String::as_str)
    }

    /// Label for an exact (normalized) single word
    pub fn word(&self, key: &str) -> Option<&str> {
        self.words.get(key).map(String::as_str)
    }

    pub fn phrases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.phrases.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn words(&self) -> impl Iterator<Item = (&str, &str)> {
        self.words.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Every canonical label either map can produce
    pub fn labels(&self) -> BTreeSet<&str> {
        self.phrases
            .values()
            .chain(self.words.values())
            .map(String::as_str)
            .collect()
    }

    /// Multi-word phrase keys, longest first
    pub fn multi_word_phrases(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .phrases
            .keys()
            .map(String::as_str)
            .filter(|k| k.contains(' '))
            .collect();
        keys.sort_by(|a, b| {
            let words = |s: &str| s.split(' ').count();
            words(b).cmp(&words(a)).then_with(|| a.cmp(b))
        });
        keys
    }
}
