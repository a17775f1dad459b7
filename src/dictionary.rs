/*!
 * User-supplied phrase dictionary.
 *
 * The dictionary is a JSON object of `"phrase": "translation"` pairs. Entries
 * keep the order they have in the file because case-insensitive lookups
 * resolve ties by that order.
 */

use std::collections::HashMap;
use std::path::Path;

use log::{debug, warn};
use serde_json::{Map, Value};

use crate::errors::DictionaryError;
use crate::language_utils;
use crate::resolver::Entry;

/// Immutable phrase table
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    /// Pairs in file order
    entries: Vec<(String, String)>,
    /// Exact key -> position in `entries`
    index: HashMap<String, usize>,
}

/// A successful dictionary lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionaryHit<'a> {
    /// The lookup text equals a key
    Exact(&'a str),
    /// The lookup text equals a key ignoring case
    CaseInsensitive {
        /// The key that matched
        matched_key: &'a str,
        /// Its translation
        translation: &'a str,
    },
}

impl DictionaryHit<'_> {
    /// The translation to emit
    pub fn translation(&self) -> &str {
        match self {
            Self::Exact(translation) => translation,
            Self::CaseInsensitive { translation, .. } => translation,
        }
    }
}

impl Dictionary {
    /// Create an empty dictionary
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dictionary from pairs; a repeated key keeps its first position
    /// and its last translation, like a JSON object does.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut dictionary = Self::default();
        for (key, value) in pairs {
            dictionary.insert(key.into(), value.into());
        }
        dictionary
    }

    fn insert(&mut self, key: String, value: String) {
        match self.index.get(&key) {
            Some(&position) => self.entries[position].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    /// Parse a JSON object of string pairs
    pub fn from_json_str(json: &str, origin: &str) -> Result<Self, DictionaryError> {
        let parse_error = |message: String| DictionaryError::Parse {
            path: origin.to_string(),
            message,
        };

        let object: Map<String, Value> =
            serde_json::from_str(json).map_err(|e| parse_error(e.to_string()))?;

        let mut dictionary = Self::default();
        for (key, value) in object {
            match value {
                Value::String(translation) => dictionary.insert(key, translation),
                other => {
                    return Err(parse_error(format!(
                        "value for '{}' must be a string, found {}",
                        key, other
                    )));
                }
            }
        }

        Ok(dictionary)
    }

    /// Load a dictionary file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
        let path = path.as_ref();
        let origin = path.display().to_string();

        let json = std::fs::read_to_string(path).map_err(|source| DictionaryError::Read {
            path: origin.clone(),
            source,
        })?;

        let dictionary = Self::from_json_str(&json, &origin)?;
        debug!("Loaded {} dictionary entries from {}", dictionary.len(), origin);
        Ok(dictionary)
    }

    /// Load a dictionary file, falling back to an empty one on failure unless
    /// `strict` is set.
    pub fn load_or_empty<P: AsRef<Path>>(path: P, strict: bool) -> Result<Self, DictionaryError> {
        match Self::load(path) {
            Ok(dictionary) => Ok(dictionary),
            Err(e) if !strict => {
                warn!("{}; continuing without dictionary matches", e);
                Ok(Self::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pairs in stored order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Exact key match first, then the first key in stored order that equals
    /// `text` ignoring case.
    pub fn lookup(&self, text: &str) -> Option<DictionaryHit<'_>> {
        if let Some(&position) = self.index.get(text) {
            return Some(DictionaryHit::Exact(&self.entries[position].1));
        }

        let folded = text.to_lowercase();
        self.entries
            .iter()
            .find(|(key, _)| key.to_lowercase() == folded)
            .map(|(key, translation)| DictionaryHit::CaseInsensitive {
                matched_key: key,
                translation,
            })
    }
}

/// Which side of a property line is looked up in the dictionary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Translating from the dictionary's key language: look up the value
    Forward,
    /// Translating into the dictionary's key language: look up the key
    Reverse,
}

impl Direction {
    /// Pick the direction for a run, or `None` when the dictionary does not
    /// cover this language pair.
    pub fn detect(
        source_language: &str,
        target_language: &str,
        dictionary_from: &str,
        dictionary_to: &str,
    ) -> Option<Self> {
        let matches = language_utils::language_codes_match;

        if matches(source_language, dictionary_from) && matches(target_language, dictionary_to) {
            Some(Self::Forward)
        } else if matches(source_language, dictionary_to)
            && matches(target_language, dictionary_from)
        {
            Some(Self::Reverse)
        } else {
            None
        }
    }

    /// The text of `entry` to look up for this direction
    pub fn lookup_text<'e>(&self, entry: &'e Entry) -> &'e str {
        match self {
            Self::Forward => &entry.value,
            Self::Reverse => &entry.key,
        }
    }

    /// Resolve `entry` against `dictionary`
    pub fn resolve<'d>(&self, dictionary: &'d Dictionary, entry: &Entry) -> Option<DictionaryHit<'d>> {
        dictionary.lookup(self.lookup_text(entry))
    }
}
