//! The fixed word set tracked by each session's guess tallies.
//!
//! A [`Vocabulary`] is resolved once at startup (file, inline config list, or
//! the built-in list) and shared by every session the store creates.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::config::VocabularyConfig;

/// Word → guess count.
pub type WordTally = BTreeMap<String, u64>;

/// Words used when neither a vocabulary file nor an inline list is configured.
pub const DEFAULT_WORDS: &[&str] = &[
    "bat", "bed", "box", "bug", "cat", "cow", "cup", "dog", "egg", "fox", "hat", "jam", "map",
    "pig", "red", "run", "sun", "top",
];

/// Errors raised while loading a vocabulary file.
#[derive(Debug, thiserror::Error)]
pub enum VocabularyError {
    #[error("failed to read vocabulary file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("vocabulary file {path} is not a list of strings: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("vocabulary file {0} contains no words")]
    Empty(String),
}

/// Where a resolved [`Vocabulary`] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VocabularySource {
    File(String),
    Inline,
    Builtin,
}

impl std::fmt::Display for VocabularySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => f.write_str(path),
            Self::Inline => f.write_str("inline"),
            Self::Builtin => f.write_str("builtin"),
        }
    }
}

/// Ordered, de-duplicated set of known words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    words: BTreeSet<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Vocabulary {
    /// Build a vocabulary, trimming each word and dropping blanks.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_string())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// The built-in word list.
    pub fn builtin() -> Self {
        Self::new(DEFAULT_WORDS.iter().copied())
    }

    /// Resolve the vocabulary from configuration, reporting which source won.
    ///
    /// Precedence: a non-blank `file`, then a `words` list with at least one
    /// non-blank entry, then [`DEFAULT_WORDS`].
    pub fn from_config(
        config: &VocabularyConfig,
    ) -> Result<(Self, VocabularySource), VocabularyError> {
        if let Some(path) = config.file.as_deref().filter(|p| !p.trim().is_empty()) {
            let vocabulary = Self::load_file(path)?;
            return Ok((vocabulary, VocabularySource::File(path.to_string())));
        }

        let inline = Self::new(&config.words);
        if inline.is_empty() {
            Ok((Self::builtin(), VocabularySource::Builtin))
        } else {
            Ok((inline, VocabularySource::Inline))
        }
    }

    /// Load a YAML (or JSON) list of words from disk.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, VocabularyError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let raw = std::fs::read_to_string(path).map_err(|source| VocabularyError::Io {
            path: display.clone(),
            source,
        })?;
        let words: Vec<String> =
            serde_yaml::from_str(&raw).map_err(|source| VocabularyError::Parse {
                path: display.clone(),
                source,
            })?;

        let vocabulary = Self::new(words);
        if vocabulary.is_empty() {
            return Err(VocabularyError::Empty(display));
        }
        Ok(vocabulary)
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// A tally with every word mapped to zero.
    #[must_use]
    pub fn blank_tally(&self) -> WordTally {
        self.words.iter().map(|w| (w.clone(), 0)).collect()
    }
}
