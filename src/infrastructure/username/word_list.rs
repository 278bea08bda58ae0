//! Word-list content policy

use std::collections::HashSet;
use std::path::Path;

use crate::domain::username::ProhibitedWordOracle;
use crate::domain::DomainError;

const BUILTIN_WORDS: &str = include_str!("../../../data/prohibited_words.txt");

/// Content policy backed by a list of prohibited words.
///
/// Entries prefixed with `*` are matched as substrings of the fingerprint
/// once its separators are removed, so `holy-shit` and `bullshit` are both
/// caught. Plain entries only match a whole token, or the whole fingerprint
/// without separators, which keeps names like `class` or `peacock` usable.
#[derive(Debug, Clone, Default)]
pub struct WordListOracle {
    tokens: HashSet<String>,
    anywhere: HashSet<String>,
}

impl WordListOracle {
    /// An oracle that allows everything
    pub fn new() -> Self {
        Self::default()
    }

    /// The list bundled with the binary
    pub fn builtin() -> Self {
        Self::parse(BUILTIN_WORDS)
    }

    /// Parse a word list in the bundled file format
    pub fn parse(contents: &str) -> Self {
        let mut oracle = Self::new();

        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            oracle.add_word(line);
        }

        oracle
    }

    /// Read a word list from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            DomainError::configuration(format!(
                "Failed to read prohibited words from '{}': {}",
                path.display(),
                e
            ))
        })?;

        Ok(Self::parse(&contents))
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut oracle = Self::new();
        for word in words {
            oracle.add_word(word.as_ref());
        }
        oracle
    }

    /// Add one entry; `*` prefix means match anywhere
    pub fn add_word(&mut self, entry: &str) {
        let (anywhere, word) = match entry.trim().strip_prefix('*') {
            Some(rest) => (true, rest),
            None => (false, entry.trim()),
        };

        let word: String = word
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();

        if word.is_empty() {
            return;
        }

        if anywhere {
            self.anywhere.insert(word);
        } else {
            self.tokens.insert(word);
        }
    }

    /// Merge another list into this one
    pub fn extend(mut self, other: WordListOracle) -> Self {
        self.tokens.extend(other.tokens);
        self.anywhere.extend(other.anywhere);
        self
    }

    pub fn len(&self) -> usize {
        self.tokens.len() + self.anywhere.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty() && self.anywhere.is_empty()
    }
}

impl ProhibitedWordOracle for WordListOracle {
    fn is_prohibited(&self, slug: &str) -> bool {
        let compact: String = slug.chars().filter(|c| *c != '-').collect();

        if self.tokens.contains(&compact) || slug.split('-').any(|t| self.tokens.contains(t)) {
            return true;
        }

        self.anywhere.iter().any(|word| compact.contains(word.as_str()))
    }
}
