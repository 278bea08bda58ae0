//! Display name to fingerprint pipeline
//!
//! Stages run in a fixed order, each consuming the previous stage's output:
//!
//! 1. confusable collapse (oracle)
//! 2. decorative collapse (oracle)
//! 3. leet-speak folding
//! 4. NFKD decomposition + lowercase
//! 5. slug construction
//! 6. content-policy gate (oracle)
//!
//! Stages 1-5 are pure string transforms. The result is used as a uniqueness
//! key, so any change to a stage or a table changes identity semantics for
//! existing records.

use std::sync::Arc;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::fingerprint::Fingerprint;
use super::oracle::{ConfusablesNormalizer, DecorativeTextNormalizer, ProhibitedWordOracle};

/// Conventional digit-for-letter substitutions
pub const LEET_SUBSTITUTIONS: [(char, char); 6] = [
    ('5', 's'),
    ('3', 'e'),
    ('4', 'a'),
    ('6', 'g'),
    ('7', 't'),
    ('8', 'b'),
];

/// Character-for-character substitution table applied in stage 3
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeetTable {
    pairs: Vec<(char, char)>,
}

impl LeetTable {
    pub fn new(pairs: impl IntoIterator<Item = (char, char)>) -> Self {
        Self {
            pairs: pairs.into_iter().collect(),
        }
    }

    /// Replace every mapped character, independent of its neighbours
    pub fn fold(&self, input: &str) -> String {
        input
            .chars()
            .map(|c| self.lookup(c).unwrap_or(c))
            .collect()
    }

    fn lookup(&self, c: char) -> Option<char> {
        self.pairs
            .iter()
            .find(|(from, _)| *from == c)
            .map(|(_, to)| *to)
    }
}

impl Default for LeetTable {
    fn default() -> Self {
        Self::new(LEET_SUBSTITUTIONS)
    }
}

/// Turns raw display names into fingerprints.
///
/// Holds only read-only tables, so one instance can be shared across any
/// number of tasks.
#[derive(Clone)]
pub struct FingerprintNormalizer {
    confusables: Arc<dyn ConfusablesNormalizer>,
    decorative: Arc<dyn DecorativeTextNormalizer>,
    prohibited: Arc<dyn ProhibitedWordOracle>,
    leet: LeetTable,
}

impl FingerprintNormalizer {
    pub fn new(
        confusables: Arc<dyn ConfusablesNormalizer>,
        decorative: Arc<dyn DecorativeTextNormalizer>,
        prohibited: Arc<dyn ProhibitedWordOracle>,
    ) -> Self {
        Self {
            confusables,
            decorative,
            prohibited,
            leet: LeetTable::default(),
        }
    }

    pub fn with_leet_table(mut self, leet: LeetTable) -> Self {
        self.leet = leet;
        self
    }

    /// Run stages 1-5 without the content gate
    pub fn canonicalize(&self, raw: &str) -> Fingerprint {
        let collapsed = self.confusables.collapse(raw);
        let flattened = self.decorative.flatten(&collapsed);
        let folded = self.leet.fold(&flattened);
        let lowered = folded.nfkd().collect::<String>().to_lowercase();

        Fingerprint::from_slug(slugify(&lowered))
    }

    /// Full pipeline. `None` means the content policy rejected the name.
    ///
    /// An empty fingerprint is a valid result here; callers that need a
    /// minimum length enforce it themselves.
    pub fn normalize(&self, raw: &str) -> Option<Fingerprint> {
        let fingerprint = self.canonicalize(raw);

        if !fingerprint.is_empty() && self.prohibited.is_prohibited(fingerprint.as_str()) {
            return None;
        }

        Some(fingerprint)
    }
}

/// Stage 5.
///
/// Runs of whitespace and of any character outside `[a-z0-9]` become a single
/// hyphen, leading and trailing separators are dropped. Combining marks are
/// removed without leaving a separator so an accent never splits a word.
///
/// The stricter reading treats an orphaned mark like any other disallowed
/// character, so `Renée` would become `rene-e` rather than `renee`. The
/// default decorative stage strips marks before this point, so the two
/// readings only differ for injected oracles that keep them.
fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_separator = false;

    for c in input.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c);
        } else if !is_combining_mark(c) {
            pending_separator = true;
        }
    }

    slug
}
