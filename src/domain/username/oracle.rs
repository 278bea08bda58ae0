//! Pluggable lookup tables used by the fingerprint pipeline
//!
//! The normalizer treats each of these as a black box. Implementations must be
//! pure: the same input always yields the same output, with no dependence on
//! locale, time or call history.

/// Collapses cross-script look-alike code points into their Latin/ASCII
/// prototype (Cyrillic "а" becomes Latin "a").
pub trait ConfusablesNormalizer: Send + Sync {
    fn collapse(&self, input: &str) -> String;
}

/// Flattens decorative text (mathematical alphanumerics, fullwidth forms,
/// enclosed letters, stylized scripts) into plain ASCII where a visual
/// equivalent exists.
pub trait DecorativeTextNormalizer: Send + Sync {
    fn flatten(&self, input: &str) -> String;
}

/// Content policy lookup.
///
/// Receives the finished slug. How sub-strings are matched is up to the
/// implementation.
pub trait ProhibitedWordOracle: Send + Sync {
    fn is_prohibited(&self, slug: &str) -> bool;
}
