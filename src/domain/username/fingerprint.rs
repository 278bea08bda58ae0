//! Fingerprint value type

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static FINGERPRINT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("static fingerprint pattern"));

/// Errors raised when parsing an externally supplied fingerprint
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FingerprintError {
    #[error("Fingerprint cannot be empty")]
    Empty,

    #[error("Fingerprint must be lowercase ASCII letters and digits separated by single hyphens")]
    Malformed,
}

/// Canonical slug derived from a display name.
///
/// Two display names with the same fingerprint are the same identity for
/// collision purposes. Values produced by the normalizer may be empty (the
/// validator enforces the length floor); values parsed from outside input
/// never are.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Parse a fingerprint received from a caller
    pub fn parse(value: impl Into<String>) -> Result<Self, FingerprintError> {
        let value = value.into();

        if value.is_empty() {
            return Err(FingerprintError::Empty);
        }

        if !FINGERPRINT_PATTERN.is_match(&value) {
            return Err(FingerprintError::Malformed);
        }

        Ok(Self(value))
    }

    /// Wrap a slug built by the normalization pipeline
    pub(crate) fn from_slug(slug: String) -> Self {
        debug_assert!(slug.is_empty() || FINGERPRINT_PATTERN.is_match(&slug));
        Self(slug)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in bytes; fingerprints are ASCII so this equals the character count
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Fingerprint {
    type Error = FingerprintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Fingerprint> for String {
    fn from(fingerprint: Fingerprint) -> Self {
        fingerprint.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
