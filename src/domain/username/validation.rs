//! Structural username checks wrapped around the fingerprint pipeline

use serde::{Deserialize, Serialize};
use thiserror::Error;
use unicode_normalization::char::is_combining_mark;

use super::fingerprint::Fingerprint;
use super::normalizer::FingerprintNormalizer;

pub const USERNAME_MIN_LENGTH: usize = 3;
pub const USERNAME_MAX_LENGTH: usize = 30;
pub const FINGERPRINT_MIN_LENGTH: usize = 2;
/// Longest accepted run of consecutive combining marks
pub const MAX_COMBINING_DIACRITICS: usize = 2;

/// Why a username was refused.
///
/// For logs, metrics and operator tooling only. Clients always receive
/// [`UsernameErrorCode::UsernameNotAvailable`] regardless of the variant.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    #[error("username is shorter than {0} characters")]
    TooShort(usize),

    #[error("username is longer than {0} characters")]
    TooLong(usize),

    #[error("username contains a control character")]
    ControlCharacter,

    #[error("username contains a zero-width character")]
    ZeroWidthCharacter,

    #[error("username stacks more than {0} combining marks")]
    DiacriticStacking(usize),

    #[error("username matches the content policy")]
    ProhibitedContent,

    #[error("fingerprint is shorter than {0} characters")]
    FingerprintTooShort(usize),
}

impl RejectionReason {
    /// Stable label for metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TooShort(_) => "too_short",
            Self::TooLong(_) => "too_long",
            Self::ControlCharacter => "control_character",
            Self::ZeroWidthCharacter => "zero_width_character",
            Self::DiacriticStacking(_) => "diacritic_stacking",
            Self::ProhibitedContent => "prohibited_content",
            Self::FingerprintTooShort(_) => "fingerprint_too_short",
        }
    }
}

/// Error identifiers exposed to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UsernameErrorCode {
    UsernameNotAvailable,
}

/// Client-facing verdict. A failed validation never carries a fingerprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<Fingerprint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<UsernameErrorCode>,
}

impl ValidationResult {
    pub fn accepted(fingerprint: Fingerprint) -> Self {
        Self {
            valid: true,
            fingerprint: Some(fingerprint),
            error: None,
        }
    }

    pub fn not_available() -> Self {
        Self {
            valid: false,
            fingerprint: None,
            error: Some(UsernameErrorCode::UsernameNotAvailable),
        }
    }
}

impl From<Result<Fingerprint, RejectionReason>> for ValidationResult {
    fn from(result: Result<Fingerprint, RejectionReason>) -> Self {
        match result {
            Ok(fingerprint) => Self::accepted(fingerprint),
            Err(_) => Self::not_available(),
        }
    }
}

/// Tunable limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsernamePolicy {
    pub min_length: usize,
    pub max_length: usize,
    pub fingerprint_min_length: usize,
    pub max_combining_diacritics: usize,
}

impl Default for UsernamePolicy {
    fn default() -> Self {
        Self {
            min_length: USERNAME_MIN_LENGTH,
            max_length: USERNAME_MAX_LENGTH,
            fingerprint_min_length: FINGERPRINT_MIN_LENGTH,
            max_combining_diacritics: MAX_COMBINING_DIACRITICS,
        }
    }
}

/// Zero-width code points that render as nothing
fn is_zero_width(c: char) -> bool {
    matches!(
        c,
        '\u{200B}' // Zero-width space
        | '\u{200C}' // Zero-width non-joiner
        | '\u{200D}' // Zero-width joiner
        | '\u{2060}' // Word joiner
        | '\u{FEFF}' // BOM / zero-width no-break space
    )
}

fn longest_combining_run(input: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;

    for c in input.chars() {
        if is_combining_mark(c) {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }

    longest
}

/// Structural gate in front of [`FingerprintNormalizer`]
#[derive(Clone)]
pub struct UsernameValidator {
    normalizer: FingerprintNormalizer,
    policy: UsernamePolicy,
}

impl UsernameValidator {
    pub fn new(normalizer: FingerprintNormalizer) -> Self {
        Self::with_policy(normalizer, UsernamePolicy::default())
    }

    pub fn with_policy(normalizer: FingerprintNormalizer, policy: UsernamePolicy) -> Self {
        Self { normalizer, policy }
    }

    pub fn policy(&self) -> &UsernamePolicy {
        &self.policy
    }

    pub fn normalizer(&self) -> &FingerprintNormalizer {
        &self.normalizer
    }

    /// Run every check and return the fingerprint or the precise reason.
    ///
    /// Checks are ordered cheapest first and the first failure wins.
    pub fn check(&self, raw: &str) -> Result<Fingerprint, RejectionReason> {
        let length = raw.chars().count();

        if length < self.policy.min_length {
            return Err(RejectionReason::TooShort(self.policy.min_length));
        }

        if length > self.policy.max_length {
            return Err(RejectionReason::TooLong(self.policy.max_length));
        }

        if raw.chars().any(char::is_control) {
            return Err(RejectionReason::ControlCharacter);
        }

        if raw.chars().any(is_zero_width) {
            return Err(RejectionReason::ZeroWidthCharacter);
        }

        if longest_combining_run(raw) > self.policy.max_combining_diacritics {
            return Err(RejectionReason::DiacriticStacking(
                self.policy.max_combining_diacritics,
            ));
        }

        let fingerprint = self
            .normalizer
            .normalize(raw)
            .ok_or(RejectionReason::ProhibitedContent)?;

        if fingerprint.len() < self.policy.fingerprint_min_length {
            return Err(RejectionReason::FingerprintTooShort(
                self.policy.fingerprint_min_length,
            ));
        }

        Ok(fingerprint)
    }

    /// Opaque verdict suitable for returning to clients
    pub fn validate(&self, raw: &str) -> ValidationResult {
        self.check(raw).into()
    }
}
