//! Username domain
//!
//! Fingerprint derivation, structural validation and the storage contract for
//! claimed usernames.

mod entity;
mod fingerprint;
mod normalizer;
mod oracle;
mod repository;
mod validation;

pub use entity::{validate_user_id, UserId, UserIdError, UsernameRecord};
pub use fingerprint::{Fingerprint, FingerprintError};
pub use normalizer::{FingerprintNormalizer, LeetTable, LEET_SUBSTITUTIONS};
pub use oracle::{ConfusablesNormalizer, DecorativeTextNormalizer, ProhibitedWordOracle};
pub use repository::UsernameRepository;
pub use validation::{
    RejectionReason, UsernameErrorCode, UsernamePolicy, UsernameValidator, ValidationResult,
    FINGERPRINT_MIN_LENGTH, MAX_COMBINING_DIACRITICS, USERNAME_MAX_LENGTH, USERNAME_MIN_LENGTH,
};

#[cfg(test)]
pub use repository::MockUsernameRepository;
