//! Domain layer - Username identity rules and storage contracts

pub mod error;
pub mod username;

pub use error::DomainError;
pub use username::{
    Fingerprint, FingerprintNormalizer, RejectionReason, UserId, UsernameErrorCode,
    UsernameRecord, UsernameRepository, UsernameValidator, ValidationResult,
};
