//! Username record and related identifiers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::fingerprint::Fingerprint;

const MAX_USER_ID_LENGTH: usize = 64;

/// Errors that can occur while parsing a user identifier
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserIdError {
    #[error("User ID cannot be empty")]
    Empty,

    #[error("User ID exceeds maximum length of {0} characters")]
    TooLong(usize),

    #[error("User ID must start with a letter or number")]
    InvalidStart,

    #[error("User ID must end with a letter or number")]
    InvalidEnd,

    #[error("User ID contains invalid character: '{0}'. Only alphanumeric characters and hyphens are allowed")]
    InvalidCharacter(char),

    #[error("User ID cannot contain consecutive hyphens")]
    ConsecutiveHyphens,
}

/// Validate a user ID
///
/// Rules:
/// - Cannot be empty
/// - Maximum 64 characters
/// - Only ASCII alphanumeric characters and hyphens
/// - Must start and end with alphanumeric
/// - No consecutive hyphens
pub fn validate_user_id(id: &str) -> Result<(), UserIdError> {
    if id.is_empty() {
        return Err(UserIdError::Empty);
    }

    if id.len() > MAX_USER_ID_LENGTH {
        return Err(UserIdError::TooLong(MAX_USER_ID_LENGTH));
    }

    let mut prev_hyphen = false;

    for (index, c) in id.chars().enumerate() {
        if c == '-' {
            if index == 0 {
                return Err(UserIdError::InvalidStart);
            }
            if prev_hyphen {
                return Err(UserIdError::ConsecutiveHyphens);
            }
            prev_hyphen = true;
        } else if c.is_ascii_alphanumeric() {
            prev_hyphen = false;
        } else {
            return Err(UserIdError::InvalidCharacter(c));
        }
    }

    if prev_hyphen {
        return Err(UserIdError::InvalidEnd);
    }

    Ok(())
}

/// Identifier of the account owning a username
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Result<Self, UserIdError> {
        let id = id.into();
        validate_user_id(&id)?;
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A claimed username.
///
/// `display_name` is kept verbatim for rendering; `fingerprint` is the only
/// identity key and is unique across all records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsernameRecord {
    user_id: UserId,
    display_name: String,
    fingerprint: Fingerprint,
    created_at: DateTime<Utc>,
}

impl UsernameRecord {
    pub fn new(user_id: UserId, display_name: impl Into<String>, fingerprint: Fingerprint) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
            fingerprint,
            created_at: Utc::now(),
        }
    }

    /// Rebuild a record loaded from storage
    pub fn restore(
        user_id: UserId,
        display_name: impl Into<String>,
        fingerprint: Fingerprint,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
            fingerprint,
            created_at,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
