use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid ID format: {message}")]
    InvalidId { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn invalid_id(message: impl Into<String>) -> Self {
        Self::InvalidId {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Whether this error is a uniqueness conflict reported by the store
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_id_error() {
        let error = DomainError::invalid_id("User ID cannot be empty");
        assert_eq!(error.to_string(), "Invalid ID format: User ID cannot be empty");
        assert!(!error.is_conflict());
    }

    #[test]
    fn test_conflict_error() {
        let error = DomainError::conflict("Fingerprint already taken");
        assert_eq!(error.to_string(), "Conflict: Fingerprint already taken");
        assert!(error.is_conflict());
    }

    #[test]
    fn test_storage_error_is_not_conflict() {
        let error = DomainError::storage("connection refused");
        assert_eq!(error.to_string(), "Storage error: connection refused");
        assert!(!error.is_conflict());
    }
}
