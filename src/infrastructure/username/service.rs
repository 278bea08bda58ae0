//! Username directory service

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};
use validator::ValidateEmail;

use crate::domain::username::{
    Fingerprint, UserId, UsernameRecord, UsernameRepository, UsernameValidator, ValidationResult,
};
use crate::domain::DomainError;
use crate::infrastructure::observability::{record_username_creation, record_username_validation};

/// Request for claiming a username
#[derive(Debug, Clone)]
pub struct CreateUsernameRequest {
    pub user_id: String,
    pub display_name: String,
    /// Fingerprint previously returned by validation, if the caller kept it
    pub fingerprint: Option<String>,
}

/// Result of a claim attempt
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    Created(UsernameRecord),
    /// Rejected by validation or already taken; callers cannot tell which
    NotAvailable,
}

/// Trait for username directory operations
#[async_trait]
pub trait UsernameServiceTrait: Send + Sync {
    /// Validate a raw display name
    fn validate(&self, raw: &str) -> ValidationResult;

    /// Whether no record holds the fingerprint
    async fn check_availability(&self, fingerprint: &Fingerprint) -> Result<bool, DomainError>;

    /// Claim a username for a user
    async fn create(&self, request: CreateUsernameRequest) -> Result<CreateOutcome, DomainError>;

    /// Email of the account owning the display name's fingerprint
    async fn get_email_by_username(&self, display_name: &str)
        -> Result<Option<String>, DomainError>;

    /// Resolve an email or a display name to the account email
    async fn resolve_login_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<String>, DomainError>;

    /// Username owned by a user
    async fn get_by_user_id(&self, user_id: &str) -> Result<Option<UsernameRecord>, DomainError>;

    /// Drop a user's username, freeing the fingerprint
    async fn release(&self, user_id: &str) -> Result<bool, DomainError>;

    /// Number of claimed usernames
    async fn count(&self) -> Result<usize, DomainError>;
}

/// Username directory backed by a repository
pub struct UsernameService<R: UsernameRepository> {
    repository: Arc<R>,
    validator: Arc<UsernameValidator>,
}

impl<R: UsernameRepository> UsernameService<R> {
    /// Create a new username service
    pub fn new(repository: Arc<R>, validator: Arc<UsernameValidator>) -> Self {
        Self {
            repository,
            validator,
        }
    }
}

#[async_trait]
impl<R: UsernameRepository + 'static> UsernameServiceTrait for UsernameService<R> {
    fn validate(&self, raw: &str) -> ValidationResult {
        let outcome = self.validator.check(raw);

        match &outcome {
            Ok(fingerprint) => {
                debug!(fingerprint = %fingerprint, "Username accepted");
                record_username_validation(Ok(()));
            }
            Err(reason) => {
                debug!(reason = reason.as_str(), "Username rejected");
                record_username_validation(Err(*reason));
            }
        }

        outcome.into()
    }

    async fn check_availability(&self, fingerprint: &Fingerprint) -> Result<bool, DomainError> {
        // Too short to ever be claimed
        if fingerprint.len() < self.validator.policy().fingerprint_min_length {
            return Ok(false);
        }

        Ok(!self.repository.fingerprint_exists(fingerprint).await?)
    }

    async fn create(&self, request: CreateUsernameRequest) -> Result<CreateOutcome, DomainError> {
        let user_id =
            UserId::new(&request.user_id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        let fingerprint = match self.validator.check(&request.display_name) {
            Ok(fingerprint) => fingerprint,
            Err(reason) => {
                debug!(user_id = %user_id, reason = reason.as_str(), "Username claim rejected");
                record_username_validation(Err(reason));
                record_username_creation("not_available");
                return Ok(CreateOutcome::NotAvailable);
            }
        };

        if let Some(supplied) = &request.fingerprint {
            if supplied != fingerprint.as_str() {
                debug!(
                    user_id = %user_id,
                    expected = %fingerprint,
                    "Supplied fingerprint does not match display name"
                );
                record_username_creation("not_available");
                return Ok(CreateOutcome::NotAvailable);
            }
        }

        let record = UsernameRecord::new(user_id, &request.display_name, fingerprint);

        match self.repository.create(record).await {
            Ok(record) => {
                info!(
                    user_id = %record.user_id(),
                    fingerprint = %record.fingerprint(),
                    "Username created"
                );
                record_username_creation("created");
                Ok(CreateOutcome::Created(record))
            }
            Err(e) if e.is_conflict() => {
                debug!(error = %e, "Username claim lost to an existing record");
                record_username_creation("not_available");
                Ok(CreateOutcome::NotAvailable)
            }
            Err(e) => {
                warn!(error = %e, "Failed to create username");
                record_username_creation("error");
                Err(e)
            }
        }
    }

    async fn get_email_by_username(
        &self,
        display_name: &str,
    ) -> Result<Option<String>, DomainError> {
        let fingerprint = match self.validator.normalizer().normalize(display_name) {
            Some(fingerprint) => fingerprint,
            None => return Ok(None),
        };

        if fingerprint.len() < self.validator.policy().fingerprint_min_length {
            return Ok(None);
        }

        self.repository.find_email_by_fingerprint(&fingerprint).await
    }

    async fn resolve_login_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<String>, DomainError> {
        let trimmed = identifier.trim();

        if trimmed.validate_email() {
            return Ok(Some(trimmed.to_string()));
        }

        self.get_email_by_username(identifier).await
    }

    async fn get_by_user_id(&self, user_id: &str) -> Result<Option<UsernameRecord>, DomainError> {
        let user_id = UserId::new(user_id).map_err(|e| DomainError::invalid_id(e.to_string()))?;
        self.repository.get_by_user_id(&user_id).await
    }

    async fn release(&self, user_id: &str) -> Result<bool, DomainError> {
        let user_id = UserId::new(user_id).map_err(|e| DomainError::invalid_id(e.to_string()))?;
        let released = self.repository.delete(&user_id).await?;

        if released {
            info!(user_id = %user_id, "Username released");
        }

        Ok(released)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }
}
