//! Username repository trait

use async_trait::async_trait;

use super::entity::{UserId, UsernameRecord};
use super::fingerprint::Fingerprint;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Storage for claimed usernames.
///
/// Implementations must enforce uniqueness of `fingerprint` (and of
/// `user_id`) inside `create` itself, so that two concurrent creates for the
/// same fingerprint produce exactly one success and one
/// [`DomainError::Conflict`].
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UsernameRepository: Send + Sync {
    /// Get the record holding a fingerprint
    async fn get_by_fingerprint(
        &self,
        fingerprint: &Fingerprint,
    ) -> Result<Option<UsernameRecord>, DomainError>;

    /// Get the username owned by a user
    async fn get_by_user_id(&self, user_id: &UserId)
        -> Result<Option<UsernameRecord>, DomainError>;

    /// Insert a record; `Conflict` when the fingerprint or user is taken
    async fn create(&self, record: UsernameRecord) -> Result<UsernameRecord, DomainError>;

    /// Remove the record owned by a user, releasing its fingerprint
    async fn delete(&self, user_id: &UserId) -> Result<bool, DomainError>;

    /// Email of the account owning a fingerprint
    async fn find_email_by_fingerprint(
        &self,
        fingerprint: &Fingerprint,
    ) -> Result<Option<String>, DomainError>;

    /// Number of claimed usernames
    async fn count(&self) -> Result<usize, DomainError>;

    /// Check if a fingerprint is already claimed
    async fn fingerprint_exists(&self, fingerprint: &Fingerprint) -> Result<bool, DomainError> {
        Ok(self.get_by_fingerprint(fingerprint).await?.is_some())
    }
}
