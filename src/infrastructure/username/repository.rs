//! In-memory username repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::username::{Fingerprint, UserId, UsernameRecord, UsernameRepository};
use crate::domain::DomainError;

/// In-memory implementation of UsernameRepository
#[derive(Debug, Clone)]
pub struct InMemoryUsernameRepository {
    records: Arc<RwLock<HashMap<String, UsernameRecord>>>,
    /// Index for fingerprint -> user ID lookup
    fingerprint_index: Arc<RwLock<HashMap<String, String>>>,
    /// Account emails keyed by user ID
    emails: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryUsernameRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            fingerprint_index: Arc::new(RwLock::new(HashMap::new())),
            emails: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Attach an account email to a user
    pub async fn register_email(&self, user_id: &UserId, email: impl Into<String>) {
        let mut emails = self.emails.write().await;
        emails.insert(user_id.as_str().to_string(), email.into());
    }
}

impl Default for InMemoryUsernameRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UsernameRepository for InMemoryUsernameRepository {
    async fn get_by_fingerprint(
        &self,
        fingerprint: &Fingerprint,
    ) -> Result<Option<UsernameRecord>, DomainError> {
        // Writers take `records` first; never hold the index while waiting on it
        let user_id = {
            let fingerprint_index = self.fingerprint_index.read().await;
            match fingerprint_index.get(fingerprint.as_str()) {
                Some(user_id) => user_id.clone(),
                None => return Ok(None),
            }
        };

        let records = self.records.read().await;
        Ok(records.get(&user_id).cloned())
    }

    async fn get_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<UsernameRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records.get(user_id.as_str()).cloned())
    }

    async fn create(&self, record: UsernameRecord) -> Result<UsernameRecord, DomainError> {
        let mut records = self.records.write().await;
        let mut fingerprint_index = self.fingerprint_index.write().await;

        let id = record.user_id().as_str().to_string();
        let fingerprint = record.fingerprint().as_str().to_string();

        if records.contains_key(&id) {
            return Err(DomainError::conflict(format!(
                "User '{}' already has a username",
                id
            )));
        }

        if fingerprint_index.contains_key(&fingerprint) {
            return Err(DomainError::conflict(format!(
                "Fingerprint '{}' already exists",
                fingerprint
            )));
        }

        fingerprint_index.insert(fingerprint, id.clone());
        records.insert(id, record.clone());

        Ok(record)
    }

    async fn delete(&self, user_id: &UserId) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;
        let mut fingerprint_index = self.fingerprint_index.write().await;

        if let Some(record) = records.remove(user_id.as_str()) {
            fingerprint_index.remove(record.fingerprint().as_str());
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn find_email_by_fingerprint(
        &self,
        fingerprint: &Fingerprint,
    ) -> Result<Option<String>, DomainError> {
        let user_id = {
            let fingerprint_index = self.fingerprint_index.read().await;
            match fingerprint_index.get(fingerprint.as_str()) {
                Some(user_id) => user_id.clone(),
                None => return Ok(None),
            }
        };

        let emails = self.emails.read().await;
        Ok(emails.get(&user_id).cloned())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let records = self.records.read().await;
        Ok(records.len())
    }
}
