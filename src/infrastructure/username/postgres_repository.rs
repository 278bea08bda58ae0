//! PostgreSQL username repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::username::{Fingerprint, UserId, UsernameRecord, UsernameRepository};
use crate::domain::DomainError;

/// PostgreSQL implementation of UsernameRepository.
///
/// Uniqueness is enforced by the `usernames` table constraints, so concurrent
/// inserts of one fingerprint are serialized by the database.
#[derive(Debug, Clone)]
pub struct PostgresUsernameRepository {
    pool: PgPool,
}

impl PostgresUsernameRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UsernameRepository for PostgresUsernameRepository {
    async fn get_by_fingerprint(
        &self,
        fingerprint: &Fingerprint,
    ) -> Result<Option<UsernameRecord>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT user_id, display_name, fingerprint, created_at
            FROM usernames
            WHERE fingerprint = $1
            "#,
        )
        .bind(fingerprint.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get username: {}", e)))?;

        row.as_ref().map(row_to_record).transpose()
    }

    async fn get_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<UsernameRecord>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT user_id, display_name, fingerprint, created_at
            FROM usernames
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get username by user: {}", e)))?;

        row.as_ref().map(row_to_record).transpose()
    }

    async fn create(&self, record: UsernameRecord) -> Result<UsernameRecord, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO usernames (user_id, display_name, fingerprint, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(record.user_id().as_str())
        .bind(record.display_name())
        .bind(record.fingerprint().as_str())
        .bind(record.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let unique_violation = e
                .as_database_error()
                .is_some_and(|db| db.is_unique_violation());

            if unique_violation {
                DomainError::conflict(format!(
                    "Fingerprint '{}' or user '{}' already exists",
                    record.fingerprint(),
                    record.user_id()
                ))
            } else {
                DomainError::storage(format!("Failed to create username: {}", e))
            }
        })?;

        Ok(record)
    }

    async fn delete(&self, user_id: &UserId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM usernames WHERE user_id = $1")
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete username: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_email_by_fingerprint(
        &self,
        fingerprint: &Fingerprint,
    ) -> Result<Option<String>, DomainError> {
        sqlx::query_scalar(
            r#"
            SELECT a.email
            FROM usernames u
            JOIN accounts a ON a.id = u.user_id
            WHERE u.fingerprint = $1
            "#,
        )
        .bind(fingerprint.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to look up email: {}", e)))
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM usernames")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count usernames: {}", e)))?;

        Ok(count as usize)
    }

    async fn fingerprint_exists(&self, fingerprint: &Fingerprint) -> Result<bool, DomainError> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM usernames WHERE fingerprint = $1)")
            .bind(fingerprint.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to check fingerprint: {}", e)))
    }
}

fn row_to_record(row: &sqlx::postgres::PgRow) -> Result<UsernameRecord, DomainError> {
    let user_id: String = row.get("user_id");
    let display_name: String = row.get("display_name");
    let fingerprint: String = row.get("fingerprint");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");

    let user_id = UserId::new(user_id)
        .map_err(|e| DomainError::storage(format!("Invalid user ID in database: {}", e)))?;
    let fingerprint = Fingerprint::parse(fingerprint)
        .map_err(|e| DomainError::storage(format!("Invalid fingerprint in database: {}", e)))?;

    Ok(UsernameRecord::restore(
        user_id,
        display_name,
        fingerprint,
        created_at,
    ))
}
