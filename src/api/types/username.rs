//! Username endpoint payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::username::{Fingerprint, UsernameErrorCode, UsernameRecord};

/// `POST /v1/usernames/validate`
#[derive(Debug, Clone, Deserialize)]
pub struct ValidateUsernameBody {
    pub username: String,
}

/// `GET /v1/usernames/availability`
#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityQuery {
    #[serde(default)]
    pub fingerprint: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AvailabilityResponse {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<UsernameErrorCode>,
}

impl AvailabilityResponse {
    pub fn from_lookup(available: bool) -> Self {
        Self {
            available,
            error: None,
        }
    }

    /// Answer for a fingerprint that could never be claimed
    pub fn not_available() -> Self {
        Self {
            available: false,
            error: Some(UsernameErrorCode::UsernameNotAvailable),
        }
    }
}

/// `POST /v1/usernames`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUsernameBody {
    pub user_id: String,
    pub display_name: String,
    #[serde(default)]
    pub fingerprint: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateUsernameResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<Fingerprint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<UsernameErrorCode>,
}

impl CreateUsernameResponse {
    pub fn created(fingerprint: Fingerprint) -> Self {
        Self {
            success: true,
            fingerprint: Some(fingerprint),
            error: None,
        }
    }

    pub fn not_available() -> Self {
        Self {
            success: false,
            fingerprint: None,
            error: Some(UsernameErrorCode::UsernameNotAvailable),
        }
    }
}

/// A claimed username as returned by `GET /v1/usernames/{user_id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsernameResponse {
    pub user_id: String,
    pub display_name: String,
    pub fingerprint: Fingerprint,
    pub created_at: DateTime<Utc>,
}

impl From<UsernameRecord> for UsernameResponse {
    fn from(record: UsernameRecord) -> Self {
        Self {
            user_id: record.user_id().to_string(),
            display_name: record.display_name().to_string(),
            fingerprint: record.fingerprint().clone(),
            created_at: record.created_at(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_response_serialization() {
        let created = CreateUsernameResponse::created(Fingerprint::parse("john-doe").unwrap());
        assert_eq!(
            serde_json::to_string(&created).unwrap(),
            r#"{"success":true,"fingerprint":"john-doe"}"#
        );

        let rejected = CreateUsernameResponse::not_available();
        assert_eq!(
            serde_json::to_string(&rejected).unwrap(),
            r#"{"success":false,"error":"USERNAME_NOT_AVAILABLE"}"#
        );
    }

    #[test]
    fn test_availability_response_serialization() {
        assert_eq!(
            serde_json::to_string(&AvailabilityResponse::from_lookup(true)).unwrap(),
            r#"{"available":true}"#
        );
        assert_eq!(
            serde_json::to_string(&AvailabilityResponse::not_available()).unwrap(),
            r#"{"available":false,"error":"USERNAME_NOT_AVAILABLE"}"#
        );
    }

    #[test]
    fn test_create_body_fingerprint_optional() {
        let body: CreateUsernameBody =
            serde_json::from_str(r#"{"user_id":"user-1","display_name":"John"}"#).unwrap();
        assert!(body.fingerprint.is_none());
    }
}
