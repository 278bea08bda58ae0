//! Username endpoint handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{
    ApiError, AvailabilityQuery, AvailabilityResponse, CreateUsernameBody, CreateUsernameResponse,
    Json, UsernameResponse, ValidateUsernameBody,
};
use crate::domain::username::{Fingerprint, ValidationResult};
use crate::infrastructure::username::{CreateOutcome, CreateUsernameRequest};

/// POST /v1/usernames/validate
pub async fn validate_username(
    State(state): State<AppState>,
    Json(body): Json<ValidateUsernameBody>,
) -> Json<ValidationResult> {
    Json(state.username_service.validate(&body.username))
}

/// GET /v1/usernames/availability?fingerprint=
pub async fn check_availability(
    State(state): State<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, ApiError> {
    let fingerprint = match query.fingerprint.map(Fingerprint::parse) {
        Some(Ok(fingerprint)) => fingerprint,
        Some(Err(e)) => {
            debug!(error = %e, "Availability asked for a malformed fingerprint");
            return Ok(Json(AvailabilityResponse::not_available()));
        }
        None => return Ok(Json(AvailabilityResponse::not_available())),
    };

    let available = state
        .username_service
        .check_availability(&fingerprint)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(AvailabilityResponse::from_lookup(available)))
}

/// POST /v1/usernames
pub async fn create_username(
    State(state): State<AppState>,
    Json(body): Json<CreateUsernameBody>,
) -> Result<(StatusCode, Json<CreateUsernameResponse>), ApiError> {
    debug!(user_id = %body.user_id, "Claiming username");

    let outcome = state
        .username_service
        .create(CreateUsernameRequest {
            user_id: body.user_id,
            display_name: body.display_name,
            fingerprint: body.fingerprint,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(match outcome {
        CreateOutcome::Created(record) => (
            StatusCode::CREATED,
            Json(CreateUsernameResponse::created(record.fingerprint().clone())),
        ),
        CreateOutcome::NotAvailable => (
            StatusCode::CONFLICT,
            Json(CreateUsernameResponse::not_available()),
        ),
    })
}

/// GET /v1/usernames/{user_id}
pub async fn get_username(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UsernameResponse>, ApiError> {
    let record = state
        .username_service
        .get_by_user_id(&user_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found(format!("User '{}' has no username", user_id)))?;

    Ok(Json(UsernameResponse::from(record)))
}

/// DELETE /v1/usernames/{user_id}
pub async fn release_username(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let released = state
        .username_service
        .release(&user_id)
        .await
        .map_err(ApiError::from)?;

    if released {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!(
            "User '{}' has no username",
            user_id
        )))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::Request;
    use axum::Router;
    use serde_json::Value;
    use tower::ServiceExt; // for oneshot

    use crate::api::v1::create_v1_router;
    use crate::domain::username::MockUsernameRepository;
    use crate::domain::DomainError;
    use crate::infrastructure::username::{
        default_validator, InMemoryUsernameRepository, UsernameService,
    };

    use super::*;

    fn build_router() -> Router {
        let repository = Arc::new(InMemoryUsernameRepository::new());
        let service = UsernameService::new(repository, Arc::new(default_validator()));
        create_v1_router().with_state(AppState::new(Arc::new(service)))
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    #[tokio::test]
    async fn test_validate_returns_fingerprint() {
        let app = build_router();

        let (status, body) = send(
            &app,
            json_request("POST", "/usernames/validate", r#"{"username":"PaypaI"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], true);
        assert_eq!(body["fingerprint"], "paypal");
    }

    #[tokio::test]
    async fn test_validate_rejection_is_opaque() {
        let app = build_router();

        let (status, body) = send(
            &app,
            json_request("POST", "/usernames/validate", r#"{"username":"5hit"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], false);
        assert_eq!(body["error"], "USERNAME_NOT_AVAILABLE");
        assert!(body.get("fingerprint").is_none());
        assert!(!body.to_string().contains("PROHIBITED"));
    }

    #[tokio::test]
    async fn test_validate_rejects_bad_json() {
        let app = build_router();

        let (status, body) = send(
            &app,
            json_request("POST", "/usernames/validate", r#"{"name":"x"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn test_create_then_lookalike_conflicts() {
        let app = build_router();

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/usernames",
                r#"{"user_id":"user-1","display_name":"Paypal"}"#,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        assert_eq!(body["fingerprint"], "paypal");

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/usernames",
                r#"{"user_id":"user-2","display_name":"PaypaI"}"#,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "USERNAME_NOT_AVAILABLE");
    }

    #[tokio::test]
    async fn test_create_rejected_name_conflicts() {
        let app = build_router();

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/usernames",
                r#"{"user_id":"user-1","display_name":"fuck"}"#,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "USERNAME_NOT_AVAILABLE");
    }

    #[tokio::test]
    async fn test_create_bad_user_id() {
        let app = build_router();

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/usernames",
                r#"{"user_id":"not valid!","display_name":"John Doe"}"#,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "INVALID_REQUEST");
        assert_eq!(body["param"], "user_id");
    }

    #[tokio::test]
    async fn test_availability_flow() {
        let app = build_router();

        let (status, body) = send(&app, get_request("/usernames/availability?fingerprint=paypal")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["available"], true);

        send(
            &app,
            json_request(
                "POST",
                "/usernames",
                r#"{"user_id":"user-1","display_name":"Paypal"}"#,
            ),
        )
        .await;

        let (_, body) = send(&app, get_request("/usernames/availability?fingerprint=paypal")).await;
        assert_eq!(body["available"], false);
    }

    #[tokio::test]
    async fn test_availability_malformed_fingerprint() {
        let app = build_router();

        for uri in [
            "/usernames/availability?fingerprint=Not%20A%20Slug",
            "/usernames/availability",
        ] {
            let (status, body) = send(&app, get_request(uri)).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
            assert_eq!(body["available"], false, "{uri}");
            assert_eq!(body["error"], "USERNAME_NOT_AVAILABLE", "{uri}");
        }
    }

    #[tokio::test]
    async fn test_availability_store_failure() {
        let mut repository = MockUsernameRepository::new();
        repository
            .expect_fingerprint_exists()
            .returning(|_| Err(DomainError::storage("connection refused")));

        let service = UsernameService::new(Arc::new(repository), Arc::new(default_validator()));
        let app = create_v1_router().with_state(AppState::new(Arc::new(service)));

        let (status, body) = send(&app, get_request("/usernames/availability?fingerprint=paypal")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "INTERNAL_ERROR");
        assert!(!body.to_string().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_get_and_release() {
        let app = build_router();

        let (status, _) = send(&app, get_request("/usernames/user-1")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        send(
            &app,
            json_request(
                "POST",
                "/usernames",
                r#"{"user_id":"user-1","display_name":"John Doe"}"#,
            ),
        )
        .await;

        let (status, body) = send(&app, get_request("/usernames/user-1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["display_name"], "John Doe");
        assert_eq!(body["fingerprint"], "john-doe");

        let delete = Request::builder()
            .method("DELETE")
            .uri("/usernames/user-1")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&app, delete).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, body) = send(&app, get_request("/usernames/availability?fingerprint=john-doe")).await;
        assert_eq!(body["available"], true);

        let delete = Request::builder()
            .method("DELETE")
            .uri("/usernames/user-1")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, delete).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "NOT_FOUND");
    }
}
