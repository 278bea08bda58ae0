//! v1 username endpoints

pub mod usernames;

use axum::{
    routing::{get, post},
    Router,
};

use super::state::AppState;

/// Create v1 API router
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/usernames", post(usernames::create_username))
        .route("/usernames/validate", post(usernames::validate_username))
        .route("/usernames/availability", get(usernames::check_availability))
        .route(
            "/usernames/{user_id}",
            get(usernames::get_username).delete(usernames::release_username),
        )
}
