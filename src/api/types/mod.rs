//! API request and response types

pub mod error;
pub mod json;
pub mod username;

pub use error::{ApiError, ApiErrorCode, ApiErrorResponse};
pub use json::Json;
pub use username::{
    AvailabilityQuery, AvailabilityResponse, CreateUsernameBody, CreateUsernameResponse,
    UsernameResponse, ValidateUsernameBody,
};
