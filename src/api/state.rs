//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::username::UsernameServiceTrait;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub username_service: Arc<dyn UsernameServiceTrait>,
}

impl AppState {
    pub fn new(username_service: Arc<dyn UsernameServiceTrait>) -> Self {
        Self { username_service }
    }
}
