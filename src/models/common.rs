use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `error` in every failure envelope
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

/// `{ "message": ... }` payload for mutations with nothing to return
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `?search=` filter for the back-office lists
#[derive(Debug, Deserialize, ToSchema)]
pub struct SearchQuery {
    pub search: Option<String>,
}
