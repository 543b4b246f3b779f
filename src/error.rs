use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::ErrorResponse;
use crate::services::RepositoryError;

/// Errors surfaced by discovery, swiping and the account endpoints
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Cannot swipe your own user")]
    SelfSwipe,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl MatchError {
    /// Stable machine-readable kind used in error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            MatchError::InvalidInput(_) => "invalid_input",
            MatchError::SelfSwipe => "self_swipe",
            MatchError::NotFound(_) => "not_found",
            MatchError::Conflict(_) => "conflict",
            MatchError::Persistence(_) => "persistence_error",
            MatchError::Unauthorized(_) => "unauthorized",
            MatchError::Internal(_) => "internal_error",
        }
    }

    /// Message shown to API clients, without the kind prefix
    pub fn detail(&self) -> String {
        match self {
            MatchError::InvalidInput(msg)
            | MatchError::NotFound(msg)
            | MatchError::Conflict(msg)
            | MatchError::Persistence(msg)
            | MatchError::Unauthorized(msg)
            | MatchError::Internal(msg) => msg.clone(),
            MatchError::SelfSwipe => self.to_string(),
        }
    }
}

impl From<RepositoryError> for MatchError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(what) => MatchError::NotFound(what),
            RepositoryError::Conflict(what) => MatchError::Conflict(what),
            other => MatchError::Persistence(other.to_string()),
        }
    }
}

impl ResponseError for MatchError {
    fn status_code(&self) -> StatusCode {
        match self {
            MatchError::InvalidInput(_) | MatchError::SelfSwipe => StatusCode::BAD_REQUEST,
            MatchError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            MatchError::NotFound(_) => StatusCode::NOT_FOUND,
            MatchError::Conflict(_) => StatusCode::CONFLICT,
            MatchError::Persistence(_) | MatchError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        HttpResponse::build(status).json(ErrorResponse {
            error: self.kind().to_string(),
            message: self.detail(),
            status_code: status.as_u16(),
        })
    }
}
