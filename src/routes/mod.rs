// Route exports
pub mod auth;
pub mod matches;
pub mod users;

use actix_web::{error, web, HttpRequest, HttpResponse};
use std::sync::Arc;

use crate::core::{AgeBounds, DiscoveryService, SwipeMatcher};
use crate::models::ErrorResponse;
use crate::services::{AccountService, MatchRepository, TokenService};

pub use auth::AuthenticatedUser;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn MatchRepository>,
    pub accounts: AccountService,
    pub discovery: DiscoveryService,
    pub matcher: SwipeMatcher,
}

impl AppState {
    /// Wire every service onto one repository
    pub fn new(repository: Arc<dyn MatchRepository>, tokens: TokenService, age_bounds: AgeBounds) -> Self {
        Self {
            accounts: AccountService::new(repository.clone(), tokens),
            discovery: DiscoveryService::new(repository.clone(), age_bounds),
            matcher: SwipeMatcher::new(repository.clone()),
            repository,
        }
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    let response = HttpResponse::BadRequest().json(ErrorResponse {
        error: "invalid_json".to_string(),
        message: "Invalid request payload. Please re-check values using the docs".to_string(),
        status_code: 400,
    });
    error::InternalError::from_response(err, response).into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Query error on {}: {}", req.path(), err);
    let response = HttpResponse::BadRequest().json(ErrorResponse {
        error: "invalid_query".to_string(),
        message: "URL contains invalid query parameter".to_string(),
        status_code: 400,
    });
    error::InternalError::from_response(err, response).into()
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
        .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
        .configure(users::configure)
        .configure(matches::configure);
}
