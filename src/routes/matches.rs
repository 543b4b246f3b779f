use actix_web::{web, HttpResponse, Responder};

use crate::error::MatchError;
use crate::models::{DiscoverQuery, DiscoverResponse, HealthResponse, NoQuery, SwipeRequest, SwipeResponse};
use crate::routes::{AppState, AuthenticatedUser};

/// Configure discovery and swipe routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/discover", web::get().to(discover))
        .route("/swipe", web::post().to(swipe));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let healthy = state.repository.health_check().await.unwrap_or(false);

    let status = if healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Discover candidates for the authenticated user
///
/// GET /discover?min_age=18&max_age=90&gender=female&max_distance=50
///
/// Every parameter is optional; unknown parameters are rejected.
async fn discover(
    state: web::Data<AppState>,
    query: web::Query<DiscoverQuery>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, MatchError> {
    let criteria = query
        .into_inner()
        .into_criteria()
        .map_err(MatchError::InvalidInput)?;

    let results = state.discovery.discover(user.id(), &criteria).await?;

    Ok(HttpResponse::Ok().json(DiscoverResponse { results }))
}

/// Record a swipe for the authenticated user
///
/// POST /swipe
///
/// Request body:
/// ```json
/// {
///   "targetUserId": 42,
///   "preference": "yes|no"
/// }
/// ```
async fn swipe(
    state: web::Data<AppState>,
    _query: web::Query<NoQuery>,
    user: AuthenticatedUser,
    req: web::Json<SwipeRequest>,
) -> Result<HttpResponse, MatchError> {
    let results = state
        .matcher
        .record_swipe(user.id(), req.target_user_id, &req.preference)
        .await?;

    Ok(HttpResponse::Ok().json(SwipeResponse { results }))
}
