use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::error::MatchError;
use crate::models::{CreateUserResponse, LoginRequest, LoginResponse, NoQuery};
use crate::routes::AppState;

/// Configure account routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/user/create", web::post().to(create_user))
        .route("/login", web::post().to(login));
}

/// Create a user with randomly generated profile data
///
/// POST /user/create
async fn create_user(
    state: web::Data<AppState>,
    _query: web::Query<NoQuery>,
) -> Result<HttpResponse, MatchError> {
    let result = state.accounts.create_random_user().await?;
    Ok(HttpResponse::Ok().json(CreateUserResponse { result }))
}

/// Exchange credentials for a bearer token
///
/// POST /login
///
/// Request body:
/// ```json
/// {
///   "email": "string",
///   "password": "string"
/// }
/// ```
async fn login(
    state: web::Data<AppState>,
    _query: web::Query<NoQuery>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, MatchError> {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for login request: {:?}", errors);
        return Err(MatchError::InvalidInput(errors.to_string()));
    }

    let token = state.accounts.login(&req.email, &req.password).await?;
    Ok(HttpResponse::Ok().json(LoginResponse { token }))
}
