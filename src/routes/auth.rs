use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use std::future::{ready, Ready};

use crate::error::MatchError;
use crate::models::UserId;
use crate::routes::AppState;

/// Identity of the caller, taken from the `Authorization: <scheme> <token>` header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub UserId);

impl AuthenticatedUser {
    pub fn id(&self) -> UserId {
        self.0
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = MatchError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, MatchError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| MatchError::Internal("application state not configured".into()))?;

    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| MatchError::Unauthorized("Request missing authorization header".into()))?;

    let token = auth_header
        .split(' ')
        .nth(1)
        .ok_or_else(|| MatchError::Unauthorized("No authentication token value provided".into()))?;

    state.accounts.tokens().verify(token).map(AuthenticatedUser)
}
