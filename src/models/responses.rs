use serde::{Deserialize, Serialize};
use crate::models::domain::{DiscoveryCandidate, Gender, SwipeOutcome, UserId};

/// Response for the discover endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoverResponse {
    pub results: Vec<DiscoveryCandidate>,
}

/// Response for the swipe endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwipeResponse {
    pub results: SwipeOutcome,
}

/// Freshly generated user, including the plaintext password needed to log in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedUser {
    pub id: UserId,
    pub email: String,
    pub password: String,
    pub name: String,
    pub gender: Gender,
    pub age: i32,
}

/// Response for the user creation endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserResponse {
    pub result: CreatedUser,
}

/// Response for the login endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
