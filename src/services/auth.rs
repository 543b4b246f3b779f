//! Credential hashing and bearer token handling
//!
//! Passwords are hashed with argon2id. Tokens are HS256 JWTs carrying the
//! user ID; the signing secret and lifetime come from configuration.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::MatchError;
use crate::models::UserId;

/// Payload stored in the bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: UserId,
    /// Issued at (Unix timestamp)
    pub iat: u64,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
}

/// Issues and validates bearer tokens
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: u64,
}

impl TokenService {
    pub fn new(secret: &str, ttl_secs: u64) -> Result<Self, MatchError> {
        if secret.is_empty() {
            return Err(MatchError::Internal("JWT secret must not be empty".into()));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        })
    }

    /// Generate a token for an authenticated user
    pub fn issue(&self, user_id: UserId) -> Result<String, MatchError> {
        let now = chrono::Utc::now().timestamp().max(0) as u64;
        let claims = Claims {
            user_id,
            iat: now,
            exp: now + self.ttl_secs,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| MatchError::Internal(format!("Could not generate user authentication token: {}", e)))
    }

    /// Validate a token and return the user it was issued to
    pub fn verify(&self, token: &str) -> Result<UserId, MatchError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims.user_id)
            .map_err(|e| {
                tracing::debug!("Token rejected: {}", e);
                MatchError::Unauthorized("Could not authenticate token".into())
            })
    }
}

/// Hash a password using Argon2id
pub fn hash_password(password: &str) -> Result<String, MatchError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| MatchError::Internal(format!("Failed to hash password: {}", e)))
}

/// Verify a password against a stored hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, MatchError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| MatchError::Internal(format!("Invalid password hash format: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_verify() {
        let tokens = TokenService::new("test-secret", 3600).unwrap();
        let token = tokens.issue(42).unwrap();
        assert_eq!(tokens.verify(&token).unwrap(), 42);
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let ours = TokenService::new("ours", 3600).unwrap();
        let theirs = TokenService::new("theirs", 3600).unwrap();

        let token = theirs.issue(1).unwrap();
        assert!(matches!(ours.verify(&token), Err(MatchError::Unauthorized(_))));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let tokens = TokenService::new("test-secret", 3600).unwrap();
        assert!(tokens.verify("not.a.token").is_err());
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(TokenService::new("", 3600).is_err());
    }

    #[test]
    fn test_hash_and_verify_password() {
        let hash = hash_password("password").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("password", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }
}
