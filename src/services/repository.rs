//! Persistence port between the matching core and its storage backends.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    NewSwipeDirective, NewUser, Preference, SwipeDirective, UserId, UserProfile,
};

/// Errors that can occur when talking to a storage backend
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

/// Storage operations the discovery and swipe flows rely on
#[async_trait]
pub trait MatchRepository: Send + Sync {
    /// Fetch a user, failing with `NotFound` when absent
    async fn get_user(&self, id: UserId) -> Result<UserProfile, RepositoryError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserProfile>, RepositoryError>;

    /// Store a new user, failing with `Conflict` when the email is taken
    async fn create_user(&self, user: NewUser) -> Result<UserProfile, RepositoryError>;

    /// Every user except `id`, ordered by ascending ID
    async fn list_users_except(&self, id: UserId) -> Result<Vec<UserProfile>, RepositoryError>;

    async fn create_swipe_directive(
        &self,
        directive: NewSwipeDirective,
    ) -> Result<SwipeDirective, RepositoryError>;

    /// Earliest directive from `actor_id` to `target_id`, optionally restricted to one preference
    async fn find_swipe_directive(
        &self,
        actor_id: UserId,
        target_id: UserId,
        preference: Option<Preference>,
    ) -> Result<Option<SwipeDirective>, RepositoryError>;

    /// Overwrite a stored directive, failing with `NotFound` for an unknown ID
    async fn update_swipe_directive(&self, directive: &SwipeDirective) -> Result<(), RepositoryError>;

    /// Store `pending` and flag `reciprocal` as matched, as one unit
    ///
    /// Returns the stored directive. On error neither write is visible: a
    /// duplicate `pending` fails with `Conflict`, an unknown `reciprocal`
    /// with `NotFound`.
    async fn confirm_match(
        &self,
        pending: NewSwipeDirective,
        reciprocal: SwipeDirective,
    ) -> Result<SwipeDirective, RepositoryError>;

    async fn health_check(&self) -> Result<bool, RepositoryError> {
        Ok(true)
    }
}
