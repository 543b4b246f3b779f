use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::models::{
    NewSwipeDirective, NewUser, Preference, SwipeDirective, UserId, UserProfile,
};
use crate::services::repository::{MatchRepository, RepositoryError};

/// Repository decorator that keeps recently read profiles in memory
///
/// Profiles never change after creation, so entries only expire by TTL or
/// capacity. Swipe directives always go straight to the inner repository.
pub struct CachedRepository {
    inner: Arc<dyn MatchRepository>,
    profiles: moka::future::Cache<UserId, UserProfile>,
}

impl CachedRepository {
    pub fn new(inner: Arc<dyn MatchRepository>, capacity: u64, ttl_secs: u64) -> Self {
        let profiles = moka::future::CacheBuilder::new(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { inner, profiles }
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            profile_entries: self.profiles.entry_count(),
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub profile_entries: u64,
}

#[async_trait]
impl MatchRepository for CachedRepository {
    async fn get_user(&self, id: UserId) -> Result<UserProfile, RepositoryError> {
        if let Some(profile) = self.profiles.get(&id).await {
            tracing::trace!("Profile cache hit: {}", id);
            return Ok(profile);
        }

        let profile = self.inner.get_user(id).await?;
        self.profiles.insert(id, profile.clone()).await;
        Ok(profile)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserProfile>, RepositoryError> {
        self.inner.find_user_by_email(email).await
    }

    async fn create_user(&self, user: NewUser) -> Result<UserProfile, RepositoryError> {
        let profile = self.inner.create_user(user).await?;
        self.profiles.insert(profile.id, profile.clone()).await;
        Ok(profile)
    }

    async fn list_users_except(&self, id: UserId) -> Result<Vec<UserProfile>, RepositoryError> {
        self.inner.list_users_except(id).await
    }

    async fn create_swipe_directive(
        &self,
        directive: NewSwipeDirective,
    ) -> Result<SwipeDirective, RepositoryError> {
        self.inner.create_swipe_directive(directive).await
    }

    async fn find_swipe_directive(
        &self,
        actor_id: UserId,
        target_id: UserId,
        preference: Option<Preference>,
    ) -> Result<Option<SwipeDirective>, RepositoryError> {
        self.inner
            .find_swipe_directive(actor_id, target_id, preference)
            .await
    }

    async fn update_swipe_directive(&self, directive: &SwipeDirective) -> Result<(), RepositoryError> {
        self.inner.update_swipe_directive(directive).await
    }

    async fn confirm_match(
        &self,
        pending: NewSwipeDirective,
        reciprocal: SwipeDirective,
    ) -> Result<SwipeDirective, RepositoryError> {
        self.inner.confirm_match(pending, reciprocal).await
    }

    async fn health_check(&self) -> Result<bool, RepositoryError> {
        self.inner.health_check().await
    }
}
