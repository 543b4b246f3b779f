use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::models::{
    NewSwipeDirective, NewUser, Preference, SwipeDirective, SwipeId, UserId, UserProfile,
};
use crate::services::repository::{MatchRepository, RepositoryError};

#[derive(Debug, Default)]
struct MemoryState {
    users: BTreeMap<UserId, UserProfile>,
    swipes: BTreeMap<SwipeId, SwipeDirective>,
    last_user_id: UserId,
    last_swipe_id: SwipeId,
}

impl MemoryState {
    fn check_unique_pair(&self, directive: &NewSwipeDirective) -> Result<(), RepositoryError> {
        let duplicate = self
            .swipes
            .values()
            .any(|s| s.actor_id == directive.actor_id && s.target_id == directive.target_id);

        if duplicate {
            return Err(RepositoryError::Conflict(format!(
                "user {} already swiped on user {}",
                directive.actor_id, directive.target_id
            )));
        }

        Ok(())
    }

    fn insert_swipe(&mut self, directive: NewSwipeDirective) -> SwipeDirective {
        self.last_swipe_id += 1;
        let stored = directive.into_directive(self.last_swipe_id);
        self.swipes.insert(stored.id, stored.clone());
        stored
    }
}

/// Process-local repository used for development and tests
///
/// Enforces the same uniqueness rules as the Postgres schema: one account
/// per email and one directive per (actor, target) pair.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    state: RwLock<MemoryState>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored directives
    pub async fn swipe_count(&self) -> usize {
        self.state.read().await.swipes.len()
    }

    /// Fetch a directive by ID
    pub async fn swipe(&self, id: SwipeId) -> Option<SwipeDirective> {
        self.state.read().await.swipes.get(&id).cloned()
    }
}

#[async_trait]
impl MatchRepository for InMemoryRepository {
    async fn get_user(&self, id: UserId) -> Result<UserProfile, RepositoryError> {
        self.state
            .read()
            .await
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("user {}", id)))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserProfile>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<UserProfile, RepositoryError> {
        let mut state = self.state.write().await;

        if state.users.values().any(|u| u.email == user.email) {
            return Err(RepositoryError::Conflict(format!("email {} already registered", user.email)));
        }

        state.last_user_id += 1;
        let profile = user.into_profile(state.last_user_id);
        state.users.insert(profile.id, profile.clone());

        Ok(profile)
    }

    async fn list_users_except(&self, id: UserId) -> Result<Vec<UserProfile>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .filter(|u| u.id != id)
            .cloned()
            .collect())
    }

    async fn create_swipe_directive(
        &self,
        directive: NewSwipeDirective,
    ) -> Result<SwipeDirective, RepositoryError> {
        let mut state = self.state.write().await;
        state.check_unique_pair(&directive)?;
        Ok(state.insert_swipe(directive))
    }

    async fn find_swipe_directive(
        &self,
        actor_id: UserId,
        target_id: UserId,
        preference: Option<Preference>,
    ) -> Result<Option<SwipeDirective>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .swipes
            .values()
            .find(|s| {
                s.actor_id == actor_id
                    && s.target_id == target_id
                    && preference.map_or(true, |p| s.preference == p)
            })
            .cloned())
    }

    async fn update_swipe_directive(&self, directive: &SwipeDirective) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;

        match state.swipes.get_mut(&directive.id) {
            Some(stored) => {
                *stored = directive.clone();
                Ok(())
            }
            None => Err(RepositoryError::NotFound(format!("swipe {}", directive.id))),
        }
    }

    /// Both writes happen under one write guard, after every check has passed
    async fn confirm_match(
        &self,
        pending: NewSwipeDirective,
        reciprocal: SwipeDirective,
    ) -> Result<SwipeDirective, RepositoryError> {
        let mut state = self.state.write().await;

        if !state.swipes.contains_key(&reciprocal.id) {
            return Err(RepositoryError::NotFound(format!("swipe {}", reciprocal.id)));
        }
        state.check_unique_pair(&pending)?;

        let stored = state.insert_swipe(NewSwipeDirective { matched: true, ..pending });
        if let Some(existing) = state.swipes.get_mut(&reciprocal.id) {
            existing.matched = true;
        }

        Ok(stored)
    }
}
