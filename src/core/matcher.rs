use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, Weak};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::error::MatchError;
use crate::models::{NewSwipeDirective, Preference, SwipeOutcome, UserId};
use crate::services::{MatchRepository, RepositoryError};

type PairKey = (UserId, UserId);

/// Registry of per-pair locks keyed by the unordered pair of user IDs
///
/// Only pairs with an outstanding guard keep an entry; dead handles are
/// pruned whenever a new lock is requested.
#[derive(Debug, Default)]
pub struct PairLocks {
    locks: Mutex<HashMap<PairKey, Weak<AsyncMutex<()>>>>,
}

impl PairLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same key for (a, b) and (b, a)
    #[inline]
    pub fn key(a: UserId, b: UserId) -> PairKey {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    /// Wait for exclusive access to the pair
    pub async fn lock(&self, a: UserId, b: UserId) -> OwnedMutexGuard<()> {
        let key = Self::key(a, b);

        let handle = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks.retain(|_, handle| handle.strong_count() > 0);

            match locks.get(&key).and_then(Weak::upgrade) {
                Some(handle) => handle,
                None => {
                    let handle = Arc::new(AsyncMutex::new(()));
                    locks.insert(key, Arc::downgrade(&handle));
                    handle
                }
            }
        };

        handle.lock_owned().await
    }

    /// Number of pairs currently tracked
    pub fn tracked(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|handle| handle.strong_count() > 0)
            .count()
    }
}

/// Records swipes and turns reciprocated "yes" swipes into matches
///
/// The duplicate check, reciprocal lookup and writes for one pair of users run
/// under that pair's lock, so a pair transitions to matched at most once.
#[derive(Clone)]
pub struct SwipeMatcher {
    repository: Arc<dyn MatchRepository>,
    locks: Arc<PairLocks>,
}

impl SwipeMatcher {
    pub fn new(repository: Arc<dyn MatchRepository>) -> Self {
        Self {
            repository,
            locks: Arc::new(PairLocks::new()),
        }
    }

    /// Record `actor_id`'s preference about `target_id`
    ///
    /// `preference` is matched case-insensitively against "yes" and "no".
    /// A second swipe from the same actor on the same target is rejected with
    /// `Conflict`. When the target already swiped "yes" on the actor, both
    /// directives are flagged matched and the target's directive ID is returned.
    pub async fn record_swipe(
        &self,
        actor_id: UserId,
        target_id: UserId,
        preference: &str,
    ) -> Result<SwipeOutcome, MatchError> {
        if actor_id == target_id {
            return Err(MatchError::SelfSwipe);
        }

        let preference = Preference::parse(preference).ok_or_else(|| {
            MatchError::InvalidInput("Invalid preference value. Please enter either YES or NO".into())
        })?;

        self.repository
            .get_user(target_id)
            .await
            .map_err(|err| match err {
                RepositoryError::NotFound(_) => {
                    MatchError::NotFound("Could not find target user".into())
                }
                other => other.into(),
            })?;

        let _guard = self.locks.lock(actor_id, target_id).await;

        if let Some(existing) = self
            .repository
            .find_swipe_directive(actor_id, target_id, None)
            .await?
        {
            return Err(MatchError::Conflict(format!(
                "user {} already swiped on user {} (swipe {})",
                actor_id, target_id, existing.id
            )));
        }

        let pending = NewSwipeDirective {
            actor_id,
            target_id,
            preference,
            matched: false,
        };

        if preference == Preference::Yes {
            let reciprocal = self
                .repository
                .find_swipe_directive(target_id, actor_id, Some(Preference::Yes))
                .await?;

            if let Some(reciprocal) = reciprocal {
                let match_id = reciprocal.id;
                let stored = self.repository.confirm_match(pending, reciprocal).await?;

                tracing::info!(
                    "Match between users {} and {} (swipes {} and {})",
                    actor_id,
                    target_id,
                    stored.id,
                    match_id
                );

                return Ok(SwipeOutcome::matched(match_id));
            }
        }

        let stored = self.repository.create_swipe_directive(pending).await?;
        tracing::info!(
            "Recorded swipe {}: {} -> {} ({})",
            stored.id,
            actor_id,
            target_id,
            preference
        );

        Ok(SwipeOutcome::unmatched())
    }
}
