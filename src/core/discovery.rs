use chrono::NaiveDate;
use std::sync::Arc;

use crate::core::{
    age::age_on,
    distance::haversine_distance,
    filters::{AgeBounds, FilterPipeline},
};
use crate::error::MatchError;
use crate::models::{DiscoveryCandidate, DiscoveryCriteria, UserId, UserProfile};
use crate::services::{MatchRepository, RepositoryError};

/// Discovery orchestrator
///
/// # Pipeline Stages
/// 1. Load the acting user and every other user
/// 2. Age range filter (always active, defaults fill missing bounds)
/// 3. Gender filter
/// 4. Maximum distance filter
/// 5. Projection with age and rounded distance
#[derive(Clone)]
pub struct DiscoveryService {
    repository: Arc<dyn MatchRepository>,
    defaults: AgeBounds,
}

impl DiscoveryService {
    pub fn new(repository: Arc<dyn MatchRepository>, defaults: AgeBounds) -> Self {
        Self { repository, defaults }
    }

    /// Discover candidates for `actor_id` as of today (UTC)
    pub async fn discover(
        &self,
        actor_id: UserId,
        criteria: &DiscoveryCriteria,
    ) -> Result<Vec<DiscoveryCandidate>, MatchError> {
        self.discover_on(actor_id, criteria, chrono::Utc::now().date_naive())
            .await
    }

    /// Discover candidates for `actor_id` with ages computed on `today`
    ///
    /// Results keep the repository's candidate order.
    pub async fn discover_on(
        &self,
        actor_id: UserId,
        criteria: &DiscoveryCriteria,
        today: NaiveDate,
    ) -> Result<Vec<DiscoveryCandidate>, MatchError> {
        let actor = self
            .repository
            .get_user(actor_id)
            .await
            .map_err(|err| match err {
                RepositoryError::NotFound(_) => {
                    MatchError::NotFound("Could not find current user".into())
                }
                other => other.into(),
            })?;

        let pipeline = FilterPipeline::from_criteria(criteria, &actor, self.defaults, today)?;

        let candidates = self.repository.list_users_except(actor_id).await?;
        let total = candidates.len();

        let results: Vec<DiscoveryCandidate> = pipeline
            .apply(candidates)
            .into_iter()
            .map(|candidate| project(candidate, &actor, today))
            .collect();

        tracing::info!(
            "Discovered {} candidates for user {} (from {} users)",
            results.len(),
            actor_id,
            total
        );

        Ok(results)
    }
}

fn project(candidate: UserProfile, actor: &UserProfile, today: NaiveDate) -> DiscoveryCandidate {
    let distance_km = haversine_distance(
        candidate.latitude,
        candidate.longitude,
        actor.latitude,
        actor.longitude,
    );

    DiscoveryCandidate {
        id: candidate.id,
        name: candidate.name,
        gender: candidate.gender,
        age: age_on(candidate.birth_date, today),
        distance_from_me: distance_km.round() as i64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, NewUser};
    use crate::services::InMemoryRepository;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    async fn add_user(
        repo: &InMemoryRepository,
        n: u32,
        birth_year: i32,
        gender: Gender,
        lat: f64,
        lon: f64,
    ) -> UserId {
        repo.create_user(NewUser {
            email: format!("user{}@example.com", n),
            password_hash: "hash".to_string(),
            name: format!("username{}", n),
            birth_date: NaiveDate::from_ymd_opt(birth_year, 1, 1).unwrap(),
            gender,
            latitude: lat,
            longitude: lon,
        })
        .await
        .unwrap()
        .id
    }

    #[tokio::test]
    async fn test_excludes_actor_and_projects() {
        let repo = Arc::new(InMemoryRepository::new());
        let me = add_user(&repo, 1, 1990, Gender::Z, 51.5074, -0.1278).await;
        let paris = add_user(&repo, 2, 1994, Gender::Female, 48.8566, 2.3522).await;

        let service = DiscoveryService::new(repo, AgeBounds::default());
        let results = service
            .discover_on(me, &DiscoveryCriteria::default(), today())
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, paris);
        assert_eq!(results[0].age, 30);
        assert!((results[0].distance_from_me - 344).abs() <= 5);
    }

    #[tokio::test]
    async fn test_unknown_actor_not_found() {
        let service = DiscoveryService::new(Arc::new(InMemoryRepository::new()), AgeBounds::default());
        assert!(matches!(
            service.discover_on(1, &DiscoveryCriteria::default(), today()).await,
            Err(MatchError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_no_survivors_yields_empty() {
        let repo = Arc::new(InMemoryRepository::new());
        let me = add_user(&repo, 1, 1990, Gender::Z, 0.0, 0.0).await;
        add_user(&repo, 2, 1990, Gender::Male, 0.0, 0.0).await;

        let criteria = DiscoveryCriteria {
            gender: Some("female".to_string()),
            ..Default::default()
        };

        let service = DiscoveryService::new(repo, AgeBounds::default());
        let results = service.discover_on(me, &criteria, today()).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_criteria_rejected() {
        let repo = Arc::new(InMemoryRepository::new());
        let me = add_user(&repo, 1, 1990, Gender::Z, 0.0, 0.0).await;
        let service = DiscoveryService::new(repo, AgeBounds::default());

        for criteria in [
            DiscoveryCriteria { min_age: Some(-1), ..Default::default() },
            DiscoveryCriteria { gender: Some("robot".into()), ..Default::default() },
            DiscoveryCriteria { max_distance_km: Some(-5.0), ..Default::default() },
        ] {
            assert!(matches!(
                service.discover_on(me, &criteria, today()).await,
                Err(MatchError::InvalidInput(_))
            ));
        }
    }
}
