// Integration tests for Swipematch

use chrono::NaiveDate;
use std::sync::Arc;
use swipematch::core::{AgeBounds, DiscoveryService, SwipeMatcher};
use swipematch::models::{DiscoveryCriteria, Gender, NewUser, SwipeOutcome, UserId};
use swipematch::services::{CachedRepository, InMemoryRepository, MatchRepository};
use swipematch::MatchError;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

async fn create_test_user(
    repo: &dyn MatchRepository,
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

struct World {
    repo: Arc<dyn MatchRepository>,
    discovery: DiscoveryService,
    matcher: SwipeMatcher,
}

fn world() -> World {
    let repo: Arc<dyn MatchRepository> = Arc::new(CachedRepository::new(
        Arc::new(InMemoryRepository::new()),
        1_000,
        60,
    ));

    World {
        discovery: DiscoveryService::new(repo.clone(), AgeBounds::default()),
        matcher: SwipeMatcher::new(repo.clone()),
        repo,
    }
}

#[tokio::test]
async fn test_integration_end_to_end_discovery() {
    let w = world();
    let repo = w.repo.as_ref();

    // Acting user in New York
    let me = create_test_user(repo, 0, 1990, Gender::Male, 40.7128, -74.0060).await;

    let near_female = create_test_user(repo, 1, 1995, Gender::Female, 40.72, -74.01).await;
    let _near_male = create_test_user(repo, 2, 1995, Gender::Male, 40.73, -74.02).await;
    let _minor = create_test_user(repo, 3, 2010, Gender::Female, 40.71, -74.00).await;
    let _far_female = create_test_user(repo, 4, 1995, Gender::Female, 34.0522, -118.2437).await;
    let old_female = create_test_user(repo, 5, 1950, Gender::Female, 40.70, -73.99).await;

    let criteria = DiscoveryCriteria {
        min_age: None,
        max_age: None,
        gender: Some("female".to_string()),
        max_distance_km: Some(50.0),
    };

    let results = w.discovery.discover_on(me, &criteria, today()).await.unwrap();
    let ids: Vec<UserId> = results.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![near_female, old_female]);

    for result in &results {
        assert_eq!(result.gender, Gender::Female);
        assert!(result.distance_from_me <= 50);
        assert!((18..=90).contains(&result.age));
    }
}

#[tokio::test]
async fn test_discovery_is_idempotent() {
    let w = world();
    let repo = w.repo.as_ref();

    let me = create_test_user(repo, 0, 1990, Gender::Z, 10.0, 10.0).await;
    for n in 1..20 {
        let gender = Gender::ALL[(n % 3) as usize];
        create_test_user(repo, n, 1960 + n as i32, gender, 10.0 + n as f64 * 0.5, 10.0).await;
    }

    let criteria = DiscoveryCriteria {
        min_age: Some(25),
        max_age: Some(60),
        gender: None,
        max_distance_km: Some(800.0),
    };

    let first = w.discovery.discover_on(me, &criteria, today()).await.unwrap();
    let second = w.discovery.discover_on(me, &criteria, today()).await.unwrap();
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_distance_is_rounded_to_whole_km() {
    let w = world();
    let repo = w.repo.as_ref();

    let me = create_test_user(repo, 0, 1990, Gender::Z, 0.0, 0.0).await;
    create_test_user(repo, 1, 1990, Gender::Z, 0.0, 90.0).await;

    let results = w
        .discovery
        .discover_on(me, &DiscoveryCriteria::default(), today())
        .await
        .unwrap();

    // Quarter great circle: 10007.54 km
    assert_eq!(results[0].distance_from_me, 10008);
}

#[tokio::test]
async fn test_swipe_flow_produces_match() {
    let w = world();
    let repo = w.repo.as_ref();

    let alice = create_test_user(repo, 1, 1992, Gender::Female, 0.0, 0.0).await;
    let bob = create_test_user(repo, 2, 1991, Gender::Male, 0.0, 0.0).await;
    let carol = create_test_user(repo, 3, 1993, Gender::Z, 0.0, 0.0).await;

    assert_eq!(
        w.matcher.record_swipe(alice, bob, "yes").await.unwrap(),
        SwipeOutcome::unmatched()
    );
    assert_eq!(
        w.matcher.record_swipe(alice, carol, "no").await.unwrap(),
        SwipeOutcome::unmatched()
    );
    assert_eq!(
        w.matcher.record_swipe(carol, alice, "yes").await.unwrap(),
        SwipeOutcome::unmatched()
    );

    let alice_to_bob = repo.find_swipe_directive(alice, bob, None).await.unwrap().unwrap();
    let outcome = w.matcher.record_swipe(bob, alice, "Yes").await.unwrap();
    assert_eq!(outcome, SwipeOutcome::matched(alice_to_bob.id));

    let alice_to_bob = repo.find_swipe_directive(alice, bob, None).await.unwrap().unwrap();
    let bob_to_alice = repo.find_swipe_directive(bob, alice, None).await.unwrap().unwrap();
    assert!(alice_to_bob.matched && bob_to_alice.matched);

    let carol_to_alice = repo.find_swipe_directive(carol, alice, None).await.unwrap().unwrap();
    assert!(!carol_to_alice.matched);
}

#[tokio::test]
async fn test_swipe_errors() {
    let w = world();
    let repo = w.repo.as_ref();

    let alice = create_test_user(repo, 1, 1992, Gender::Female, 0.0, 0.0).await;
    let bob = create_test_user(repo, 2, 1991, Gender::Male, 0.0, 0.0).await;

    assert!(matches!(
        w.matcher.record_swipe(alice, alice, "yes").await,
        Err(MatchError::SelfSwipe)
    ));
    assert!(matches!(
        w.matcher.record_swipe(alice, bob, "perhaps").await,
        Err(MatchError::InvalidInput(_))
    ));
    assert!(matches!(
        w.matcher.record_swipe(alice, 12345, "yes").await,
        Err(MatchError::NotFound(_))
    ));

    w.matcher.record_swipe(alice, bob, "yes").await.unwrap();
    assert!(matches!(
        w.matcher.record_swipe(alice, bob, "yes").await,
        Err(MatchError::Conflict(_))
    ));
}
