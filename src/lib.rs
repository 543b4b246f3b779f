//! Swipematch - discovery and swipe-matching backend for a dating app
//!
//! Users discover each other through a filter pipeline (age range, gender,
//! maximum distance) and record yes/no swipes; reciprocated "yes" swipes
//! become matches.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{age_on, haversine_distance, AgeBounds, DiscoveryService, FilterPipeline, SwipeMatcher};
pub use error::MatchError;
pub use models::{DiscoveryCandidate, DiscoveryCriteria, Gender, Preference, SwipeOutcome, UserProfile};
pub use services::{InMemoryRepository, MatchRepository};
