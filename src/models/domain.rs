use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier of a user
pub type UserId = u64;

/// Unique identifier of a swipe directive
pub type SwipeId = u64;

/// Closed set of genders a profile can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
    Z,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Female, Gender::Male, Gender::Z];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Female => "female",
            Gender::Male => "male",
            Gender::Z => "z",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "female" => Ok(Gender::Female),
            "male" => Ok(Gender::Male),
            "z" => Ok(Gender::Z),
            other => Err(format!("unknown gender '{}'", other)),
        }
    }
}

/// Directional preference one user records about another
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preference {
    Yes,
    No,
}

impl Preference {
    /// Parse a preference case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "yes" => Some(Preference::Yes),
            "no" => Some(Preference::No),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Preference::Yes => "yes",
            Preference::No => "no",
        }
    }
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored user profile with demographic and location data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub name: String,
    #[serde(rename = "birthDate")]
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub latitude: f64,
    pub longitude: f64,
}

/// User data handed to the repository for insertion
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub latitude: f64,
    pub longitude: f64,
}

impl NewUser {
    pub fn into_profile(self, id: UserId) -> UserProfile {
        UserProfile {
            id,
            email: self.email,
            password_hash: self.password_hash,
            name: self.name,
            birth_date: self.birth_date,
            gender: self.gender,
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// One user's recorded decision about another user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwipeDirective {
    pub id: SwipeId,
    #[serde(rename = "actorId")]
    pub actor_id: UserId,
    #[serde(rename = "targetId")]
    pub target_id: UserId,
    pub preference: Preference,
    pub matched: bool,
}

/// Swipe directive that has not been stored yet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewSwipeDirective {
    pub actor_id: UserId,
    pub target_id: UserId,
    pub preference: Preference,
    pub matched: bool,
}

impl NewSwipeDirective {
    pub fn into_directive(self, id: SwipeId) -> SwipeDirective {
        SwipeDirective {
            id,
            actor_id: self.actor_id,
            target_id: self.target_id,
            preference: self.preference,
            matched: self.matched,
        }
    }
}

/// Result of recording a swipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwipeOutcome {
    pub matched: bool,
    #[serde(rename = "matchID", skip_serializing_if = "Option::is_none")]
    pub match_id: Option<SwipeId>,
}

impl SwipeOutcome {
    pub fn unmatched() -> Self {
        Self { matched: false, match_id: None }
    }

    pub fn matched(match_id: SwipeId) -> Self {
        Self { matched: true, match_id: Some(match_id) }
    }
}

/// Discovery result projected for the acting user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryCandidate {
    pub id: UserId,
    pub name: String,
    pub gender: Gender,
    pub age: i32,
    /// Rounded kilometers from the acting user
    #[serde(rename = "distanceFromMe")]
    pub distance_from_me: i64,
}

/// Raw discovery criteria supplied by the caller, validated by the pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryCriteria {
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
    pub gender: Option<String>,
    pub max_distance_km: Option<f64>,
}
