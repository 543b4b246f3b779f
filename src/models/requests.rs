use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{DiscoveryCriteria, UserId};

/// Query parameters accepted by the discover endpoint
///
/// Unknown parameters are rejected; every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiscoverQuery {
    pub min_age: Option<String>,
    pub max_age: Option<String>,
    pub gender: Option<String>,
    pub max_distance: Option<String>,
}

impl DiscoverQuery {
    /// Parse raw query values into discovery criteria
    ///
    /// Empty values count as absent.
    pub fn into_criteria(self) -> Result<DiscoveryCriteria, String> {
        let min_age = parse_optional::<i32>(self.min_age.as_deref()).map_err(|_| {
            "Unable to process age filter value. Please enter values between 18-90".to_string()
        })?;
        let max_age = parse_optional::<i32>(self.max_age.as_deref()).map_err(|_| {
            "Unable to process age filter value. Please enter values between 18-90".to_string()
        })?;
        let max_distance_km = parse_optional::<f64>(self.max_distance.as_deref()).map_err(|_| {
            "Unable to process distance filter value. Please enter a positive numeric value"
                .to_string()
        })?;

        Ok(DiscoveryCriteria {
            min_age,
            max_age,
            gender: self.gender.filter(|g| !g.is_empty()),
            max_distance_km,
        })
    }
}

fn parse_optional<T: std::str::FromStr>(value: Option<&str>) -> Result<Option<T>, T::Err> {
    match value {
        None | Some("") => Ok(None),
        Some(raw) => raw.trim().parse().map(Some),
    }
}

/// Endpoints that take no query parameters reject any that are sent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoQuery {}

/// Request to record a swipe
///
/// `preference` is checked by the matcher so every invalid value gets the same message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SwipeRequest {
    #[serde(alias = "target_user_id", rename = "targetUserId")]
    pub target_user_id: UserId,
    pub preference: String,
}

/// Login credentials
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}
