use chrono::NaiveDate;

use crate::core::{age::age_on, distance::haversine_distance};
use crate::error::MatchError;
use crate::models::{DiscoveryCriteria, Gender, UserProfile};

/// A single predicate stage of the discovery pipeline
pub trait CandidateFilter: Send + Sync {
    /// Stable name for logging
    fn name(&self) -> &'static str;

    /// Whether the candidate survives this stage
    fn keep(&self, candidate: &UserProfile) -> bool;
}

/// Age bounds applied when the caller leaves one or both unspecified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeBounds {
    pub min: i32,
    pub max: i32,
}

impl Default for AgeBounds {
    fn default() -> Self {
        Self { min: 18, max: 90 }
    }
}

/// Keeps candidates whose age on `today` lies in `[min_age, max_age]`
#[derive(Debug, Clone)]
pub struct AgeRangeFilter {
    min_age: i32,
    max_age: i32,
    today: NaiveDate,
}

impl AgeRangeFilter {
    /// Negative bounds are rejected. `min_age > max_age` is accepted and keeps nothing.
    pub fn new(min_age: i32, max_age: i32, today: NaiveDate) -> Result<Self, MatchError> {
        if min_age < 0 || max_age < 0 {
            return Err(MatchError::InvalidInput(
                "Unable to process age filter value. Please enter values between 18-90".into(),
            ));
        }

        Ok(Self { min_age, max_age, today })
    }
}

impl CandidateFilter for AgeRangeFilter {
    fn name(&self) -> &'static str {
        "age_range"
    }

    #[inline]
    fn keep(&self, candidate: &UserProfile) -> bool {
        let age = age_on(candidate.birth_date, self.today);
        age >= self.min_age && age <= self.max_age
    }
}

/// Keeps candidates of exactly one gender
#[derive(Debug, Clone, Copy)]
pub struct GenderFilter {
    gender: Gender,
}

impl GenderFilter {
    pub fn new(gender: Gender) -> Self {
        Self { gender }
    }

    /// An empty value disables the filter; unknown values are rejected
    pub fn parse(raw: &str) -> Result<Option<Self>, MatchError> {
        if raw.is_empty() {
            return Ok(None);
        }

        raw.parse::<Gender>().map(|g| Some(Self::new(g))).map_err(|_| {
            MatchError::InvalidInput(
                "Unable to process gender filter value. Please enter either female, male, or z"
                    .into(),
            )
        })
    }
}

impl CandidateFilter for GenderFilter {
    fn name(&self) -> &'static str {
        "gender"
    }

    #[inline]
    fn keep(&self, candidate: &UserProfile) -> bool {
        candidate.gender == self.gender
    }
}

/// Keeps candidates within `max_km` of an origin point
#[derive(Debug, Clone, Copy)]
pub struct MaxDistanceFilter {
    origin_lat: f64,
    origin_lon: f64,
    max_km: f64,
}

impl MaxDistanceFilter {
    /// `max_km` must be a finite, non-negative number
    pub fn new(origin_lat: f64, origin_lon: f64, max_km: f64) -> Result<Self, MatchError> {
        if !max_km.is_finite() || max_km < 0.0 {
            return Err(MatchError::InvalidInput(
                "Unable to process distance filter value. Please enter a positive numeric value"
                    .into(),
            ));
        }

        Ok(Self { origin_lat, origin_lon, max_km })
    }
}

impl CandidateFilter for MaxDistanceFilter {
    fn name(&self) -> &'static str {
        "max_distance"
    }

    #[inline]
    fn keep(&self, candidate: &UserProfile) -> bool {
        haversine_distance(
            candidate.latitude,
            candidate.longitude,
            self.origin_lat,
            self.origin_lon,
        ) <= self.max_km
    }
}

/// Ordered set of filter stages combined with logical AND
///
/// Stages run sequentially and each keeps the relative order of its input,
/// so the output is a stable subsequence of the candidates.
#[derive(Default)]
pub struct FilterPipeline {
    stages: Vec<Box<dyn CandidateFilter>>,
}

impl FilterPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage
    pub fn with<F: CandidateFilter + 'static>(mut self, filter: F) -> Self {
        self.stages.push(Box::new(filter));
        self
    }

    /// Append a stage when present
    pub fn with_optional<F: CandidateFilter + 'static>(self, filter: Option<F>) -> Self {
        match filter {
            Some(filter) => self.with(filter),
            None => self,
        }
    }

    /// Build the discovery pipeline: age range, then gender, then distance from `origin`
    ///
    /// The age stage is always active and falls back to `defaults` for missing bounds.
    pub fn from_criteria(
        criteria: &DiscoveryCriteria,
        origin: &UserProfile,
        defaults: AgeBounds,
        today: NaiveDate,
    ) -> Result<Self, MatchError> {
        let age = AgeRangeFilter::new(
            criteria.min_age.unwrap_or(defaults.min),
            criteria.max_age.unwrap_or(defaults.max),
            today,
        )?;

        let gender = match criteria.gender.as_deref() {
            Some(raw) => GenderFilter::parse(raw)?,
            None => None,
        };

        let distance = criteria
            .max_distance_km
            .map(|max_km| MaxDistanceFilter::new(origin.latitude, origin.longitude, max_km))
            .transpose()?;

        Ok(Self::new()
            .with(age)
            .with_optional(gender)
            .with_optional(distance))
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Whether a single candidate passes every stage
    pub fn keeps(&self, candidate: &UserProfile) -> bool {
        self.stages.iter().all(|stage| stage.keep(candidate))
    }

    /// Run every stage over the candidates
    pub fn apply(&self, mut candidates: Vec<UserProfile>) -> Vec<UserProfile> {
        for stage in &self.stages {
            let before = candidates.len();
            candidates.retain(|candidate| stage.keep(candidate));
            tracing::debug!(
                "Filter stage {} kept {}/{} candidates",
                stage.name(),
                candidates.len(),
                before
            );
        }

        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn create_test_profile(id: u64, birth: (i32, u32, u32), gender: Gender, lat: f64, lon: f64) -> UserProfile {
        UserProfile {
            id,
            email: format!("user{}@example.com", id),
            password_hash: String::new(),
            name: format!("username{}", id),
            birth_date: NaiveDate::from_ymd_opt(birth.0, birth.1, birth.2).unwrap(),
            gender,
            latitude: lat,
            longitude: lon,
        }
    }

    fn ids(profiles: &[UserProfile]) -> Vec<u64> {
        profiles.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_empty_pipeline_is_identity() {
        let candidates = vec![
            create_test_profile(3, (1990, 1, 1), Gender::Male, 0.0, 0.0),
            create_test_profile(1, (2010, 1, 1), Gender::Z, 80.0, 170.0),
            create_test_profile(2, (1950, 1, 1), Gender::Female, -10.0, 5.0),
        ];

        let pipeline = FilterPipeline::new();
        assert!(pipeline.is_empty());
        assert_eq!(ids(&pipeline.apply(candidates)), vec![3, 1, 2]);
    }

    #[test]
    fn test_age_range_bounds_inclusive() {
        let candidates = vec![
            create_test_profile(1, (2006, 6, 16), Gender::Male, 0.0, 0.0), // 17
            create_test_profile(2, (2006, 6, 15), Gender::Male, 0.0, 0.0), // 18
            create_test_profile(3, (1934, 6, 15), Gender::Male, 0.0, 0.0), // 90
            create_test_profile(4, (1934, 6, 14), Gender::Male, 0.0, 0.0), // 90
            create_test_profile(5, (1933, 6, 15), Gender::Male, 0.0, 0.0), // 91
        ];

        let pipeline = FilterPipeline::new().with(AgeRangeFilter::new(18, 90, today()).unwrap());
        assert_eq!(ids(&pipeline.apply(candidates)), vec![2, 3, 4]);
    }

    #[test]
    fn test_negative_age_rejected() {
        assert!(matches!(
            AgeRangeFilter::new(-1, 30, today()),
            Err(MatchError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_empty_gender_is_pass_through() {
        assert!(GenderFilter::parse("").unwrap().is_none());
    }

    #[test]
    fn test_gender_filter_excludes_others() {
        let candidates = vec![
            create_test_profile(1, (1990, 1, 1), Gender::Female, 0.0, 0.0),
            create_test_profile(2, (1990, 1, 1), Gender::Male, 0.0, 0.0),
            create_test_profile(3, (1990, 1, 1), Gender::Z, 0.0, 0.0),
            create_test_profile(4, (1990, 1, 1), Gender::Male, 0.0, 0.0),
        ];

        let pipeline = FilterPipeline::new().with_optional(GenderFilter::parse("male").unwrap());
        assert_eq!(ids(&pipeline.apply(candidates)), vec![2, 4]);
    }

    #[test]
    fn test_unknown_gender_rejected() {
        assert!(GenderFilter::parse("other").is_err());
        assert!(GenderFilter::parse("Male").is_err());
    }

    #[test]
    fn test_distance_filter() {
        // London origin; Paris ~344km, New York ~5570km
        let candidates = vec![
            create_test_profile(1, (1990, 1, 1), Gender::Z, 48.8566, 2.3522),
            create_test_profile(2, (1990, 1, 1), Gender::Z, 40.7128, -74.0060),
        ];

        let filter = MaxDistanceFilter::new(51.5074, -0.1278, 500.0).unwrap();
        let pipeline = FilterPipeline::new().with(filter);
        assert_eq!(ids(&pipeline.apply(candidates)), vec![1]);
    }

    #[test]
    fn test_zero_distance_keeps_colocated() {
        let candidate = create_test_profile(1, (1990, 1, 1), Gender::Z, 10.0, 10.0);
        let filter = MaxDistanceFilter::new(10.0, 10.0, 0.0).unwrap();
        assert!(filter.keep(&candidate));
    }

    #[test]
    fn test_invalid_distance_rejected() {
        assert!(MaxDistanceFilter::new(0.0, 0.0, -1.0).is_err());
        assert!(MaxDistanceFilter::new(0.0, 0.0, f64::NAN).is_err());
    }

    #[test]
    fn test_from_criteria_uses_default_age_bounds() {
        let origin = create_test_profile(99, (1990, 1, 1), Gender::Z, 0.0, 0.0);
        let pipeline = FilterPipeline::from_criteria(
            &DiscoveryCriteria::default(),
            &origin,
            AgeBounds::default(),
            today(),
        )
        .unwrap();

        assert_eq!(pipeline.len(), 1);
        let minor = create_test_profile(1, (2010, 1, 1), Gender::Z, 0.0, 0.0);
        assert!(!pipeline.keeps(&minor));
    }

    #[test]
    fn test_from_criteria_builds_all_stages() {
        let origin = create_test_profile(99, (1990, 1, 1), Gender::Z, 0.0, 0.0);
        let criteria = DiscoveryCriteria {
            min_age: Some(20),
            max_age: None,
            gender: Some("female".to_string()),
            max_distance_km: Some(100.0),
        };

        let pipeline =
            FilterPipeline::from_criteria(&criteria, &origin, AgeBounds::default(), today()).unwrap();
        assert_eq!(pipeline.len(), 3);
    }

    #[test]
    fn test_stage_order_does_not_change_result() {
        let candidates: Vec<UserProfile> = (0..30)
            .map(|i| {
                let gender = Gender::ALL[(i % 3) as usize];
                create_test_profile(i, (1960 + (i as i32 % 50), 1, 1), gender, i as f64 * 0.1, 0.0)
            })
            .collect();

        let age = AgeRangeFilter::new(25, 45, today()).unwrap();
        let gender = GenderFilter::new(Gender::Female);
        let distance = MaxDistanceFilter::new(0.0, 0.0, 200.0).unwrap();

        let forward = FilterPipeline::new()
            .with(age.clone())
            .with(gender)
            .with(distance)
            .apply(candidates.clone());
        let reversed = FilterPipeline::new()
            .with(distance)
            .with(gender)
            .with(age)
            .apply(candidates);

        assert_eq!(ids(&forward), ids(&reversed));
    }
}
