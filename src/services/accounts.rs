use chrono::{Datelike, NaiveDate};
use rand::Rng;
use std::sync::Arc;

use crate::core::age::age_on;
use crate::error::MatchError;
use crate::models::{CreatedUser, Gender, NewUser};
use crate::services::auth::{hash_password, verify_password, TokenService};
use crate::services::repository::MatchRepository;

/// Password given to every generated account
const GENERATED_PASSWORD: &str = "password";

/// Generated ages span 18..=90
const MIN_GENERATED_AGE: i32 = 18;
const MAX_GENERATED_AGE: i32 = 90;

/// Random account fields before hashing
#[derive(Debug, Clone)]
pub struct GeneratedProfile {
    pub email: String,
    pub password: String,
    pub name: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub latitude: f64,
    pub longitude: f64,
}

/// Generate a random profile relative to `today`
///
/// Birth dates fall in January of a year between 90 and 18 years ago.
pub fn generate_profile<R: Rng + ?Sized>(rng: &mut R, today: NaiveDate) -> GeneratedProfile {
    let min_birth_year = today.year() - MAX_GENERATED_AGE;
    let max_birth_year = today.year() - MIN_GENERATED_AGE;

    let year = rng.gen_range(min_birth_year..=max_birth_year);
    // Every January has 31 days, so only an out-of-range year can fail here
    let day = rng.gen_range(1..=31);
    let birth_date = NaiveDate::from_ymd_opt(year, 1, day).unwrap_or(today);

    let suffix: u32 = rng.gen_range(0..1_000_000);

    GeneratedProfile {
        email: format!("user{}@example.com", suffix),
        password: GENERATED_PASSWORD.to_string(),
        name: format!("username{}", suffix),
        birth_date,
        gender: Gender::ALL[rng.gen_range(0..Gender::ALL.len())],
        latitude: rng.gen::<f64>() * 180.0 - 90.0,
        longitude: rng.gen::<f64>() * 360.0 - 180.0,
    }
}

/// Account creation and login
#[derive(Clone)]
pub struct AccountService {
    repository: Arc<dyn MatchRepository>,
    tokens: TokenService,
}

impl AccountService {
    pub fn new(repository: Arc<dyn MatchRepository>, tokens: TokenService) -> Self {
        Self { repository, tokens }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Create an account with randomly generated data
    pub async fn create_random_user(&self) -> Result<CreatedUser, MatchError> {
        let today = chrono::Utc::now().date_naive();
        let generated = generate_profile(&mut rand::thread_rng(), today);
        self.register(generated, today).await
    }

    /// Store a generated profile and describe it back to the caller
    pub async fn register(
        &self,
        generated: GeneratedProfile,
        today: NaiveDate,
    ) -> Result<CreatedUser, MatchError> {
        let password_hash = hash_password(&generated.password)?;

        let profile = self
            .repository
            .create_user(NewUser {
                email: generated.email,
                password_hash,
                name: generated.name,
                birth_date: generated.birth_date,
                gender: generated.gender,
                latitude: generated.latitude,
                longitude: generated.longitude,
            })
            .await?;

        tracing::info!("Created user {} ({})", profile.id, profile.email);

        Ok(CreatedUser {
            id: profile.id,
            email: profile.email,
            password: generated.password,
            name: profile.name,
            gender: profile.gender,
            age: age_on(profile.birth_date, today),
        })
    }

    /// Exchange credentials for a bearer token
    pub async fn login(&self, email: &str, password: &str) -> Result<String, MatchError> {
        let invalid = || MatchError::Unauthorized("Invalid user credentials".into());

        let user = self
            .repository
            .find_user_by_email(email)
            .await?
            .ok_or_else(invalid)?;

        if !verify_password(password, &user.password_hash)? {
            tracing::info!("Rejected login for user {}", user.id);
            return Err(invalid());
        }

        self.tokens.issue(user.id)
    }
}
