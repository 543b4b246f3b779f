// Service exports
pub mod accounts;
pub mod auth;
pub mod cache;
pub mod memory;
pub mod postgres;
pub mod repository;

pub use accounts::{generate_profile, AccountService, GeneratedProfile};
pub use auth::{hash_password, verify_password, Claims, TokenService};
pub use cache::{CacheStats, CachedRepository};
pub use memory::InMemoryRepository;
pub use postgres::PostgresRepository;
pub use repository::{MatchRepository, RepositoryError};
