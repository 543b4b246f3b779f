// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    DiscoveryCandidate, DiscoveryCriteria, Gender, NewSwipeDirective, NewUser, Preference,
    SwipeDirective, SwipeId, SwipeOutcome, UserId, UserProfile,
};
pub use requests::{DiscoverQuery, LoginRequest, NoQuery, SwipeRequest};
pub use responses::{
    CreateUserResponse, CreatedUser, DiscoverResponse, ErrorResponse, HealthResponse,
    LoginResponse, SwipeResponse,
};
