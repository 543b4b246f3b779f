// Core algorithm exports
pub mod age;
pub mod discovery;
pub mod distance;
pub mod filters;
pub mod matcher;

pub use age::age_on;
pub use discovery::DiscoveryService;
pub use distance::haversine_distance;
pub use filters::{
    AgeBounds, AgeRangeFilter, CandidateFilter, FilterPipeline, GenderFilter, MaxDistanceFilter,
};
pub use matcher::{PairLocks, SwipeMatcher};
