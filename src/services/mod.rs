// Service exports
pub mod cache;
pub mod postgres;
pub mod repository;

pub use cache::{CacheError, CacheKey, CacheManager, CacheStats};
pub use postgres::{PgProfileRepository, Relation};
pub use repository::{InMemoryProfileRepository, ProfileRepository, RepositoryError};
