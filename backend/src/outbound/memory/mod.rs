//! In-process adapters for the repository ports.
//!
//! Used when no database URL is configured and by HTTP integration tests.
//! State lives behind a `tokio::sync::RwLock`, so data is lost on restart.

mod point_repository;
mod user_repository;

pub use point_repository::InMemoryPointRepository;
pub use user_repository::InMemoryUserRepository;
