//! Video metadata repositories
//!
//! The upload pipeline needs exactly two operations from the metadata store: read a
//! record by id and overwrite it. `VideoRepository` is that seam; `PgVideoRepository`
//! backs it with Postgres and `InMemoryVideoRepository` with a map.

pub mod memory;
pub mod postgres;
pub mod repository;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use memory::InMemoryVideoRepository;
pub use postgres::{connect, run_migrations, PgVideoRepository};
pub use repository::VideoRepository;
