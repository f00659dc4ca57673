//! Fact sources
//!
//! Where the dashboard reads teams, pipelines, jobs and builds from. The
//! server only ever reads; the facts are written by the scheduler.
//!
//! All sources are trait-based so the feed can be driven by an in-memory
//! fixture in tests and demos.

mod memory;
mod postgres;

use std::time::Duration;

use async_trait::async_trait;
use beacon_core::domain::team::Team;
use beacon_core::domain::viewer::Viewer;

pub use memory::InMemoryFactSource;
pub use postgres::PgFactSource;

/// Error returned when a snapshot of facts cannot be read
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("fact source timed out after {0:?}")]
    Timeout(Duration),

    #[error("fact source unavailable: {0}")]
    Unavailable(String),
}

/// Read access to the fact store
#[async_trait]
pub trait FactSource: Send + Sync {
    /// Reads one consistent snapshot of the facts relevant to `viewer`
    ///
    /// Every team is returned, with at least the pipelines the viewer may
    /// see. Sources are free to return more; visibility is enforced again
    /// when the snapshot is aggregated.
    async fn fetch(&self, viewer: &Viewer) -> Result<Vec<Team>, SourceError>;
}
