//! Repository Module
//!
//! Read-only data access to the fact store.
//! Each repository loads one entity type through a caller-supplied connection,
//! so a whole snapshot can be read inside a single transaction.

pub mod build;
pub mod job;
pub mod pipeline;
pub mod team;

// Re-export for convenience
pub use build as build_repository;
pub use job as job_repository;
pub use pipeline as pipeline_repository;
pub use team as team_repository;
