//! Service Module
//!
//! Business logic layer for the dashboard server.
//! Services read facts from a [`FactSource`](crate::source::FactSource) and
//! hand them to the pure aggregation in `beacon-core`.

pub mod clock;
pub mod dashboard;
pub mod feed;

// Re-export for convenience
pub use clock::{Clock, SystemClock};
pub use dashboard as dashboard_service;
pub use feed::{DashboardFeed, FeedSubscription, TickOutcome};
