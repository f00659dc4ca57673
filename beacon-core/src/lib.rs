//! Beacon Core
//!
//! Pipeline status aggregation and presentation for the Beacon CI dashboard.
//!
//! This crate contains:
//! - Domain types: teams, pipelines, jobs and builds as read from the fact store
//! - Status model: reduction of build histories into a pipeline status
//! - Visibility filter and aggregator: the ordered per-viewer snapshot
//! - Presentation mapper: colors and "failing for" annotations
//! - DTOs: the dashboard view handed to renderers
//!
//! Everything here is pure; the current time is always passed in.

pub mod aggregate;
pub mod domain;
pub mod dto;
pub mod presentation;
pub mod status;
pub mod visibility;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

use chrono::{DateTime, Utc};

use crate::domain::team::Team;
use crate::domain::viewer::Viewer;
use crate::dto::dashboard::DashboardView;

/// Computes the dashboard `viewer` sees over `teams` at `now`
pub fn dashboard(teams: &[Team], viewer: &Viewer, now: DateTime<Utc>) -> DashboardView {
    let resolved = viewer.resolve(teams);
    let groups = aggregate::snapshot(teams, &resolved);
    presentation::present(&groups, &resolved, now)
}
