//! Dashboard Service
//!
//! One-shot dashboard computation for a viewer.

use beacon_core::domain::viewer::Viewer;
use beacon_core::dto::dashboard::{DashboardView, TeamGroup};

use crate::service::clock::Clock;
use crate::source::{FactSource, SourceError};

pub type Result<T> = std::result::Result<T, SourceError>;

/// Computes the dashboard `viewer` currently sees
pub async fn get_dashboard(
    source: &dyn FactSource,
    clock: &dyn Clock,
    viewer: &Viewer,
) -> Result<DashboardView> {
    let teams = source.fetch(viewer).await?;

    if !viewer.is_known(&teams) {
        tracing::debug!("Unknown viewer {}, serving the public dashboard", viewer);
    }

    // Sampled after the fetch, never before
    let now = clock.now();

    Ok(beacon_core::dashboard(&teams, viewer, now))
}

/// One team's group as `viewer` sees it, `None` when nothing of it is visible
pub async fn get_team_group(
    source: &dyn FactSource,
    clock: &dyn Clock,
    viewer: &Viewer,
    team: &str,
) -> Result<Option<TeamGroup>> {
    let view = get_dashboard(source, clock, viewer).await?;
    Ok(view.teams.into_iter().find(|group| group.name == team))
}
