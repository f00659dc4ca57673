//! Dashboard API endpoints

use beacon_core::domain::viewer::Viewer;
use beacon_core::dto::dashboard::{DashboardView, TeamGroup};

use crate::DashboardClient;
use crate::error::{ClientError, Result};

impl DashboardClient {
    // =============================================================================
    // Dashboard
    // =============================================================================

    /// Fetch the dashboard `viewer` currently sees
    pub async fn get_dashboard(&self, viewer: &Viewer) -> Result<DashboardView> {
        tracing::debug!("Fetching dashboard for {}", viewer);

        let response = self
            .get_as(&["api", "v1", "dashboard"], viewer)?
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Fetch one team's group as `viewer` sees it
    ///
    /// # Errors
    /// [`ClientError::NotFound`] when the team has nothing visible to `viewer`
    pub async fn get_team_group(&self, viewer: &Viewer, team: &str) -> Result<TeamGroup> {
        tracing::debug!("Fetching team {} for {}", team, viewer);

        let response = self
            .get_as(&["api", "v1", "dashboard", "teams", team], viewer)?
            .send()
            .await?;

        self.handle_response(response).await.map_err(|e| {
            if e.is_not_found() {
                ClientError::NotFound(format!("team {}", team))
            } else {
                e
            }
        })
    }

    // =============================================================================
    // Health
    // =============================================================================

    /// Check that the server is up
    pub async fn health(&self) -> Result<()> {
        let response = self.get_as(&["health"], &Viewer::Anonymous)?.send().await?;

        self.handle_empty_response(response).await
    }
}
