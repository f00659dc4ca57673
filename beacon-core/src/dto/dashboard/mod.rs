//! Dashboard DTOs
//!
//! The view contract handed to the rendering layer on every poll. Groups keep
//! their team boundary so a consumer can address one team's pipelines.

use serde::{Deserialize, Serialize};

use crate::domain::viewer::Viewer;
use crate::presentation::{Color, VisualState};

/// Request header carrying the authenticated team of the viewer
pub const VIEWER_HEADER: &str = "x-beacon-team";

/// Ordered, colored dashboard for one viewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardView {
    /// The viewer this view was computed for, after resolution
    pub viewer: Viewer,
    pub teams: Vec<TeamGroup>,
}

impl DashboardView {
    /// Looks up one team's group by name
    pub fn team(&self, name: &str) -> Option<&TeamGroup> {
        self.teams.iter().find(|group| group.name == name)
    }

    pub fn pipeline_count(&self) -> usize {
        self.teams.iter().map(|group| group.pipelines.len()).sum()
    }
}

/// One team's pipelines, in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamGroup {
    pub name: String,
    /// Whether the viewer belongs to this team
    pub own: bool,
    pub pipelines: Vec<PipelineCard>,
}

/// A single pipeline as rendered on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineCard {
    pub name: String,
    pub visual_state: VisualState,
    pub color: Color,
    pub paused: bool,
    pub exposed: bool,
    /// `"<name> failing for: <duration>"` when failed or errored
    pub failing_for: Option<String>,
    pub running_jobs: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_serializes_tokens_in_lowercase() {
        let card = PipelineCard {
            name: "some-pipeline".to_string(),
            visual_state: VisualState::Errored,
            color: Color::Amber,
            paused: false,
            exposed: true,
            failing_for: Some("some-pipeline failing for: 3s".to_string()),
            running_jobs: vec![],
        };

        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["visual_state"], "errored");
        assert_eq!(json["color"], "amber");
        assert_eq!(json["failing_for"], "some-pipeline failing for: 3s");
    }

    #[test]
    fn test_team_lookup() {
        let view = DashboardView {
            viewer: Viewer::Anonymous,
            teams: vec![TeamGroup {
                name: "main".to_string(),
                own: false,
                pipelines: vec![],
            }],
        };

        assert!(view.team("main").is_some());
        assert!(view.team("other").is_none());
        assert_eq!(view.pipeline_count(), 0);
    }
}
