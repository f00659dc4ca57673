//! Aggregator
//!
//! Builds the per-viewer snapshot: every visible pipeline reduced to a
//! [`PipelineSummary`], grouped by owning team and ordered by severity.
//!
//! Ordering within a team:
//! 1. failed, errored, aborted, succeeded, pending, paused
//! 2. pipelines with running jobs first
//! 3. longest failing first (failed and errored only)
//! 4. pipeline name
//!
//! The viewer's own team comes first and is always present; other teams
//! follow by name and only when they have something visible.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::pipeline::Pipeline;
use crate::domain::team::Team;
use crate::domain::viewer::Viewer;
use crate::status::{self, PipelineStatus};
use crate::visibility;

/// Derived state of one pipeline at one polling instant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineSummary {
    pub pipeline_id: Uuid,
    pub team: String,
    pub name: String,
    pub status: PipelineStatus,
    pub paused: bool,
    pub exposed: bool,
    /// Start of the earliest unresolved failure streak
    pub failing_since: Option<DateTime<Utc>>,
    pub running_jobs: Vec<String>,
}

impl PipelineSummary {
    pub fn of(pipeline: &Pipeline) -> Self {
        Self {
            pipeline_id: pipeline.id,
            team: pipeline.team.clone(),
            name: pipeline.name.clone(),
            status: status::pipeline_status(pipeline),
            paused: pipeline.paused,
            exposed: pipeline.exposed,
            failing_since: status::failing_since(pipeline),
            running_jobs: status::running_jobs(pipeline),
        }
    }

    /// Display severity, lower sorts first
    pub fn display_rank(&self) -> u8 {
        if self.paused {
            return 5;
        }

        match self.status {
            PipelineStatus::Failed => 0,
            PipelineStatus::Errored => 1,
            PipelineStatus::Aborted => 2,
            PipelineStatus::Succeeded => 3,
            PipelineStatus::Pending => 4,
        }
    }

    pub fn is_running(&self) -> bool {
        !self.running_jobs.is_empty()
    }

    /// Failure start shown on the dashboard; paused pipelines show none
    pub fn visible_failing_since(&self) -> Option<DateTime<Utc>> {
        if self.paused { None } else { self.failing_since }
    }
}

/// One team's group of visible pipelines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub team_id: Uuid,
    pub team: String,
    /// Whether this is the viewer's own team
    pub own: bool,
    pub pipelines: Vec<PipelineSummary>,
}

/// Builds the ordered, grouped snapshot for `viewer`
pub fn snapshot(teams: &[Team], viewer: &Viewer) -> Vec<TeamSummary> {
    let viewer = viewer.resolve(teams);

    let mut groups: Vec<TeamSummary> = teams
        .iter()
        .filter_map(|team| {
            let own = viewer.is_member_of(&team.name);

            let mut pipelines: Vec<PipelineSummary> = team
                .pipelines
                .iter()
                .filter(|p| own || visibility::include(p, &viewer))
                .map(PipelineSummary::of)
                .collect();

            if pipelines.is_empty() && !own {
                return None;
            }

            pipelines.sort_by(compare_summaries);

            Some(TeamSummary {
                team_id: team.id,
                team: team.name.clone(),
                own,
                pipelines,
            })
        })
        .collect();

    groups.sort_by(|a, b| b.own.cmp(&a.own).then_with(|| a.team.cmp(&b.team)));
    groups
}

/// Composite severity ordering of two summaries in the same team
pub fn compare_summaries(a: &PipelineSummary, b: &PipelineSummary) -> Ordering {
    a.display_rank()
        .cmp(&b.display_rank())
        .then_with(|| b.is_running().cmp(&a.is_running()))
        .then_with(|| {
            match (a.visible_failing_since(), b.visible_failing_since()) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        })
        .then_with(|| a.name.cmp(&b.name))
}
