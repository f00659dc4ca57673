//! Presentation mapper
//!
//! Turns aggregated summaries into what the dashboard renders: a visual state,
//! a color token and, for failing pipelines, a "failing for" annotation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::{PipelineSummary, TeamSummary};
use crate::domain::viewer::Viewer;
use crate::dto::dashboard::{DashboardView, PipelineCard, TeamGroup};
use crate::status::PipelineStatus;

/// What a pipeline looks like on the dashboard
///
/// Same as [`PipelineStatus`] except that pausing overrides everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualState {
    Errored,
    Failed,
    Aborted,
    Succeeded,
    Paused,
    Pending,
}

impl VisualState {
    pub fn of(summary: &PipelineSummary) -> Self {
        if summary.paused {
            return VisualState::Paused;
        }

        match summary.status {
            PipelineStatus::Errored => VisualState::Errored,
            PipelineStatus::Failed => VisualState::Failed,
            PipelineStatus::Aborted => VisualState::Aborted,
            PipelineStatus::Succeeded => VisualState::Succeeded,
            PipelineStatus::Pending => VisualState::Pending,
        }
    }

    pub fn color(self) -> Color {
        match self {
            VisualState::Errored => Color::Amber,
            VisualState::Failed => Color::Red,
            VisualState::Aborted => Color::Brown,
            VisualState::Succeeded => Color::Green,
            VisualState::Paused => Color::Blue,
            VisualState::Pending => Color::Grey,
        }
    }

    /// Only failing pipelines carry a duration annotation
    pub fn shows_failing_duration(self) -> bool {
        matches!(self, VisualState::Failed | VisualState::Errored)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VisualState::Errored => "errored",
            VisualState::Failed => "failed",
            VisualState::Aborted => "aborted",
            VisualState::Succeeded => "succeeded",
            VisualState::Paused => "paused",
            VisualState::Pending => "pending",
        }
    }
}

impl std::fmt::Display for VisualState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Color token of a pipeline banner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Amber,
    Red,
    Brown,
    Green,
    Blue,
    Grey,
}

impl Color {
    pub fn token(self) -> &'static str {
        match self {
            Color::Amber => "amber",
            Color::Red => "red",
            Color::Brown => "brown",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Grey => "grey",
        }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Amber => (0xE6, 0x7E, 0x22),
            Color::Red => (0xE7, 0x4C, 0x3C),
            Color::Brown => (0x8F, 0x4B, 0x2D),
            Color::Green => (0x2E, 0xCC, 0x71),
            Color::Blue => (0x34, 0x98, 0xDB),
            Color::Grey => (0xEC, 0xF0, 0xF1),
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

/// Whole seconds from `since` to `now`, never negative
pub fn failing_seconds(since: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    (now - since).num_seconds().max(0) as u64
}

/// Renders a duration the way the dashboard shows it
///
/// Under a minute it is plain seconds (`42s`); longer spans show the two most
/// significant units (`3m 5s`, `2h 10m`, `4d 1h`).
pub fn format_duration(secs: u64) -> String {
    const MINUTE: u64 = 60;
    const HOUR: u64 = 60 * MINUTE;
    const DAY: u64 = 24 * HOUR;

    if secs < MINUTE {
        format!("{}s", secs)
    } else if secs < HOUR {
        format!("{}m {}s", secs / MINUTE, secs % MINUTE)
    } else if secs < DAY {
        format!("{}h {}m", secs / HOUR, (secs % HOUR) / MINUTE)
    } else {
        format!("{}d {}h", secs / DAY, (secs % DAY) / HOUR)
    }
}

/// `"<name> failing for: <duration>"` for failing pipelines, `None` otherwise
pub fn annotation(summary: &PipelineSummary, now: DateTime<Utc>) -> Option<String> {
    if !VisualState::of(summary).shows_failing_duration() {
        return None;
    }

    let since = summary.failing_since?;
    Some(format!(
        "{} failing for: {}",
        summary.name,
        format_duration(failing_seconds(since, now))
    ))
}

pub fn card(summary: &PipelineSummary, now: DateTime<Utc>) -> PipelineCard {
    let visual_state = VisualState::of(summary);

    PipelineCard {
        name: summary.name.clone(),
        visual_state,
        color: visual_state.color(),
        paused: summary.paused,
        exposed: summary.exposed,
        failing_for: annotation(summary, now),
        running_jobs: summary.running_jobs.clone(),
    }
}

/// Maps an aggregated snapshot onto the view handed to the rendering layer
pub fn present(groups: &[TeamSummary], viewer: &Viewer, now: DateTime<Utc>) -> DashboardView {
    DashboardView {
        viewer: viewer.clone(),
        teams: groups
            .iter()
            .map(|group| TeamGroup {
                name: group.team.clone(),
                own: group.own,
                pipelines: group.pipelines.iter().map(|s| card(s, now)).collect(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::snapshot;
    use crate::domain::build::BuildStatus;
    use crate::testing::{at, build, finished, job, paused, pipeline, team};

    fn summary(status: PipelineStatus, paused: bool) -> PipelineSummary {
        PipelineSummary {
            pipeline_id: uuid::Uuid::nil(),
            team: "main".to_string(),
            name: "some-pipeline".to_string(),
            status,
            paused,
            exposed: false,
            failing_since: status.is_failing().then(|| at(0)),
            running_jobs: vec![],
        }
    }

    #[yare::parameterized(
        errored = { PipelineStatus::Errored, Color::Amber },
        failed = { PipelineStatus::Failed, Color::Red },
        aborted = { PipelineStatus::Aborted, Color::Brown },
        succeeded = { PipelineStatus::Succeeded, Color::Green },
        pending = { PipelineStatus::Pending, Color::Grey },
    )]
    fn status_color(status: PipelineStatus, expected: Color) {
        assert_eq!(VisualState::of(&summary(status, false)).color(), expected);
    }

    #[yare::parameterized(
        errored = { PipelineStatus::Errored },
        failed = { PipelineStatus::Failed },
        aborted = { PipelineStatus::Aborted },
        succeeded = { PipelineStatus::Succeeded },
        pending = { PipelineStatus::Pending },
    )]
    fn paused_is_always_blue(status: PipelineStatus) {
        let s = summary(status, true);
        assert_eq!(VisualState::of(&s), VisualState::Paused);
        assert_eq!(VisualState::of(&s).color(), Color::Blue);
        assert_eq!(annotation(&s, at(10)), None);
    }

    #[yare::parameterized(
        zero = { 0, "0s" },
        seconds = { 42, "42s" },
        last_second = { 59, "59s" },
        minute = { 60, "1m 0s" },
        minutes = { 185, "3m 5s" },
        hours = { 7_800, "2h 10m" },
        days = { 349_200, "4d 1h" },
    )]
    fn duration_text(secs: u64, expected: &str) {
        assert_eq!(format_duration(secs), expected);
    }

    #[test]
    fn test_failing_annotation_counts_from_streak_start() {
        let teams = vec![team(
            "main",
            vec![pipeline(
                "some-pipeline",
                vec![
                    job(
                        "passing_or_failing",
                        vec![
                            finished(1, BuildStatus::Failed, 0),
                            finished(2, BuildStatus::Succeeded, 10),
                            finished(3, BuildStatus::Failed, 20),
                            finished(4, BuildStatus::Failed, 30),
                        ],
                    ),
                    job("failing", vec![finished(1, BuildStatus::Failed, 40)]),
                ],
            )],
        )];
        let viewer = Viewer::Team("main".to_string());
        let view = present(&snapshot(&teams, &viewer), &viewer, at(20 + 37));

        let card = &view.teams[0].pipelines[0];
        assert_eq!(card.visual_state, VisualState::Failed);
        assert_eq!(card.color, Color::Red);
        assert_eq!(
            card.failing_for.as_deref(),
            Some("some-pipeline failing for: 37s")
        );
    }

    #[test]
    fn test_finished_build_missing_timestamps_renders_errored() {
        let teams = vec![team(
            "main",
            vec![
                pipeline(
                    "untimed",
                    vec![job("j", vec![build(1, BuildStatus::Failed, None, None)])],
                ),
                pipeline(
                    "unended",
                    vec![job("j", vec![build(1, BuildStatus::Succeeded, Some(0), None)])],
                ),
            ],
        )];
        let viewer = Viewer::Team("main".to_string());
        let view = present(&snapshot(&teams, &viewer), &viewer, at(30));

        let untimed = view.teams[0].pipelines.iter().find(|c| c.name == "untimed").unwrap();
        assert_eq!(untimed.visual_state, VisualState::Errored);
        assert_eq!(untimed.color, Color::Amber);
        assert_eq!(untimed.failing_for, None);

        let unended = view.teams[0].pipelines.iter().find(|c| c.name == "unended").unwrap();
        assert_eq!(unended.visual_state, VisualState::Errored);
        assert_eq!(
            unended.failing_for.as_deref(),
            Some("unended failing for: 30s")
        );
    }

    #[test]
    fn test_clock_behind_failure_renders_zero() {
        let s = summary(PipelineStatus::Errored, false);
        assert_eq!(
            annotation(&s, at(-5)).as_deref(),
            Some("some-pipeline failing for: 0s")
        );
    }

    #[test]
    fn test_no_annotation_for_healthy_states() {
        assert_eq!(annotation(&summary(PipelineStatus::Succeeded, false), at(5)), None);
        assert_eq!(annotation(&summary(PipelineStatus::Aborted, false), at(5)), None);
        assert_eq!(annotation(&summary(PipelineStatus::Pending, false), at(5)), None);
    }

    #[test]
    fn test_present_keeps_group_boundaries() {
        let teams = vec![
            team("a", vec![paused(pipeline("p", vec![]))]),
            team("b", vec![crate::testing::exposed(pipeline("q", vec![]))]),
        ];
        let viewer = Viewer::Team("a".to_string());
        let view = present(&snapshot(&teams, &viewer), &viewer, at(0));

        assert_eq!(view.viewer, viewer);
        assert_eq!(view.teams.len(), 2);
        assert_eq!(view.teams[0].name, "a");
        assert!(view.teams[0].own);
        assert_eq!(view.teams[0].pipelines[0].color, Color::Blue);
        assert!(view.teams[0].pipelines[0].paused);
        assert_eq!(view.teams[1].name, "b");
        assert_eq!(view.teams[1].pipelines[0].color, Color::Grey);
        assert!(view.teams[1].pipelines[0].exposed);
    }
}
