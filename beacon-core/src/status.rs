//! Status model
//!
//! Reduces the build histories of a pipeline's jobs into one aggregate
//! pipeline status, and finds when the current failure streak began.
//!
//! A job contributes the status of its latest *finished* build. A build that is
//! still pending or started marks the job as running but does not hide the
//! outcome of the build before it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::build::{Build, BuildStatus};
use crate::domain::job::Job;
use crate::domain::pipeline::Pipeline;

/// Aggregate health of a whole pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStatus {
    Errored,
    Failed,
    Aborted,
    Succeeded,
    Pending,
}

impl PipelineStatus {
    /// Reduction priority, highest wins
    pub fn priority(self) -> u8 {
        match self {
            PipelineStatus::Errored => 5,
            PipelineStatus::Failed => 4,
            PipelineStatus::Aborted => 3,
            PipelineStatus::Succeeded => 2,
            PipelineStatus::Pending => 1,
        }
    }

    /// Maps a finished build status onto the pipeline status it contributes
    pub fn from_build(status: BuildStatus) -> Option<Self> {
        match status {
            BuildStatus::Succeeded => Some(PipelineStatus::Succeeded),
            BuildStatus::Failed => Some(PipelineStatus::Failed),
            BuildStatus::Errored => Some(PipelineStatus::Errored),
            BuildStatus::Aborted => Some(PipelineStatus::Aborted),
            BuildStatus::Pending | BuildStatus::Started => None,
        }
    }

    /// Failed or errored; these carry a failing duration
    pub fn is_failing(self) -> bool {
        matches!(self, PipelineStatus::Failed | PipelineStatus::Errored)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PipelineStatus::Errored => "errored",
            PipelineStatus::Failed => "failed",
            PipelineStatus::Aborted => "aborted",
            PipelineStatus::Succeeded => "succeeded",
            PipelineStatus::Pending => "pending",
        }
    }
}

impl std::fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of the job's latest build, or `Pending` when it has none
pub fn job_status(job: &Job) -> BuildStatus {
    job.latest_build()
        .map(Build::effective_status)
        .unwrap_or(BuildStatus::Pending)
}

/// The newest build of the job that has finished
pub fn finished_build(job: &Job) -> Option<&Build> {
    job.history_newest_first()
        .into_iter()
        .find(|b| b.effective_status().is_terminal())
}

/// The pipeline status this job contributes to the reduction
pub fn contributing_status(job: &Job) -> Option<PipelineStatus> {
    finished_build(job).and_then(|b| PipelineStatus::from_build(b.effective_status()))
}

/// Whether the job's latest build is queued or in progress
pub fn is_running(job: &Job) -> bool {
    job.latest_build().is_some() && !job_status(job).is_terminal()
}

/// Reduces all jobs of the pipeline into one status
pub fn pipeline_status(pipeline: &Pipeline) -> PipelineStatus {
    pipeline
        .jobs
        .iter()
        .filter_map(contributing_status)
        .max_by_key(|status| status.priority())
        .unwrap_or(PipelineStatus::Pending)
}

/// When the job's current failure streak began
///
/// Walks back from the latest finished build while builds are failed, errored
/// or aborted. Returns `None` unless that latest finished build failed or
/// errored.
pub fn failing_streak_start(job: &Job) -> Option<DateTime<Utc>> {
    let mut history = job
        .history_newest_first()
        .into_iter()
        .filter(|b| b.effective_status().is_terminal());

    let latest = history.next()?;
    if !matches!(
        latest.effective_status(),
        BuildStatus::Failed | BuildStatus::Errored
    ) {
        return None;
    }

    let mut start = latest.began_at();
    for build in history {
        if !build.effective_status().is_unsuccessful() {
            break;
        }
        if let Some(t) = build.began_at() {
            start = Some(start.map_or(t, |s| s.min(t)));
        }
    }

    start
}

/// Earliest unresolved failure across the pipeline's failing jobs
///
/// Only meaningful for failed or errored pipelines; `None` otherwise.
pub fn failing_since(pipeline: &Pipeline) -> Option<DateTime<Utc>> {
    if !pipeline_status(pipeline).is_failing() {
        return None;
    }

    pipeline
        .jobs
        .iter()
        .filter(|job| contributing_status(job).is_some_and(PipelineStatus::is_failing))
        .filter_map(failing_streak_start)
        .min()
}

/// Names of jobs whose latest build is queued or in progress, in job order
pub fn running_jobs(pipeline: &Pipeline) -> Vec<String> {
    pipeline
        .jobs
        .iter()
        .filter(|job| is_running(job))
        .map(|job| job.name.clone())
        .collect()
}
