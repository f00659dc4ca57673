//! Fact builders for tests
//!
//! Times are expressed as second offsets from a fixed instant so scenarios read
//! like a timeline: `finished(3, BuildStatus::Failed, 40)` is build #3 that
//! started 40 seconds after the epoch and ended a second later.

use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use crate::domain::build::{Build, BuildStatus};
use crate::domain::job::Job;
use crate::domain::pipeline::Pipeline;
use crate::domain::team::Team;

/// 2017-07-05 05:05:05 EDT
pub const EPOCH_SECS: i64 = 1_499_245_505;

/// The instant `secs` seconds after the builder epoch
pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(EPOCH_SECS, 0).single().unwrap_or_default() + Duration::seconds(secs)
}

/// A build with explicit timestamps
pub fn build(number: u32, status: BuildStatus, start: Option<i64>, end: Option<i64>) -> Build {
    Build {
        job_id: Uuid::nil(),
        number,
        status,
        start_time: start.map(at),
        end_time: end.map(at),
    }
}

/// A terminal build that ran for one second
pub fn finished(number: u32, status: BuildStatus, started: i64) -> Build {
    build(number, status, Some(started), Some(started + 1))
}

/// A build that is still running
pub fn running(number: u32, started: i64) -> Build {
    build(number, BuildStatus::Started, Some(started), None)
}

pub fn job(name: &str, builds: Vec<Build>) -> Job {
    let id = Uuid::new_v4();
    Job {
        id,
        pipeline_id: Uuid::nil(),
        name: name.to_string(),
        builds: builds
            .into_iter()
            .map(|b| Build { job_id: id, ..b })
            .collect(),
    }
}

/// An unpaused, private pipeline; the owning team is filled in by [`team`]
pub fn pipeline(name: &str, jobs: Vec<Job>) -> Pipeline {
    let id = Uuid::new_v4();
    Pipeline {
        id,
        team: String::new(),
        name: name.to_string(),
        paused: false,
        exposed: false,
        jobs: jobs
            .into_iter()
            .map(|j| Job {
                pipeline_id: id,
                ..j
            })
            .collect(),
    }
}

pub fn exposed(p: Pipeline) -> Pipeline {
    Pipeline { exposed: true, ..p }
}

pub fn paused(p: Pipeline) -> Pipeline {
    Pipeline { paused: true, ..p }
}

pub fn team(name: &str, pipelines: Vec<Pipeline>) -> Team {
    Team {
        id: Uuid::new_v4(),
        name: name.to_string(),
        pipelines: pipelines
            .into_iter()
            .map(|p| Pipeline {
                team: name.to_string(),
                ..p
            })
            .collect(),
    }
}
