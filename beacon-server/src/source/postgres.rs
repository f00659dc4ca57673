//! PostgreSQL fact source

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use beacon_core::domain::build::Build;
use beacon_core::domain::job::Job;
use beacon_core::domain::pipeline::Pipeline;
use beacon_core::domain::team::Team;
use beacon_core::domain::viewer::Viewer;
use sqlx::PgPool;
use uuid::Uuid;

use crate::repository::{
    build_repository, job_repository, pipeline_repository, team_repository,
};
use crate::source::{FactSource, SourceError};

/// Reads facts from PostgreSQL
///
/// Each fetch runs inside a single read-only, repeatable-read transaction so
/// the snapshot never mixes facts from before and after a concurrent write.
pub struct PgFactSource {
    pool: PgPool,
    timeout: Duration,
}

impl PgFactSource {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    async fn load(&self, viewer: &Viewer) -> Result<Vec<Team>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let teams = team_repository::list_all(&mut tx).await?;
        let pipelines = pipeline_repository::list_visible(&mut tx, viewer.team_name()).await?;

        let pipeline_ids: Vec<Uuid> = pipelines.iter().map(|p| p.id).collect();
        let jobs = job_repository::list_for_pipelines(&mut tx, &pipeline_ids).await?;

        let job_ids: Vec<Uuid> = jobs.iter().map(|j| j.id).collect();
        let builds = build_repository::list_for_jobs(&mut tx, &job_ids).await?;

        tx.commit().await?;

        tracing::debug!(
            "Loaded {} team(s), {} pipeline(s), {} job(s), {} build(s) for {}",
            teams.len(),
            pipelines.len(),
            jobs.len(),
            builds.len(),
            viewer
        );

        Ok(assemble(teams, pipelines, jobs, builds))
    }
}

#[async_trait]
impl FactSource for PgFactSource {
    async fn fetch(&self, viewer: &Viewer) -> Result<Vec<Team>, SourceError> {
        let teams = tokio::time::timeout(self.timeout, self.load(viewer))
            .await
            .map_err(|_| SourceError::Timeout(self.timeout))??;

        Ok(teams)
    }
}

/// Nests flat rows into the team > pipeline > job > build tree
///
/// Input order is preserved at every level. Rows whose parent is missing
/// are dropped.
fn assemble(
    mut teams: Vec<Team>,
    pipelines: Vec<Pipeline>,
    jobs: Vec<Job>,
    builds: Vec<Build>,
) -> Vec<Team> {
    let mut builds_by_job: HashMap<Uuid, Vec<Build>> = HashMap::new();
    for build in builds {
        builds_by_job.entry(build.job_id).or_default().push(build);
    }

    let mut jobs_by_pipeline: HashMap<Uuid, Vec<Job>> = HashMap::new();
    for mut job in jobs {
        job.builds = builds_by_job.remove(&job.id).unwrap_or_default();
        jobs_by_pipeline.entry(job.pipeline_id).or_default().push(job);
    }

    let mut pipelines_by_team: HashMap<String, Vec<Pipeline>> = HashMap::new();
    for mut pipeline in pipelines {
        pipeline.jobs = jobs_by_pipeline.remove(&pipeline.id).unwrap_or_default();
        pipelines_by_team
            .entry(pipeline.team.clone())
            .or_default()
            .push(pipeline);
    }

    for team in &mut teams {
        team.pipelines = pipelines_by_team.remove(&team.name).unwrap_or_default();
    }

    teams
}
