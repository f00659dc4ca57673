//! In-memory fact source
//!
//! Serves facts loaded from a JSON fixture file. Used for demos and to drive
//! the feed in tests.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Context;
use async_trait::async_trait;
use beacon_core::domain::team::Team;
use beacon_core::domain::viewer::Viewer;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::source::{FactSource, SourceError};

pub struct InMemoryFactSource {
    teams: RwLock<Vec<Team>>,
    unavailable: AtomicBool,
}

impl InMemoryFactSource {
    pub fn new(teams: Vec<Team>) -> Self {
        Self {
            teams: RwLock::new(normalize(teams)),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Loads a fixture file holding a JSON array of teams
    ///
    /// Ids may be omitted; pipelines inherit their team from the enclosing
    /// entry.
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixtures from {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Invalid fixtures in {}", path.display()))
    }

    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let teams: Vec<Team> = serde_json::from_str(raw)?;
        Ok(Self::new(teams))
    }

    /// Swaps the whole fact set
    pub fn replace(&self, teams: Vec<Team>) {
        *self.teams.write() = normalize(teams);
    }

    /// Makes subsequent fetches fail until reset
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

#[async_trait]
impl FactSource for InMemoryFactSource {
    async fn fetch(&self, _viewer: &Viewer) -> Result<Vec<Team>, SourceError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(SourceError::Unavailable("fixtures disabled".to_string()));
        }

        Ok(self.teams.read().clone())
    }
}

/// Fills in missing ids and parent links
fn normalize(mut teams: Vec<Team>) -> Vec<Team> {
    for team in &mut teams {
        if team.id.is_nil() {
            team.id = Uuid::new_v4();
        }

        for pipeline in &mut team.pipelines {
            if pipeline.id.is_nil() {
                pipeline.id = Uuid::new_v4();
            }
            pipeline.team = team.name.clone();

            for job in &mut pipeline.jobs {
                if job.id.is_nil() {
                    job.id = Uuid::new_v4();
                }
                job.pipeline_id = pipeline.id;

                for build in &mut job.builds {
                    build.job_id = job.id;
                }
            }
        }
    }

    teams
}
