//! Pipeline domain types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::job::Job;

/// A named, team-owned collection of jobs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pipeline {
    #[serde(default)]
    pub id: Uuid,
    /// Name of the owning team, fixed at creation
    #[serde(default)]
    pub team: String,
    pub name: String,
    #[serde(default)]
    pub paused: bool,
    /// Visible to viewers outside the owning team
    #[serde(default)]
    pub exposed: bool,
    #[serde(default)]
    pub jobs: Vec<Job>,
}
