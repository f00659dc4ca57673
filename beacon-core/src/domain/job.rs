//! Job domain types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::build::Build;

/// A named unit of work within a pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    #[serde(default)]
    pub id: Uuid,
    #[serde(default)]
    pub pipeline_id: Uuid,
    pub name: String,
    /// Build history in creation order
    #[serde(default)]
    pub builds: Vec<Build>,
}

impl Job {
    /// The build with the highest sequence number
    pub fn latest_build(&self) -> Option<&Build> {
        self.builds.iter().max_by_key(|b| b.number)
    }

    /// Builds ordered newest first, regardless of how they were stored
    pub fn history_newest_first(&self) -> Vec<&Build> {
        let mut builds: Vec<&Build> = self.builds.iter().collect();
        builds.sort_by(|a, b| b.number.cmp(&a.number));
        builds
    }
}
