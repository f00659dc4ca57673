//! Team domain types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::pipeline::Pipeline;

/// A team and the pipelines it owns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    #[serde(default)]
    pub id: Uuid,
    /// Unique team name
    pub name: String,
    #[serde(default)]
    pub pipelines: Vec<Pipeline>,
}
