//! Visibility filter
//!
//! A pipeline is visible to members of its owning team, and to everyone once
//! it has been exposed.

use crate::domain::pipeline::Pipeline;
use crate::domain::viewer::Viewer;

/// Whether `viewer` may see `pipeline`
pub fn include(pipeline: &Pipeline, viewer: &Viewer) -> bool {
    pipeline.exposed || viewer.is_member_of(&pipeline.team)
}
