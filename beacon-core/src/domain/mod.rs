//! Core domain types
//!
//! This module contains the facts the dashboard reads: teams, their pipelines,
//! the jobs inside each pipeline and the builds of each job. These records are
//! produced by the external scheduler and fact store; the dashboard engine only
//! ever reads them.

pub mod build;
pub mod job;
pub mod pipeline;
pub mod team;
pub mod viewer;
