//! Beacon Server
//!
//! Serves the CI dashboard over HTTP.
//!
//! Architecture:
//! - Configuration: settings from environment variables
//! - Sources: read-only access to the fact store (PostgreSQL or fixtures)
//! - Repositories: SQL queries behind the PostgreSQL source
//! - Services: one-shot dashboards and per-viewer live feeds
//! - API: JSON and server-sent event endpoints

pub mod api;
pub mod config;
pub mod db;
pub mod repository;
pub mod service;
pub mod source;
