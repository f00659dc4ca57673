//! Data Transfer Objects
//!
//! Shapes exchanged between the dashboard server and its consumers (the web
//! layer, the HTTP client and the CLI).

pub mod dashboard;
