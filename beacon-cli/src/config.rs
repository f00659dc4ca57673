//! Configuration module
//!
//! Handles CLI configuration including the server URL and viewer identity.

use beacon_core::domain::viewer::Viewer;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the dashboard server
    pub server_url: String,

    /// Who the dashboard is requested for
    pub viewer: Viewer,
}
