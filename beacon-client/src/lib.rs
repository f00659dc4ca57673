//! Beacon HTTP Client
//!
//! A simple, type-safe HTTP client for the Beacon dashboard server.
//!
//! # Example
//!
//! ```no_run
//! use beacon_client::DashboardClient;
//! use beacon_core::domain::viewer::Viewer;
//!
//! #[tokio::main]
//! async fn main() -> beacon_client::Result<()> {
//!     let client = DashboardClient::new("http://localhost:8080");
//!
//!     let view = client.get_dashboard(&Viewer::Team("main".to_string())).await?;
//!
//!     println!("{} pipeline(s) visible", view.pipeline_count());
//!     Ok(())
//! }
//! ```

mod dashboard;
pub mod error;

// Re-export commonly used types
pub use beacon_core::dto::dashboard::{DashboardView, PipelineCard, TeamGroup};
pub use error::{ClientError, Result};

use beacon_core::domain::viewer::Viewer;
use beacon_core::dto::dashboard::VIEWER_HEADER;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

/// HTTP client for the Beacon dashboard API
#[derive(Debug, Clone)]
pub struct DashboardClient {
    /// Base URL of the server (e.g., "http://localhost:8080")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl DashboardClient {
    /// Create a new dashboard client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the dashboard server (e.g., "http://localhost:8080")
    ///
    /// # Example
    /// ```
    /// use beacon_client::DashboardClient;
    ///
    /// let client = DashboardClient::new("http://localhost:8080");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new dashboard client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the server
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve path segments against the base URL, percent-encoding each one
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;

        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    /// Build a GET request on behalf of `viewer`
    ///
    /// Anonymous viewers send no identity header.
    fn get_as(&self, segments: &[&str], viewer: &Viewer) -> Result<reqwest::RequestBuilder> {
        let request = self.client.get(self.url(segments)?);

        Ok(match viewer.team_name() {
            Some(team) => request.header(VIEWER_HEADER, team),
            None => request,
        })
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// This method checks the status code and returns an appropriate error if
    /// the request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response whose body is ignored
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = DashboardClient::new("http://localhost:8080");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = DashboardClient::new("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::new();
        let client = DashboardClient::with_client("http://localhost:8080", http_client);
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_team_viewer_sends_header() {
        let client = DashboardClient::new("http://localhost:8080");
        let request = client
            .get_as(&["api", "v1", "dashboard"], &Viewer::Team("main".to_string()))
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(request.url().as_str(), "http://localhost:8080/api/v1/dashboard");
        assert_eq!(request.headers()[VIEWER_HEADER], "main");
    }

    #[test]
    fn test_anonymous_viewer_sends_no_header() {
        let client = DashboardClient::new("http://localhost:8080");
        let request = client
            .get_as(&["api", "v1", "dashboard"], &Viewer::Anonymous)
            .unwrap()
            .build()
            .unwrap();

        assert!(request.headers().get(VIEWER_HEADER).is_none());
    }

    #[test]
    fn test_team_names_are_percent_encoded() {
        let client = DashboardClient::new("http://localhost:8080");

        let slash = client.url(&["api", "v1", "dashboard", "teams", "x/y"]).unwrap();
        assert_eq!(
            slash.as_str(),
            "http://localhost:8080/api/v1/dashboard/teams/x%2Fy"
        );

        let hash = client.url(&["api", "v1", "dashboard", "teams", "a#b"]).unwrap();
        assert_eq!(
            hash.as_str(),
            "http://localhost:8080/api/v1/dashboard/teams/a%23b"
        );
    }

    #[test]
    fn test_base_url_path_prefix_is_kept() {
        let client = DashboardClient::new("http://localhost:8080/beacon/");
        let url = client.url(&["health"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/beacon/health");
    }

    #[test]
    fn test_invalid_base_url() {
        let client = DashboardClient::new("not a url");
        assert!(matches!(
            client.url(&["health"]),
            Err(ClientError::InvalidUrl(_))
        ));
    }
}
