//! Viewer extraction
//!
//! The authentication proxy in front of the server puts the viewer's team in
//! the `x-beacon-team` header. A missing or blank header means anonymous.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use beacon_core::domain::viewer::Viewer;
use beacon_core::dto::dashboard::VIEWER_HEADER;

/// The viewer of the current request
#[derive(Debug, Clone)]
pub struct ViewerIdentity(pub Viewer);

impl<S> FromRequestParts<S> for ViewerIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let team = parts
            .headers
            .get(VIEWER_HEADER)
            .and_then(|value| value.to_str().ok());

        Ok(ViewerIdentity(Viewer::from_team(team)))
    }
}
