//! Dashboard API Handlers
//!
//! One-shot and streaming access to the viewer's dashboard.

use axum::{
    Json,
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
};
use beacon_core::dto::dashboard::{DashboardView, TeamGroup};
use futures_util::stream::{self, Stream};

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult};
use crate::api::viewer::ViewerIdentity;

/// GET /api/v1/dashboard
/// Current dashboard for the requesting viewer
pub async fn get_dashboard(
    State(state): State<AppState>,
    ViewerIdentity(viewer): ViewerIdentity,
) -> ApiResult<Json<DashboardView>> {
    tracing::debug!("Rendering dashboard for {}", viewer);

    let view = state.feed.render(&viewer).await?;

    Ok(Json(view))
}

/// GET /api/v1/dashboard/teams/{team}
/// One team's group as the requesting viewer sees it
pub async fn get_team_group(
    State(state): State<AppState>,
    ViewerIdentity(viewer): ViewerIdentity,
    Path(team): Path<String>,
) -> ApiResult<Json<TeamGroup>> {
    tracing::debug!("Rendering team {} for {}", team, viewer);

    let group = state
        .feed
        .render_team(&viewer, &team)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Team {} not found", team)))?;

    Ok(Json(group))
}

/// GET /api/v1/dashboard/stream
/// Server-sent events, one `dashboard` event per changed view
pub async fn stream_dashboard(
    State(state): State<AppState>,
    ViewerIdentity(viewer): ViewerIdentity,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    tracing::info!("Opening dashboard stream for {}", viewer);

    let subscription = state.feed.subscribe(viewer);

    // The subscription lives inside the stream; the client hanging up drops it
    let events = stream::unfold(subscription, |mut subscription| async move {
        let view = subscription.next_view().await?;
        let event = Event::default().event("dashboard").json_data(view.as_ref());
        Some((event, subscription))
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}
