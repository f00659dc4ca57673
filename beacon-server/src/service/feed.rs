//! Live dashboard feed
//!
//! Each subscription owns a polling task that recomputes the viewer's
//! dashboard on a fixed interval and publishes it through a watch channel.
//! Unchanged views are not republished, and a failed poll keeps the last
//! published view in place.
//!
//! Dropping the [`FeedSubscription`] stops its task, so no fetch runs for a
//! viewer nobody is watching.

use std::sync::Arc;
use std::time::Duration;

use beacon_core::domain::viewer::Viewer;
use beacon_core::dto::dashboard::{DashboardView, TeamGroup};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, warn};

use crate::service::clock::Clock;
use crate::service::dashboard_service;
use crate::source::{FactSource, SourceError};

/// Latest view published to a subscriber; `None` until the first poll succeeds
pub type LatestView = Option<Arc<DashboardView>>;

/// What a single poll did to the published view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// A new view was published
    Published,
    /// The recomputed view equals the published one
    Unchanged,
    /// The fetch failed and the previous view was kept
    Retained,
}

/// Produces dashboard views, once or continuously
#[derive(Clone)]
pub struct DashboardFeed {
    source: Arc<dyn FactSource>,
    clock: Arc<dyn Clock>,
    interval: Duration,
}

impl DashboardFeed {
    pub fn new(source: Arc<dyn FactSource>, clock: Arc<dyn Clock>, interval: Duration) -> Self {
        Self {
            source,
            clock,
            interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Computes the current view once
    pub async fn render(&self, viewer: &Viewer) -> Result<DashboardView, SourceError> {
        dashboard_service::get_dashboard(self.source.as_ref(), self.clock.as_ref(), viewer).await
    }

    /// Computes one team's group once
    pub async fn render_team(
        &self,
        viewer: &Viewer,
        team: &str,
    ) -> Result<Option<TeamGroup>, SourceError> {
        dashboard_service::get_team_group(self.source.as_ref(), self.clock.as_ref(), viewer, team)
            .await
    }

    /// Starts a polling task for `viewer`
    ///
    /// The first poll runs immediately. Must be called within a Tokio runtime.
    pub fn subscribe(&self, viewer: Viewer) -> FeedSubscription {
        let (tx, rx) = watch::channel(None);
        let feed = self.clone();

        debug!("Starting dashboard feed for {}", viewer);
        let task = tokio::spawn(async move { feed.run(viewer, tx).await });

        FeedSubscription { rx, task }
    }

    async fn run(self, viewer: Viewer, tx: watch::Sender<LatestView>) {
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = tx.closed() => {
                    debug!("Dashboard feed for {} has no subscribers, stopping", viewer);
                    break;
                }
                _ = ticker.tick() => {
                    self.tick(&viewer, &tx).await;
                }
            }
        }
    }

    /// Performs one poll and publishes the result if it changed
    pub async fn tick(&self, viewer: &Viewer, tx: &watch::Sender<LatestView>) -> TickOutcome {
        match self.render(viewer).await {
            Ok(view) => {
                let changed = tx.send_if_modified(|current| {
                    if current.as_deref() == Some(&view) {
                        return false;
                    }
                    *current = Some(Arc::new(view));
                    true
                });

                if changed {
                    debug!("Published new dashboard for {}", viewer);
                    TickOutcome::Published
                } else {
                    TickOutcome::Unchanged
                }
            }
            Err(e) => {
                warn!("Dashboard poll for {} failed, keeping last view: {}", viewer, e);
                TickOutcome::Retained
            }
        }
    }
}

/// A live stream of dashboard views for one viewer
pub struct FeedSubscription {
    rx: watch::Receiver<LatestView>,
    task: JoinHandle<()>,
}

impl FeedSubscription {
    /// The most recently published view, if any
    pub fn current(&self) -> LatestView {
        self.rx.borrow().clone()
    }

    /// Waits for the next published view
    ///
    /// Returns `None` once the polling task has stopped.
    pub async fn next_view(&mut self) -> Option<Arc<DashboardView>> {
        loop {
            self.rx.changed().await.ok()?;
            if let Some(view) = self.rx.borrow_and_update().clone() {
                return Some(view);
            }
        }
    }
}

impl Drop for FeedSubscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}
