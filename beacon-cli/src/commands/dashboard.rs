//! Dashboard command handlers
//!
//! Prints the dashboard once or keeps it on screen, redrawing whenever the
//! server reports a change.

use std::time::Duration;

use anyhow::{Context, Result};
use beacon_client::{DashboardClient, DashboardView};
use beacon_core::domain::viewer::Viewer;
use clap::Subcommand;
use colored::*;

use crate::config::Config;
use crate::render::render_view;

/// ANSI clear screen and move the cursor home
const CLEAR: &str = "\x1B[2J\x1B[H";

/// Dashboard subcommands
#[derive(Subcommand)]
pub enum DashboardCommands {
    /// Print the dashboard once
    Show {
        /// Only show this team's group
        #[arg(short, long)]
        group: Option<String>,
    },
    /// Keep the dashboard on screen and redraw it when it changes
    Watch {
        /// Poll interval in seconds
        #[arg(short, long, default_value = "2", value_parser = clap::value_parser!(u64).range(1..=5))]
        interval: u64,

        /// Only show this team's group
        #[arg(short, long)]
        group: Option<String>,
    },
}

/// Handle dashboard commands
pub async fn handle_dashboard_command(command: DashboardCommands, config: &Config) -> Result<()> {
    let client = DashboardClient::new(&config.server_url);

    match command {
        DashboardCommands::Show { group } => show(&client, &config.viewer, group.as_deref()).await,
        DashboardCommands::Watch { interval, group } => {
            watch(
                &client,
                &config.viewer,
                group.as_deref(),
                Duration::from_secs(interval),
            )
            .await
        }
    }
}

/// Print the dashboard once
async fn show(client: &DashboardClient, viewer: &Viewer, group: Option<&str>) -> Result<()> {
    let view = fetch(client, viewer, group)
        .await
        .with_context(|| format!("Failed to fetch dashboard from {}", client.base_url()))?;

    print!("{}", render_view(&view));

    Ok(())
}

/// Redraw the dashboard whenever it changes, until interrupted
///
/// A failed poll keeps the last dashboard on screen and reports the error
/// below it.
async fn watch(
    client: &DashboardClient,
    viewer: &Viewer,
    group: Option<&str>,
    interval: Duration,
) -> Result<()> {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    let mut last: Option<DashboardView> = None;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!();
                return Ok(());
            }
            _ = ticker.tick() => {}
        }

        match fetch(client, viewer, group).await {
            Ok(view) => {
                if last.as_ref() != Some(&view) {
                    print!("{}{}", CLEAR, render_view(&view));
                    last = Some(view);
                }
            }
            Err(e) => {
                eprintln!("{} {}", "✗ Poll failed:".red(), e);
            }
        }
    }
}

/// Fetch the whole dashboard, or only one group of it
async fn fetch(
    client: &DashboardClient,
    viewer: &Viewer,
    group: Option<&str>,
) -> beacon_client::Result<DashboardView> {
    let Some(team) = group else {
        return client.get_dashboard(viewer).await;
    };

    match client.get_team_group(viewer, team).await {
        Ok(group) => Ok(DashboardView {
            viewer: viewer.clone(),
            teams: vec![group],
        }),
        Err(e) if e.is_not_found() => Ok(DashboardView {
            viewer: viewer.clone(),
            teams: vec![],
        }),
        Err(e) => Err(e),
    }
}
