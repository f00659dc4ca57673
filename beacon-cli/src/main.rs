//! Beacon CLI
//!
//! Command-line dashboard for the Beacon server.

mod commands;
mod config;
mod render;

use anyhow::Result;
use beacon_core::domain::viewer::Viewer;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;

#[derive(Parser)]
#[command(name = "beacon")]
#[command(about = "Beacon CI dashboard CLI", long_about = None)]
struct Cli {
    /// Dashboard server URL
    #[arg(long, env = "BEACON_SERVER_URL", default_value = "http://localhost:8080")]
    server_url: String,

    /// View the dashboard as a member of this team
    #[arg(long, env = "BEACON_TEAM")]
    team: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config {
        server_url: cli.server_url,
        viewer: Viewer::from_team(cli.team.as_deref()),
    };

    handle_command(cli.command, &config).await
}
