//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod dashboard;

pub use dashboard::DashboardCommands;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Dashboard display
    Dashboard {
        #[command(subcommand)]
        command: DashboardCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Dashboard { command } => {
            dashboard::handle_dashboard_command(command, config).await
        }
    }
}
