//! `collabdesk` command line interface.
//!
//! Every command runs a page controller against the server through
//! [`client::ApiClient`].

pub mod client;
mod commands;
pub mod error;

use clap::{Parser, Subcommand};
use collabdesk_core::{AppConfig, EntityId};

#[derive(Debug, Parser)]
#[command(name = "collabdesk")]
#[command(about = "Manage influencers, brands and campaigns on a collabdesk server")]
pub struct Cli {
    /// Server base URL. Defaults to `COLLABDESK_API_URL`.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Influencer roster.
    Influencers {
        #[command(subcommand)]
        action: RecordAction,
    },
    /// Brand accounts.
    Brands {
        #[command(subcommand)]
        action: RecordAction,
    },
    /// Campaigns, shown with influencer and brand names.
    Campaigns {
        #[command(subcommand)]
        action: RecordAction,
    },
    /// Stats, pending payments, pending drafts and recent posts.
    Dashboard,
    /// Notification feed.
    Notifications {
        /// Mark every unread notification as read.
        #[arg(long)]
        read_all: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum RecordAction {
    List {
        /// Case-insensitive substring filter.
        #[arg(long)]
        search: Option<String>,
    },
    Add {
        /// The full record as a JSON object (camelCase fields).
        #[arg(long)]
        json: String,
    },
    Update {
        id: EntityId,
        /// Fields to change as a JSON object; `null` clears optional fields.
        #[arg(long)]
        json: String,
    },
    Delete {
        id: EntityId,
    },
}

/// Runs one parsed command line.
///
/// # Errors
///
/// Returns an error if the client cannot be built, the JSON argument is
/// malformed, or the server call fails.
pub async fn run(cli: Cli, config: &AppConfig) -> anyhow::Result<()> {
    let api_url = cli.api_url.as_deref().unwrap_or(&config.api_url);
    let client = client::ApiClient::new(api_url, config.client_timeout_secs)?;
    tracing::debug!(api_url, "using collabdesk server");

    match cli.command {
        Some(Commands::Influencers { action }) => {
            commands::run_records::<collabdesk_core::Influencer>(client, action).await
        }
        Some(Commands::Brands { action }) => {
            commands::run_records::<collabdesk_core::Brand>(client, action).await
        }
        Some(Commands::Campaigns { action }) => commands::run_campaigns(client, action).await,
        Some(Commands::Dashboard) => commands::run_dashboard(&client).await,
        Some(Commands::Notifications { read_all }) => {
            commands::run_notifications(&client, read_all).await
        }
        None => {
            println!("collabdesk: no command given; try --help");
            Ok(())
        }
    }
}
