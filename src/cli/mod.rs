pub mod commands;
pub mod config;
pub mod utils;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::api::{ApiClient, ClientConfig, FileCredentialStore};
use crate::session::AuthSession;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Folio CLI - view the portfolio and manage its projects and skills")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, help = "API base URL (overrides FOLIO_API_URL)")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Show the public portfolio: profile, skills and projects")]
    Show,

    #[command(about = "Authentication and token management")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Manage projects (create/delete require login)")]
    Projects {
        #[command(subcommand)]
        cmd: commands::projects::ProjectCommands,
    },

    #[command(about = "Manage skills (create/delete require login)")]
    Skills {
        #[command(subcommand)]
        cmd: commands::skills::SkillCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Build the session every command works through: file-backed token, configured base URL
pub fn build_session(api_url: Option<String>) -> anyhow::Result<AuthSession> {
    let mut client_config = ClientConfig::from_app(crate::config::config());
    if let Some(url) = api_url {
        client_config.base_url = url;
    }

    let credentials = FileCredentialStore::new(config::credentials_path()?);
    let client = ApiClient::new(client_config, Arc::new(credentials))?;
    Ok(AuthSession::new(Arc::new(client)))
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let session = build_session(cli.api_url)?;

    match cli.command {
        Commands::Show => commands::show::handle(&session, output_format).await,
        Commands::Auth { cmd } => commands::auth::handle(cmd, &session, output_format).await,
        Commands::Projects { cmd } => commands::projects::handle(cmd, &session, output_format).await,
        Commands::Skills { cmd } => commands::skills::handle(cmd, &session, output_format).await,
    }
}
