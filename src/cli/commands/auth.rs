use clap::Subcommand;
use serde_json::json;

use crate::cli::config::{load_environment_config, save_environment_config, take_return_to};
use crate::cli::utils::{output_success, prompt_line};
use crate::cli::OutputFormat;
use crate::session::{AuthSession, AuthStatus};

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login to the backend")]
    Login {
        #[arg(help = "Username")]
        username: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Logout and forget the stored token")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,
}

pub async fn handle(
    cmd: AuthCommands,
    session: &AuthSession,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login { username, password } => {
            let password = match password {
                Some(password) => password,
                None => prompt_line("Password: ")?,
            };

            let user = session.login(&username, &password).await?;

            let mut env_config = load_environment_config()?;
            env_config.current_user = Some(user.username.clone());
            save_environment_config(&env_config)?;

            let return_to = take_return_to()?;
            let message = match &return_to {
                Some(location) => format!("Logged in as {} (continue to {})", user.username, location),
                None => format!("Logged in as {}", user.username),
            };
            output_success(
                &output_format,
                &message,
                Some(json!({ "user": user, "return_to": return_to })),
            )
        }
        AuthCommands::Logout => {
            session.logout();

            let mut env_config = load_environment_config()?;
            env_config.current_user = None;
            save_environment_config(&env_config)?;

            output_success(&output_format, "Logged out", None)
        }
        AuthCommands::Status => {
            let snapshot = session.start().await;

            match output_format {
                OutputFormat::Json => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&json!({
                            "status": snapshot.status,
                            "authenticated": snapshot.is_authenticated(),
                            "user": snapshot.user,
                            "api_url": session.client().base_url(),
                        }))?
                    );
                }
                OutputFormat::Text => match (snapshot.status, &snapshot.user) {
                    (AuthStatus::Authenticated, Some(user)) => {
                        println!("Logged in as {} at {}", user.username, session.client().base_url())
                    }
                    _ => println!("Not logged in ({})", session.client().base_url()),
                },
            }
            Ok(())
        }
    }
}
