use clap::Subcommand;
use serde_json::json;

use super::require_admin;
use crate::admin::{DeleteOutcome, ProjectsManager};
use crate::cli::utils::{output_empty_collection, output_success, TerminalConfirm};
use crate::cli::OutputFormat;
use crate::session::AuthSession;
use crate::types::Project;

pub const ADMIN_LOCATION: &str = "/admin/projects";

#[derive(Subcommand)]
pub enum ProjectCommands {
    #[command(about = "List all projects")]
    List,

    #[command(about = "Create a project (requires login)")]
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long, default_value = "")]
        image_url: String,
        #[arg(long, default_value = "")]
        github_url: String,
        #[arg(long, default_value = "")]
        live_url: String,
        #[arg(long, default_value = "", help = "Comma-separated list, e.g. \"Rust, Go\"")]
        tech_stack: String,
    },

    #[command(about = "Delete a project by id (requires login)")]
    Delete {
        id: i64,
        #[arg(long, short = 'y', help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

pub async fn handle(
    cmd: ProjectCommands,
    session: &AuthSession,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let mut manager = ProjectsManager::new(session.client().clone());

    match cmd {
        ProjectCommands::List => {
            let projects = manager.refresh().await?;
            print_projects(projects, &output_format)
        }
        ProjectCommands::Create {
            title,
            description,
            image_url,
            github_url,
            live_url,
            tech_stack,
        } => {
            require_admin(session, ADMIN_LOCATION).await?;

            manager.form.title = title;
            manager.form.description = description;
            manager.form.image_url = image_url;
            manager.form.github_url = github_url;
            manager.form.live_url = live_url;
            manager.form.tech_stack = tech_stack;

            let created = manager.submit().await?;
            output_success(
                &output_format,
                &format!("Created project {} ({})", created.id, created.title),
                Some(json!({ "project": created })),
            )
        }
        ProjectCommands::Delete { id, yes } => {
            require_admin(session, ADMIN_LOCATION).await?;

            match manager.delete(id, &TerminalConfirm { assume_yes: yes }).await? {
                DeleteOutcome::Deleted => output_success(
                    &output_format,
                    &format!("Deleted project {}", id),
                    Some(json!({ "id": id })),
                ),
                DeleteOutcome::Cancelled => output_success(&output_format, "Cancelled", None),
            }
        }
    }
}

fn print_projects(projects: &[Project], output_format: &OutputFormat) -> anyhow::Result<()> {
    if projects.is_empty() {
        return output_empty_collection(output_format, "projects", "No projects");
    }

    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({ "projects": projects }))?);
        }
        OutputFormat::Text => {
            println!("{:<6} {:<30} {}", "ID", "TITLE", "TECH");
            for project in projects {
                println!(
                    "{:<6} {:<30} {}",
                    project.id,
                    project.title,
                    project.tech_stack.join(", ")
                );
            }
        }
    }
    Ok(())
}
