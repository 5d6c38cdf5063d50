use clap::Subcommand;
use serde_json::json;

use super::require_admin;
use crate::admin::form::MIN_PROFICIENCY;
use crate::admin::{DeleteOutcome, SkillsManager};
use crate::cli::utils::{output_empty_collection, output_success, TerminalConfirm};
use crate::cli::OutputFormat;
use crate::session::AuthSession;
use crate::types::Skill;

pub const ADMIN_LOCATION: &str = "/admin/skills";

#[derive(Subcommand)]
pub enum SkillCommands {
    #[command(about = "List all skills")]
    List,

    #[command(about = "Create a skill (requires login)")]
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        category: String,
        #[arg(long, default_value_t = MIN_PROFICIENCY, help = "1 to 5")]
        proficiency: u8,
    },

    #[command(about = "Delete a skill by id (requires login)")]
    Delete {
        id: i64,
        #[arg(long, short = 'y', help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

pub async fn handle(
    cmd: SkillCommands,
    session: &AuthSession,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let mut manager = SkillsManager::new(session.client().clone());

    match cmd {
        SkillCommands::List => {
            let skills = manager.refresh().await?;
            print_skills(skills, &output_format)
        }
        SkillCommands::Create {
            name,
            category,
            proficiency,
        } => {
            require_admin(session, ADMIN_LOCATION).await?;

            manager.form.name = name;
            manager.form.category = category;
            manager.form.proficiency = proficiency;

            let created = manager.submit().await?;
            output_success(
                &output_format,
                &format!("Created skill {} ({})", created.id, created.name),
                Some(json!({ "skill": created })),
            )
        }
        SkillCommands::Delete { id, yes } => {
            require_admin(session, ADMIN_LOCATION).await?;

            match manager.delete(id, &TerminalConfirm { assume_yes: yes }).await? {
                DeleteOutcome::Deleted => output_success(
                    &output_format,
                    &format!("Deleted skill {}", id),
                    Some(json!({ "id": id })),
                ),
                DeleteOutcome::Cancelled => output_success(&output_format, "Cancelled", None),
            }
        }
    }
}

fn print_skills(skills: &[Skill], output_format: &OutputFormat) -> anyhow::Result<()> {
    if skills.is_empty() {
        return output_empty_collection(output_format, "skills", "No skills");
    }

    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({ "skills": skills }))?);
        }
        OutputFormat::Text => {
            println!("{:<6} {:<20} {:<16} {}", "ID", "NAME", "CATEGORY", "PROFICIENCY");
            for skill in skills {
                println!(
                    "{:<6} {:<20} {:<16} {}",
                    skill.id, skill.name, skill.category, skill.proficiency
                );
            }
        }
    }
    Ok(())
}
