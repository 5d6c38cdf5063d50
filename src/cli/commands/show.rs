use serde_json::json;

use crate::cli::OutputFormat;
use crate::session::AuthSession;
use crate::store::{PortfolioState, PortfolioStore};

pub async fn handle(session: &AuthSession, output_format: OutputFormat) -> anyhow::Result<()> {
    let store = PortfolioStore::new(session.client().clone());
    let state = store.load_all().await;

    match output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "profile": state.profile,
                    "skills": state.skills,
                    "projects": state.projects,
                    "loading": state.loading(),
                    "error": state.error,
                }))?
            );
        }
        OutputFormat::Text => print!("{}", render(&state)),
    }
    Ok(())
}

/// Text rendering of whatever has loaded so far
pub fn render(state: &PortfolioState) -> String {
    let mut out = String::new();

    if let Some(profile) = &state.profile {
        out.push_str(&format!("{}\n{}\n\n{}\n", profile.name, profile.title, profile.bio));
    }

    out.push_str("\nSkills\n");
    if state.skills.is_empty() {
        out.push_str("  (none)\n");
    }
    for skill in &state.skills {
        out.push_str(&format!(
            "  {:<20} {:<16} {}\n",
            skill.name,
            skill.category,
            "★".repeat(usize::from(skill.proficiency))
        ));
    }

    out.push_str("\nProjects\n");
    if state.projects.is_empty() {
        out.push_str("  (none)\n");
    }
    for project in &state.projects {
        out.push_str(&format!("  {}\n    {}\n", project.title, project.description));
        if !project.tech_stack.is_empty() {
            out.push_str(&format!("    [{}]\n", project.tech_stack.join(", ")));
        }
        if !project.github_url.is_empty() {
            out.push_str(&format!("    code: {}\n", project.github_url));
        }
        if let Some(live) = &project.live_url {
            out.push_str(&format!("    live: {}\n", live));
        }
    }

    if let Some(error) = &state.error {
        out.push_str(&format!("\n! {}\n", error));
    }
    out
}
