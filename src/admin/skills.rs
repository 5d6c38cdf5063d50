use std::sync::Arc;

use tracing::{error, info};

use super::{AdminError, Confirm, DeleteOutcome, SkillForm};
use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::types::Skill;

pub struct SkillsManager {
    client: Arc<ApiClient>,
    skills: Vec<Skill>,
    pub form: SkillForm,
}

impl SkillsManager {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            skills: Vec::new(),
            form: SkillForm::default(),
        }
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub async fn refresh(&mut self) -> ClientResult<&[Skill]> {
        match self.client.list_skills().await {
            Ok(skills) => {
                self.skills = skills;
                Ok(&self.skills)
            }
            Err(e) => {
                error!("Error fetching skills: {}", e);
                Err(e)
            }
        }
    }

    pub async fn submit(&mut self) -> Result<Skill, AdminError> {
        let payload = self.form.validate()?;

        let created = match self.client.create_skill(&payload).await {
            Ok(skill) => skill,
            Err(e) => {
                error!("Error creating skill: {}", e);
                return Err(e.into());
            }
        };
        info!("created skill {} ({})", created.id, created.name);

        self.form.clear();
        // The create stands even if the list cannot be refreshed; refresh logs its own failure
        self.refresh().await.ok();
        Ok(created)
    }

    pub async fn delete(
        &mut self,
        id: i64,
        confirm: &dyn Confirm,
    ) -> Result<DeleteOutcome, AdminError> {
        if !confirm.confirm("Are you sure you want to delete this skill?") {
            return Ok(DeleteOutcome::Cancelled);
        }

        if let Err(e) = self.client.delete_skill(id).await {
            error!("Error deleting skill {}: {}", id, e);
            return Err(e.into());
        }
        info!("deleted skill {}", id);

        self.refresh().await.ok();
        Ok(DeleteOutcome::Deleted)
    }
}
