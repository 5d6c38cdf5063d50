use std::sync::Arc;

use tracing::{error, info};

use super::{AdminError, Confirm, DeleteOutcome, ProjectForm};
use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::types::Project;

pub struct ProjectsManager {
    client: Arc<ApiClient>,
    projects: Vec<Project>,
    pub form: ProjectForm,
}

impl ProjectsManager {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            projects: Vec::new(),
            form: ProjectForm::default(),
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Replace the local list with the server's
    pub async fn refresh(&mut self) -> ClientResult<&[Project]> {
        match self.client.list_projects().await {
            Ok(records) => {
                self.projects = records.into_iter().map(Project::from).collect();
                Ok(&self.projects)
            }
            Err(e) => {
                error!("Error fetching projects: {}", e);
                Err(e)
            }
        }
    }

    /// Validate and send the form; on success clear it and re-fetch
    pub async fn submit(&mut self) -> Result<Project, AdminError> {
        let payload = self.form.validate()?;

        let created = match self.client.create_project(&payload).await {
            Ok(record) => Project::from(record),
            Err(e) => {
                error!("Error creating project: {}", e);
                return Err(e.into());
            }
        };
        info!("created project {} ({})", created.id, created.title);

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
        if !confirm.confirm("Are you sure you want to delete this project?") {
            return Ok(DeleteOutcome::Cancelled);
        }

        if let Err(e) = self.client.delete_project(id).await {
            error!("Error deleting project {}: {}", id, e);
            return Err(e.into());
        }
        info!("deleted project {}", id);

        self.refresh().await.ok();
        Ok(DeleteOutcome::Deleted)
    }
}
