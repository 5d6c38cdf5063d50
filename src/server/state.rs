use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use super::auth::hash_password;
use crate::config::AppConfig;
use crate::types::{NewProject, NewSkill, Profile, ProjectRecord, Skill};

pub type AppState = Arc<ServerState>;

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
}

/// In-memory backing store for the development backend
pub struct ServerState {
    pub settings: ServerSettings,
    /// username -> SHA-256 hex digest of the password
    users: HashMap<String, String>,
    projects: RwLock<BTreeMap<i64, ProjectRecord>>,
    skills: RwLock<BTreeMap<i64, Skill>>,
    next_id: AtomicI64,
}

impl ServerState {
    pub fn new(settings: ServerSettings) -> Self {
        Self {
            settings,
            users: HashMap::new(),
            projects: RwLock::new(BTreeMap::new()),
            skills: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let settings = ServerSettings {
            jwt_secret: config.security.jwt_secret.clone(),
            jwt_expiry_hours: config.security.jwt_expiry_hours,
        };
        let mut state = Self::new(settings);
        if !config.server.admin_password.is_empty() {
            state.add_user(&config.server.admin_username, &config.server.admin_password);
        }
        state
    }

    pub fn add_user(&mut self, username: &str, password: &str) {
        self.users
            .insert(username.to_string(), hash_password(password));
    }

    pub fn user_exists(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    pub fn verify_password(&self, username: &str, password: &str) -> bool {
        self.users
            .get(username)
            .map(|digest| *digest == hash_password(password))
            .unwrap_or(false)
    }

    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    pub async fn profile(&self) -> Profile {
        Profile {
            id: None,
            name: "Jacob".to_string(),
            title: "Full Stack Developer".to_string(),
            bio: "Passionate about building beautiful and functional web applications"
                .to_string(),
            skills: self.list_skills().await,
        }
    }

    pub async fn list_projects(&self) -> Vec<ProjectRecord> {
        self.projects.read().await.values().cloned().collect()
    }

    pub async fn insert_project(&self, project: NewProject) -> ProjectRecord {
        let record = ProjectRecord {
            id: self.next_id(),
            title: project.title,
            description: Some(project.description),
            image_url: Some(project.image_url.unwrap_or_default()),
            github_url: Some(project.github_url.unwrap_or_default()),
            live_url: Some(project.live_url.unwrap_or_default()),
            tech_stack: Some(project.tech_stack),
            created_at: Some(Utc::now().to_rfc3339()),
        };
        self.projects
            .write()
            .await
            .insert(record.id, record.clone());
        record
    }

    pub async fn remove_project(&self, id: i64) -> bool {
        self.projects.write().await.remove(&id).is_some()
    }

    pub async fn list_skills(&self) -> Vec<Skill> {
        self.skills.read().await.values().cloned().collect()
    }

    pub async fn insert_skill(&self, skill: NewSkill) -> Skill {
        let record = Skill {
            id: self.next_id(),
            name: skill.name,
            category: skill.category,
            proficiency: skill.proficiency,
            created_at: Some(Utc::now().to_rfc3339()),
        };
        self.skills.write().await.insert(record.id, record.clone());
        record
    }

    pub async fn remove_skill(&self, id: i64) -> bool {
        self.skills.write().await.remove(&id).is_some()
    }
}
