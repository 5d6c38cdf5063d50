//! Wire types shared by the API client, the portfolio store and the development backend.

use serde::{Deserialize, Serialize};

use crate::admin::form::MIN_PROFICIENCY;

/// The account a bearer token was issued for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
}

/// Singleton profile record. The backend may omit the identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub title: String,
    pub bio: String,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

/// Project exactly as the backend returns it; every optional column may be absent or null
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub live_url: Option<String>,
    #[serde(default)]
    pub tech_stack: Option<Vec<String>>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Project after normalization: absent image/github URLs become `""` and an
/// absent tech stack becomes `[]`, so rendering never has to check for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub github_url: String,
    pub live_url: Option<String>,
    pub tech_stack: Vec<String>,
    pub created_at: Option<String>,
}

impl From<ProjectRecord> for Project {
    fn from(record: ProjectRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            description: record.description.unwrap_or_default(),
            image_url: record.image_url.unwrap_or_default(),
            github_url: record.github_url.unwrap_or_default(),
            live_url: record.live_url.filter(|url| !url.is_empty()),
            tech_stack: record.tech_stack.unwrap_or_default(),
            created_at: record.created_at,
        }
    }
}

/// Create payload for `POST /projects`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProject {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: i64,
    pub name: String,
    pub category: String,
    /// 1 (beginner) to 5 (expert); absent means the lowest level
    #[serde(default = "lowest_proficiency")]
    pub proficiency: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

fn lowest_proficiency() -> u8 {
    MIN_PROFICIENCY
}

/// Create payload for `POST /skills`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSkill {
    pub name: String,
    pub category: String,
    pub proficiency: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: String,
    pub token: String,
    pub user: User,
}

/// Body of `GET /check-auth`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthCheck {
    pub authenticated: bool,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// `{"message": "..."}` body used for errors and delete confirmations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}
