// Route handlers for the development backend.
// Error bodies are always {"message": ...}; successful bodies are the bare records.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use super::auth::{generate_jwt, AuthUser, Claims};
use super::error::{ApiError, ApiResult};
use super::state::AppState;
use crate::admin::form::{MAX_PROFICIENCY, MIN_PROFICIENCY};
use crate::types::{
    AuthCheck, LoginResponse, MessageBody, NewProject, NewSkill, Profile, ProjectRecord, Skill,
    User,
};

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> ApiResult<Json<LoginResponse>> {
    let (Some(username), Some(password)) = (body.username, body.password) else {
        return Err(ApiError::bad_request("Missing username or password"));
    };

    if !state.verify_password(&username, &password) {
        warn!("Failed login attempt for user: {}", username);
        return Err(ApiError::unauthorized("Invalid username or password"));
    }

    let claims = Claims::new(&username, state.settings.jwt_expiry_hours);
    let token = generate_jwt(&claims, &state.settings.jwt_secret)?;
    info!("Successful login for user: {}", username);

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
        user: User { username },
    }))
}

/// GET /check-auth
pub async fn check_auth(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<AuthCheck>, (StatusCode, Json<Value>)> {
    if !state.user_exists(&user.username) {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "authenticated": false, "message": "User not found" })),
        ));
    }

    Ok(Json(AuthCheck {
        authenticated: true,
        user: Some(User {
            username: user.username,
        }),
        message: None,
    }))
}

/// GET /profile
pub async fn profile(State(state): State<AppState>) -> Json<Profile> {
    Json(state.profile().await)
}

/// GET /projects
pub async fn list_projects(State(state): State<AppState>) -> Json<Vec<ProjectRecord>> {
    Json(state.list_projects().await)
}

/// POST /projects
pub async fn create_project(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(project): Json<NewProject>,
) -> ApiResult<(StatusCode, Json<ProjectRecord>)> {
    if project.title.trim().is_empty() {
        return Err(ApiError::bad_request("Missing required fields"));
    }

    let record = state.insert_project(project).await;
    Ok((StatusCode::CREATED, Json(record)))
}

/// DELETE /projects/:id
pub async fn delete_project(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<MessageBody>> {
    if !state.remove_project(id).await {
        return Err(ApiError::not_found("Project not found"));
    }

    Ok(Json(MessageBody {
        message: "Project deleted successfully".to_string(),
    }))
}

/// GET /skills
pub async fn list_skills(State(state): State<AppState>) -> Json<Vec<Skill>> {
    Json(state.list_skills().await)
}

/// POST /skills
pub async fn create_skill(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(skill): Json<NewSkill>,
) -> ApiResult<(StatusCode, Json<Skill>)> {
    if skill.name.trim().is_empty() || skill.category.trim().is_empty() {
        return Err(ApiError::bad_request("Missing required fields"));
    }
    if !(MIN_PROFICIENCY..=MAX_PROFICIENCY).contains(&skill.proficiency) {
        return Err(ApiError::bad_request(format!(
            "Proficiency must be between {} and {}",
            MIN_PROFICIENCY, MAX_PROFICIENCY
        )));
    }

    let record = state.insert_skill(skill).await;
    Ok((StatusCode::CREATED, Json(record)))
}

/// DELETE /skills/:id
pub async fn delete_skill(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<MessageBody>> {
    if !state.remove_skill(id).await {
        return Err(ApiError::not_found("Skill not found"));
    }

    Ok(Json(MessageBody {
        message: "Skill deleted successfully".to_string(),
    }))
}
