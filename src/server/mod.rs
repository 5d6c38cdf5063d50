//! In-memory development backend speaking the portfolio REST contract.
//!
//! Everything is mounted under `/api`, matching the default client base URL.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod state;

use axum::{
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use state::{AppState, ServerSettings, ServerState};

pub const API_PREFIX: &str = "/api";

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest(API_PREFIX, api_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::login))
        .route("/check-auth", get(handlers::check_auth))
        .route("/profile", get(handlers::profile))
        .route(
            "/projects",
            get(handlers::list_projects).post(handlers::create_project),
        )
        .route("/projects/:id", delete(handlers::delete_project))
        .route(
            "/skills",
            get(handlers::list_skills).post(handlers::create_skill),
        )
        .route("/skills/:id", delete(handlers::delete_skill))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "timestamp": chrono::Utc::now() }))
}

/// Serve until the listener fails
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    axum::serve(listener, app(state)).await
}
