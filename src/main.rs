use std::sync::Arc;

use folio::server::{self, ServerState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up FOLIO_* settings
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = folio::config::config();
    tracing::info!("Starting folio development backend in {:?} mode", config.environment);

    if config.server.admin_password.is_empty() {
        tracing::warn!("FOLIO_ADMIN_PASSWORD is not set; no admin account will be able to log in");
    }

    let state = Arc::new(ServerState::from_config(config));

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("listening on http://{}{}", bind_addr, server::API_PREFIX);

    server::serve(listener, state).await?;
    Ok(())
}
