#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use folio::api::{ApiClient, ClientConfig, MemoryCredentialStore};
use folio::config::AppConfig;
use folio::server::{self, ServerState};
use folio::session::AuthSession;
use reqwest::StatusCode;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "correctpass";

/// A development backend running inside the test's own runtime, with fresh state
pub struct TestServer {
    pub port: u16,
    /// Server root, e.g. http://127.0.0.1:PORT
    pub base_url: String,
    /// Root of the REST contract, e.g. http://127.0.0.1:PORT/api
    pub api_url: String,
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);
        let api_url = format!("{}{}", base_url, server::API_PREFIX);

        let mut config = AppConfig::development();
        config.server.admin_username = ADMIN_USERNAME.to_string();
        config.server.admin_password = ADMIN_PASSWORD.to_string();

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test port")?;
        let state = Arc::new(ServerState::from_config(&config));
        tokio::spawn(server::serve(listener, state));

        let server = Self { port, base_url, api_url };
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }

    /// Client with an in-memory token store, optionally pre-seeded
    pub fn client(&self, token: Option<&str>) -> Result<Arc<ApiClient>> {
        let credentials = match token {
            Some(token) => MemoryCredentialStore::with_token(token),
            None => MemoryCredentialStore::new(),
        };
        let client = ApiClient::new(ClientConfig::new(self.api_url.clone()), Arc::new(credentials))?;
        Ok(Arc::new(client))
    }

    pub fn session(&self, token: Option<&str>) -> Result<AuthSession> {
        Ok(AuthSession::new(self.client(token)?))
    }

    /// Session that has already logged in as the seeded admin
    pub async fn admin_session(&self) -> Result<AuthSession> {
        let session = self.session(None)?;
        session.login(ADMIN_USERNAME, ADMIN_PASSWORD).await?;
        Ok(session)
    }
}

/// Serve a hand-written router in place of the development backend; returns its `/api` URL
pub async fn stub_backend(router: axum::Router) -> Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("failed to bind stub port")?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move { axum::serve(listener, router).await });
    Ok(format!("http://{}{}", addr, server::API_PREFIX))
}

/// Session against `api_url` with an in-memory token store
pub fn session_at(api_url: &str, token: Option<&str>) -> Result<(AuthSession, Arc<MemoryCredentialStore>)> {
    let store = Arc::new(match token {
        Some(token) => MemoryCredentialStore::with_token(token),
        None => MemoryCredentialStore::new(),
    });
    let client = ApiClient::new(ClientConfig::new(api_url), store.clone())?;
    Ok((AuthSession::new(Arc::new(client)), store))
}
