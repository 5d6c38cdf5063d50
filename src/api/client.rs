use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use super::credentials::CredentialStore;
use crate::config::AppConfig;
use crate::error::{ClientError, ClientResult};
use crate::types::{
    AuthCheck, LoginRequest, LoginResponse, MessageBody, NewProject, NewSkill, Profile,
    ProjectRecord, Skill,
};

type UnauthorizedListener = Box<dyn Fn() + Send + Sync>;

/// Connection settings for [`ApiClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every path is appended to, including any route prefix (e.g. `/api`)
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn from_app(config: &AppConfig) -> Self {
        Self {
            base_url: config.api.base_url.clone(),
            timeout: Duration::from_secs(config.api.request_timeout_secs),
        }
    }
}

/// HTTP client for the portfolio backend.
///
/// Attaches the stored bearer token to every request and treats any 401 as a
/// forced logout: the token is cleared and the unauthorized listeners run
/// before the error reaches the caller.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Arc<dyn CredentialStore>,
    unauthorized_listeners: Mutex<Vec<UnauthorizedListener>>,
}

impl ApiClient {
    pub fn new(config: ClientConfig, credentials: Arc<dyn CredentialStore>) -> ClientResult<Self> {
        // Validate once so endpoint() can only fail on odd paths
        Url::parse(&config.base_url)?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ClientError::Transport)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials,
            unauthorized_listeners: Mutex::new(Vec::new()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    pub fn has_token(&self) -> bool {
        self.credentials.get().is_some()
    }

    /// Register a callback that runs whenever a response comes back 401
    pub fn on_unauthorized(&self, listener: impl Fn() + Send + Sync + 'static) {
        self.listeners().push(Box::new(listener));
    }

    fn listeners(&self) -> MutexGuard<'_, Vec<UnauthorizedListener>> {
        self.unauthorized_listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }

    pub fn endpoint(&self, path: &str) -> ClientResult<Url> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        Ok(Url::parse(&url)?)
    }

    /// Build a request with the bearer header attached when a token is stored
    pub fn request(&self, method: Method, path: &str) -> ClientResult<RequestBuilder> {
        let url = self.endpoint(path)?;
        let mut builder = self.http.request(method, url);
        if let Some(token) = self.credentials.get() {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    /// Drop the stored token without notifying listeners
    pub fn clear_token(&self) {
        if let Err(e) = self.credentials.clear() {
            warn!("failed to clear stored token: {}", e);
        }
    }

    async fn send(&self, builder: RequestBuilder) -> ClientResult<Response> {
        let response = builder.send().await.map_err(ClientError::Transport)?;
        let status = response.status();
        debug!("{} {}", status.as_u16(), response.url().path());

        if status.is_success() {
            return Ok(response);
        }

        let message = error_message(response).await;
        if status == StatusCode::UNAUTHORIZED {
            self.handle_unauthorized();
        }
        Err(ClientError::from_status(status.as_u16(), message))
    }

    pub(crate) fn handle_unauthorized(&self) {
        warn!("backend answered 401; clearing stored token");
        self.clear_token();
        for listener in self.listeners().iter() {
            listener();
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.send(self.request(Method::GET, path)?).await?;
        decode(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(self.request(Method::POST, path)?.json(body))
            .await?;
        decode(response).await
    }

    async fn delete(&self, path: &str) -> ClientResult<()> {
        self.send(self.request(Method::DELETE, path)?).await?;
        Ok(())
    }

    /// `POST /login`; stores the returned token on success. A response without a token is an error.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.post_json("login", &body).await?;
        if response.token.is_empty() {
            return Err(ClientError::Decode("login response carried no token".to_string()));
        }
        self.credentials.set(&response.token)?;
        Ok(response)
    }

    /// `GET /check-auth`
    pub async fn check_auth(&self) -> ClientResult<AuthCheck> {
        self.get_json("check-auth").await
    }

    /// Forget the token. The backend keeps no server-side session, so there is nothing to call.
    pub fn logout(&self) {
        self.clear_token();
    }

    pub async fn get_profile(&self) -> ClientResult<Profile> {
        self.get_json("profile").await
    }

    pub async fn list_projects(&self) -> ClientResult<Vec<ProjectRecord>> {
        self.get_json("projects").await
    }

    pub async fn create_project(&self, project: &NewProject) -> ClientResult<ProjectRecord> {
        self.post_json("projects", project).await
    }

    pub async fn delete_project(&self, id: i64) -> ClientResult<()> {
        self.delete(&format!("projects/{}", id)).await
    }

    pub async fn list_skills(&self) -> ClientResult<Vec<Skill>> {
        self.get_json("skills").await
    }

    pub async fn create_skill(&self, skill: &NewSkill) -> ClientResult<Skill> {
        self.post_json("skills", skill).await
    }

    pub async fn delete_skill(&self, id: i64) -> ClientResult<()> {
        self.delete(&format!("skills/{}", id)).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}

/// Prefer the backend's `{"message": ...}`; fall back to the status reason
async fn error_message(response: Response) -> String {
    let status = response.status();
    match response.json::<MessageBody>().await {
        Ok(body) => body.message,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    }
}
