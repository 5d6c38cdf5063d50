use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

/// Used when `FOLIO_API_URL` is unset
pub const DEFAULT_API_URL: &str = "http://localhost:8092/api";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub server: ServerConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

/// Client-side settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Includes the route prefix; endpoint paths are appended bare
    pub base_url: String,
    pub request_timeout_secs: u64,
}

/// Development backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub admin_username: String,
    pub admin_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // API overrides
        if let Ok(v) = env::var("FOLIO_API_URL") {
            if !v.trim().is_empty() {
                self.api.base_url = v.trim().to_string();
            }
        }
        if let Ok(v) = env::var("FOLIO_REQUEST_TIMEOUT_SECS") {
            self.api.request_timeout_secs = v.parse().unwrap_or(self.api.request_timeout_secs);
        }

        // Server overrides
        if let Some(port) = env::var("FOLIO_SERVER_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.server.port = port;
        }
        if let Ok(v) = env::var("FOLIO_ADMIN_USERNAME") {
            self.server.admin_username = v;
        }
        if let Ok(v) = env::var("FOLIO_ADMIN_PASSWORD") {
            self.server.admin_password = v;
        }

        // Security overrides
        if let Ok(v) = env::var("FOLIO_JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("FOLIO_JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                base_url: DEFAULT_API_URL.to_string(),
                request_timeout_secs: 10,
            },
            server: ServerConfig {
                port: 8092,
                admin_username: "admin".to_string(),
                admin_password: "correctpass".to_string(),
            },
            security: SecurityConfig {
                jwt_secret: "folio-development-secret".to_string(),
                jwt_expiry_hours: 1,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig {
                base_url: DEFAULT_API_URL.to_string(),
                request_timeout_secs: 10,
            },
            server: ServerConfig {
                port: 8092,
                admin_username: "admin".to_string(),
                // Must come from FOLIO_ADMIN_PASSWORD outside development
                admin_password: String::new(),
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 1,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                base_url: DEFAULT_API_URL.to_string(),
                request_timeout_secs: 5,
            },
            server: ServerConfig {
                port: 8092,
                admin_username: "admin".to_string(),
                admin_password: String::new(),
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 1,
            },
        }
    }
}

// Global config for the binaries; library types take an explicit &AppConfig
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}
