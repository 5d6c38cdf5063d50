//! Bearer token storage.
//!
//! The client never touches storage directly; it goes through a
//! [`CredentialStore`] so the token can live in memory (tests, embedded use)
//! or in a file under the CLI config directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the single key the token is persisted under
pub const TOKEN_KEY: &str = "token";

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed credentials file: {0}")]
    Format(#[from] serde_json::Error),
}

/// Get/set/clear of one opaque token
pub trait CredentialStore: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, token: &str) -> Result<(), CredentialError>;
    fn clear(&self) -> Result<(), CredentialError>;
}

#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    token: Mutex<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self) -> Option<String> {
        self.token.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn set(&self, token: &str) -> Result<(), CredentialError> {
        *self.token.lock().unwrap_or_else(|e| e.into_inner()) = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), CredentialError> {
        *self.token.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct CredentialsFile {
    token: String,
}

/// Persists the token as `{"token": "..."}` in a JSON file
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Option<String>, CredentialError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let file: CredentialsFile = serde_json::from_str(&content)?;
        Ok(Some(file.token).filter(|t| !t.is_empty()))
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self) -> Option<String> {
        match self.read() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("ignoring unreadable credentials at {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn set(&self, token: &str) -> Result<(), CredentialError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&CredentialsFile {
            token: token.to_string(),
        })?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), CredentialError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
