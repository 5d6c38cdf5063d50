// Client-side error types
use thiserror::Error;

use crate::api::credentials::CredentialError;

/// Broad failure category, used by callers to decide how to react
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No response was received
    Transport,
    /// 401: the stored token has already been cleared
    Authorization,
    /// Any other 4xx: surfaced to the form, never retried
    Validation,
    /// 5xx
    Server,
    /// Failures that happen before or after the exchange (bad URL, bad body, storage)
    Local,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Transport => "transport",
            ErrorKind::Authorization => "unauthorized",
            ErrorKind::Validation => "validation",
            ErrorKind::Server => "server",
            ErrorKind::Local => "local",
        }
    }
}

/// Error returned by every API client call
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("request rejected ({status}): {message}")]
    Validation { status: u16, message: String },

    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("credential store: {0}")]
    Credentials(#[from] CredentialError),
}

impl ClientError {
    /// Build the error for a non-success, non-401 status
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 => ClientError::Unauthorized(message),
            500..=599 => ClientError::Server { status, message },
            _ => ClientError::Validation { status, message },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Transport(_) => ErrorKind::Transport,
            ClientError::Unauthorized(_) => ErrorKind::Authorization,
            ClientError::Validation { .. } => ErrorKind::Validation,
            ClientError::Server { .. } => ErrorKind::Server,
            ClientError::Decode(_) | ClientError::InvalidUrl(_) | ClientError::Credentials(_) => {
                ErrorKind::Local
            }
        }
    }

    /// HTTP status, when the failure came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Unauthorized(_) => Some(401),
            ClientError::Validation { status, .. } | ClientError::Server { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind() == ErrorKind::Authorization
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        assert_eq!(ClientError::from_status(401, "x").kind(), ErrorKind::Authorization);
        assert_eq!(ClientError::from_status(404, "x").kind(), ErrorKind::Validation);
        assert_eq!(ClientError::from_status(422, "x").kind(), ErrorKind::Validation);
        assert_eq!(ClientError::from_status(503, "x").kind(), ErrorKind::Server);
    }

    #[test]
    fn status_is_reported() {
        let err = ClientError::from_status(404, "Skill not found");
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "request rejected (404): Skill not found");
        assert_eq!(ClientError::Decode("eof".into()).status(), None);
    }
}
