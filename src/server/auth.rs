use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::error::ApiError;
use super::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(username: &str, expiry_hours: u64) -> Self {
        let now = Utc::now();
        Self {
            sub: username.to_string(),
            exp: (now + Duration::hours(expiry_hours as i64)).timestamp(),
            iat: now.timestamp(),
        }
    }
}

pub fn hash_password(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

pub fn generate_jwt(claims: &Claims, secret: &str) -> Result<String, ApiError> {
    if secret.is_empty() {
        return Err(ApiError::internal_server_error("JWT secret not configured"));
    }

    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| {
        tracing::error!("JWT generation error: {}", e);
        ApiError::internal_server_error("An error occurred during login")
    })
}

/// Validate JWT token and extract claims
fn validate_jwt(token: &str, secret: &str) -> Result<Claims, String> {
    if secret.is_empty() {
        return Err("JWT secret not configured".to_string());
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    decode::<Claims>(token, &decoding_key, &Validation::default())
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => "Token has expired".to_string(),
            _ => "Invalid token".to_string(),
        })
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| "Missing token".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        Some(_) => Err("Missing token".to_string()),
        None => Err("Authorization header must use Bearer token format".to_string()),
    }
}

/// Authenticated caller; taking it as a handler argument makes the route protected
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub username: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = extract_jwt_from_headers(&parts.headers).map_err(ApiError::unauthorized)?;
        let claims = validate_jwt(&token, &state.settings.jwt_secret).map_err(|msg| {
            tracing::debug!("JWT verification failed: {}", msg);
            ApiError::unauthorized(msg)
        })?;

        Ok(AuthUser {
            username: claims.sub,
        })
    }
}
