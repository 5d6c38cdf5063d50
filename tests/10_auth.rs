mod common;

use std::sync::Arc;

use anyhow::Result;
use axum::{routing::get, Json, Router};
use folio::api::CredentialStore;
use folio::guard::{guard, GuardDecision};
use folio::session::AuthStatus;
use reqwest::StatusCode;
use serde_json::json;
use tokio::sync::Notify;

use common::{TestServer, ADMIN_PASSWORD, ADMIN_USERNAME};

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = TestServer::start().await?;

    let res = reqwest::get(format!("{}/health", server.base_url)).await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn login_returns_token_accepted_by_check_auth() -> Result<()> {
    let server = TestServer::start().await?;
    let http = reqwest::Client::new();

    let res = http
        .post(server.url("login"))
        .json(&json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    let token = body["token"].as_str().unwrap_or_default().to_string();
    assert!(!token.is_empty(), "login should return a token: {}", body);
    assert_eq!(body["user"]["username"], ADMIN_USERNAME);

    let res = http
        .get(server.url("check-auth"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["user"]["username"], ADMIN_USERNAME);
    Ok(())
}

#[tokio::test]
async fn login_rejects_wrong_password_and_missing_fields() -> Result<()> {
    let server = TestServer::start().await?;
    let http = reqwest::Client::new();

    let res = http
        .post(server.url("login"))
        .json(&json!({ "username": ADMIN_USERNAME, "password": "wrongpass" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = res.json::<serde_json::Value>().await?;
    assert!(body["message"].is_string(), "error body should carry a message: {}", body);

    let res = http.post(server.url("login")).json(&json!({})).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn check_auth_without_token_is_unauthorized() -> Result<()> {
    let server = TestServer::start().await?;

    let res = reqwest::get(server.url("check-auth")).await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn session_login_then_start_stays_authenticated() -> Result<()> {
    let server = TestServer::start().await?;
    let session = server.session(None)?;

    let user = session.login(ADMIN_USERNAME, ADMIN_PASSWORD).await?;
    assert_eq!(user.username, ADMIN_USERNAME);
    assert!(session.client().has_token());

    let snapshot = session.start().await;
    assert_eq!(snapshot.status, AuthStatus::Authenticated);
    assert!(!snapshot.loading());
    Ok(())
}

#[tokio::test]
async fn session_failed_login_leaves_unauthenticated() -> Result<()> {
    let server = TestServer::start().await?;
    let session = server.session(None)?;

    let err = session
        .login(ADMIN_USERNAME, "wrongpass")
        .await
        .expect_err("wrong password must fail");
    assert!(err.is_unauthorized());

    let snapshot = session.snapshot();
    assert_eq!(snapshot.status, AuthStatus::Unauthenticated);
    assert!(snapshot.user.is_none());
    assert!(!snapshot.loading());
    assert!(!session.client().has_token());
    Ok(())
}

#[tokio::test]
async fn session_start_with_garbage_token_clears_it() -> Result<()> {
    let server = TestServer::start().await?;
    let session = server.session(Some("not-a-real-token"))?;

    let snapshot = session.start().await;
    assert_eq!(snapshot.status, AuthStatus::Unauthenticated);
    assert!(snapshot.user.is_none());
    assert!(!snapshot.loading());
    assert_eq!(session.client().credentials().get(), None);
    Ok(())
}

#[tokio::test]
async fn logout_forgets_token_without_network() -> Result<()> {
    let server = TestServer::start().await?;
    let session = server.admin_session().await?;

    session.logout();

    let snapshot = session.snapshot();
    assert_eq!(snapshot.status, AuthStatus::Unauthenticated);
    assert!(!session.client().has_token());

    // A fresh start has nothing to check and settles immediately
    let snapshot = session.start().await;
    assert_eq!(snapshot.status, AuthStatus::Unauthenticated);
    Ok(())
}

#[tokio::test]
async fn session_is_loading_and_guard_waits_while_check_is_outstanding() -> Result<()> {
    let release = Arc::new(Notify::new());
    let held = release.clone();
    let router = Router::new().route(
        "/api/check-auth",
        get(move || {
            let held = held.clone();
            async move {
                held.notified().await;
                Json(json!({ "authenticated": true, "user": { "username": ADMIN_USERNAME } }))
            }
        }),
    );
    let api_url = common::stub_backend(router).await?;
    let (session, _store) = common::session_at(&api_url, Some("held-token"))?;
    let mut rx = session.subscribe();

    let observe = async {
        let in_flight = rx.wait_for(|s| s.loading()).await.map(|s| s.clone());
        release.notify_one();
        in_flight
    };
    let (settled, in_flight) = tokio::join!(session.start(), observe);

    let in_flight = in_flight?;
    assert!(in_flight.loading());
    assert_eq!(guard(&in_flight, "/admin/projects"), GuardDecision::Wait);

    assert!(!settled.loading());
    assert_eq!(settled.status, AuthStatus::Authenticated);
    assert_eq!(guard(&settled, "/admin/projects"), GuardDecision::Allow);
    Ok(())
}

#[tokio::test]
async fn check_answering_not_authenticated_clears_token() -> Result<()> {
    let router = Router::new().route(
        "/api/check-auth",
        get(|| async { Json(json!({ "authenticated": false })) }),
    );
    let api_url = common::stub_backend(router).await?;
    let (session, store) = common::session_at(&api_url, Some("rejected-token"))?;

    let snapshot = session.start().await;

    assert_eq!(snapshot.status, AuthStatus::Unauthenticated);
    assert!(snapshot.user.is_none());
    assert!(!snapshot.loading());
    assert_eq!(store.get(), None);
    Ok(())
}
