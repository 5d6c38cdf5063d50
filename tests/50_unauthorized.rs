mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Result;
use folio::guard::{guard, GuardDecision};
use folio::session::AuthStatus;
use reqwest::Method;

use common::TestServer;

#[tokio::test]
async fn unauthorized_response_clears_token_for_next_request() -> Result<()> {
    let server = TestServer::start().await?;
    let client = server.client(Some("expired-or-forged"))?;

    let notified = Arc::new(AtomicUsize::new(0));
    let counter = notified.clone();
    client.on_unauthorized(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let err = client.delete_project(1).await.expect_err("forged token must be refused");
    assert!(err.is_unauthorized());
    assert_eq!(notified.load(Ordering::SeqCst), 1);
    assert!(!client.has_token());

    let request = client.request(Method::GET, "projects")?.build()?;
    assert!(request.headers().get(reqwest::header::AUTHORIZATION).is_none());
    Ok(())
}

#[tokio::test]
async fn guard_redirects_after_session_is_signed_out_by_401() -> Result<()> {
    let server = TestServer::start().await?;
    let session = server.admin_session().await?;

    let snapshot = session.settled().await;
    assert_eq!(guard(&snapshot, "/admin/projects"), GuardDecision::Allow);

    // Simulate the token being revoked server-side
    session.client().credentials().set("revoked")?;
    let listed = session.client().list_projects().await;
    assert!(listed.is_ok(), "public list ignores the bearer token");
    let err = session.client().delete_skill(1).await.expect_err("revoked token");
    assert!(err.is_unauthorized());

    let snapshot = session.settled().await;
    assert_eq!(snapshot.status, AuthStatus::Unauthenticated);
    match guard(&snapshot, "/admin/projects") {
        GuardDecision::Redirect { to, from } => {
            assert_eq!(to, "/login");
            assert_eq!(from, "/admin/projects");
        }
        other => panic!("expected redirect, got {other:?}"),
    }
    Ok(())
}
