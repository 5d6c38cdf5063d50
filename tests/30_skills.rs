mod common;

use anyhow::Result;
use folio::admin::{AdminError, DeleteOutcome, SkillsManager};
use reqwest::StatusCode;
use serde_json::json;

use common::TestServer;

#[tokio::test]
async fn skill_create_validates_on_the_server() -> Result<()> {
    let server = TestServer::start().await?;
    let session = server.admin_session().await?;
    let token = session.client().credentials().get().unwrap_or_default();
    let http = reqwest::Client::new();

    let res = http
        .post(server.url("skills"))
        .bearer_auth(&token)
        .json(&json!({ "name": "Rust", "category": "", "proficiency": 3 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = http
        .post(server.url("skills"))
        .bearer_auth(&token)
        .json(&json!({ "name": "Rust", "category": "Languages", "proficiency": 9 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = http
        .post(server.url("skills"))
        .bearer_auth(&token)
        .json(&json!({ "name": "Rust", "category": "Languages", "proficiency": 4 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["proficiency"], 4);
    Ok(())
}

#[tokio::test]
async fn manager_creates_and_deletes_skill() -> Result<()> {
    let server = TestServer::start().await?;
    let session = server.admin_session().await?;
    let mut manager = SkillsManager::new(session.client().clone());

    manager.form.name = "Rust".into();
    manager.form.category = "Languages".into();
    manager.form.proficiency = 5;
    let created = manager.submit().await?;
    assert_eq!(created.proficiency, 5);
    assert_eq!(manager.form.proficiency, 1);
    assert_eq!(manager.skills().len(), 1);

    let outcome = manager.delete(created.id, &|_: &str| true).await?;
    assert_eq!(outcome, DeleteOutcome::Deleted);
    assert!(manager.skills().is_empty());
    Ok(())
}

#[tokio::test]
async fn deleting_unknown_skill_keeps_list_unchanged() -> Result<()> {
    let server = TestServer::start().await?;
    let session = server.admin_session().await?;
    let mut manager = SkillsManager::new(session.client().clone());

    manager.form.name = "Go".into();
    manager.form.category = "Languages".into();
    manager.submit().await?;
    let before = manager.skills().to_vec();

    let err = manager
        .delete(9999, &|_: &str| true)
        .await
        .expect_err("unknown id must fail");
    match err {
        AdminError::Client(e) => assert_eq!(e.status(), Some(404)),
        other => panic!("unexpected error: {other:?}"),
    }

    assert_eq!(manager.skills(), &before[..]);
    let after = session.client().list_skills().await?;
    assert_eq!(after, before);
    Ok(())
}
