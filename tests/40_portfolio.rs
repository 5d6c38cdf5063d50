mod common;

use anyhow::Result;
use folio::store::PortfolioStore;
use folio::types::{NewProject, NewSkill};

use common::TestServer;

#[tokio::test]
async fn load_all_populates_every_slice() -> Result<()> {
    let server = TestServer::start().await?;
    let session = server.admin_session().await?;
    let client = session.client().clone();

    client
        .create_project(&NewProject {
            title: "Bare".into(),
            description: "No links".into(),
            image_url: None,
            github_url: None,
            live_url: None,
            tech_stack: Vec::new(),
        })
        .await?;
    client
        .create_skill(&NewSkill {
            name: "Rust".into(),
            category: "Languages".into(),
            proficiency: 4,
        })
        .await?;

    // The public view needs no token
    session.logout();
    let store = PortfolioStore::new(client);
    let state = store.load_all().await;

    assert!(!state.loading());
    assert_eq!(state.error, None);

    let profile = state.profile.expect("profile should load");
    assert_eq!(profile.name, "Jacob");
    assert_eq!(profile.title, "Full Stack Developer");

    assert_eq!(state.skills.len(), 1);
    assert_eq!(state.projects.len(), 1);
    let project = &state.projects[0];
    assert_eq!(project.github_url, "");
    assert_eq!(project.live_url, None);
    assert!(project.tech_stack.is_empty());
    Ok(())
}

#[tokio::test]
async fn reload_replaces_previous_lists() -> Result<()> {
    let server = TestServer::start().await?;
    let session = server.admin_session().await?;
    let store = PortfolioStore::new(session.client().clone());

    let created = session
        .client()
        .create_skill(&NewSkill {
            name: "Go".into(),
            category: "Languages".into(),
            proficiency: 2,
        })
        .await?;
    store.load_skills().await;
    assert_eq!(store.snapshot().skills.len(), 1);

    session.client().delete_skill(created.id).await?;
    store.load_skills().await;

    let state = store.snapshot();
    assert!(state.skills.is_empty());
    assert!(!state.loading());
    Ok(())
}

#[tokio::test]
async fn subscribers_observe_loading_settle() -> Result<()> {
    let server = TestServer::start().await?;
    let store = PortfolioStore::new(server.client(None)?);
    let mut rx = store.subscribe();

    store.load_all().await;

    let state = rx.borrow_and_update().clone();
    assert!(!state.loading());
    assert!(state.profile.is_some());
    Ok(())
}
