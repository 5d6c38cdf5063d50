//! Portfolio data store.
//!
//! Holds the fetched profile, projects and skills. Each of the three loads
//! goes through pending → fulfilled | rejected, expressed as [`LoadEvent`]s
//! applied to [`PortfolioState`]. The loads share a single `loading` flag,
//! backed by a count of outstanding loads so it only drops once every load
//! dispatched so far has settled.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::types::{Profile, Project, ProjectRecord, Skill};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slice {
    Profile,
    Projects,
    Skills,
}

impl Slice {
    pub const ALL: [Slice; 3] = [Slice::Profile, Slice::Projects, Slice::Skills];

    /// Message used when the failure carries no text of its own
    pub fn failure_message(self) -> &'static str {
        match self {
            Slice::Profile => "Failed to fetch profile",
            Slice::Projects => "Failed to fetch projects",
            Slice::Skills => "Failed to fetch skills",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadEvent {
    Pending(Slice),
    ProfileLoaded(Profile),
    ProjectsLoaded(Vec<ProjectRecord>),
    SkillsLoaded(Vec<Skill>),
    Rejected(Slice, String),
}

impl LoadEvent {
    pub fn slice(&self) -> Slice {
        match self {
            LoadEvent::Pending(slice) | LoadEvent::Rejected(slice, _) => *slice,
            LoadEvent::ProfileLoaded(_) => Slice::Profile,
            LoadEvent::ProjectsLoaded(_) => Slice::Projects,
            LoadEvent::SkillsLoaded(_) => Slice::Skills,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortfolioState {
    pub profile: Option<Profile>,
    pub projects: Vec<Project>,
    pub skills: Vec<Skill>,
    pub error: Option<String>,
    outstanding: usize,
}

impl PortfolioState {
    /// True iff at least one load is outstanding
    pub fn loading(&self) -> bool {
        self.outstanding > 0
    }

    pub fn apply(&mut self, event: LoadEvent) {
        match event {
            LoadEvent::Pending(_) => {
                self.outstanding += 1;
                self.error = None;
                return;
            }
            LoadEvent::ProfileLoaded(profile) => {
                self.profile = Some(profile);
            }
            LoadEvent::ProjectsLoaded(records) => {
                self.projects = records.into_iter().map(Project::from).collect();
            }
            LoadEvent::SkillsLoaded(skills) => {
                self.skills = skills;
            }
            LoadEvent::Rejected(slice, message) => {
                self.error = Some(if message.trim().is_empty() {
                    slice.failure_message().to_string()
                } else {
                    message
                });
            }
        }
        self.outstanding = self.outstanding.saturating_sub(1);
    }
}

pub struct PortfolioStore {
    client: Arc<ApiClient>,
    state: watch::Sender<PortfolioState>,
}

impl PortfolioStore {
    pub fn new(client: Arc<ApiClient>) -> Self {
        let (state, _rx) = watch::channel(PortfolioState::default());
        Self { client, state }
    }

    pub fn snapshot(&self) -> PortfolioState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PortfolioState> {
        self.state.subscribe()
    }

    fn dispatch(&self, event: LoadEvent) {
        debug!("portfolio event for {:?}", event.slice());
        self.state.send_modify(|state| state.apply(event));
    }

    async fn run<T, F>(&self, slice: Slice, fetch: F, fulfilled: fn(T) -> LoadEvent)
    where
        F: Future<Output = ClientResult<T>>,
    {
        self.dispatch(LoadEvent::Pending(slice));
        let event = match fetch.await {
            Ok(payload) => fulfilled(payload),
            Err(e) => {
                warn!("{}: {}", slice.failure_message(), e);
                LoadEvent::Rejected(slice, e.to_string())
            }
        };
        self.dispatch(event);
    }

    pub async fn load_profile(&self) {
        self.run(Slice::Profile, self.client.get_profile(), LoadEvent::ProfileLoaded)
            .await
    }

    pub async fn load_projects(&self) {
        self.run(Slice::Projects, self.client.list_projects(), LoadEvent::ProjectsLoaded)
            .await
    }

    pub async fn load_skills(&self) {
        self.run(Slice::Skills, self.client.list_skills(), LoadEvent::SkillsLoaded)
            .await
    }

    /// Dispatch all three loads concurrently and wait for every one to settle
    pub async fn load_all(&self) -> PortfolioState {
        futures::join!(self.load_profile(), self.load_projects(), self.load_skills());
        self.snapshot()
    }
}
