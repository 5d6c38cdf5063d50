//! Admin list/form managers for projects and skills.
//!
//! Managers never apply a mutation locally: after a successful create or
//! delete they re-fetch the whole list, and after a failure they log it and
//! keep the last list they fetched.

pub mod form;
pub mod projects;
pub mod skills;

use thiserror::Error;

use crate::error::ClientError;

pub use form::{parse_tags, FormError, ProjectForm, SkillForm};
pub use projects::ProjectsManager;
pub use skills::SkillsManager;

#[derive(Debug, Error)]
pub enum AdminError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Explicit user confirmation before destructive actions
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The user declined; nothing was sent
    Cancelled,
}
