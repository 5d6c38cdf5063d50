//! Form-field bookkeeping for the admin create forms.

use thiserror::Error;

use crate::types::{NewProject, NewSkill};

pub const MIN_PROFICIENCY: u8 = 1;
pub const MAX_PROFICIENCY: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        min: u8,
        max: u8,
        value: u8,
    },
}

/// Split a comma-separated tag list: trimmed, empties dropped, first occurrence wins
pub fn parse_tags(input: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !tags.iter().any(|existing| existing == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

fn required(field: &'static str, value: &str) -> Result<String, FormError> {
    let value = value.trim();
    if value.is_empty() {
        Err(FormError::Missing(field))
    } else {
        Ok(value.to_string())
    }
}

fn optional(value: &str) -> Option<String> {
    Some(value.trim().to_string()).filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectForm {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub github_url: String,
    pub live_url: String,
    /// Raw comma-separated input
    pub tech_stack: String,
}

impl ProjectForm {
    pub fn validate(&self) -> Result<NewProject, FormError> {
        Ok(NewProject {
            title: required("title", &self.title)?,
            description: required("description", &self.description)?,
            image_url: optional(&self.image_url),
            github_url: optional(&self.github_url),
            live_url: optional(&self.live_url),
            tech_stack: parse_tags(&self.tech_stack),
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillForm {
    pub name: String,
    pub category: String,
    pub proficiency: u8,
}

impl Default for SkillForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: String::new(),
            proficiency: MIN_PROFICIENCY,
        }
    }
}

impl SkillForm {
    pub fn validate(&self) -> Result<NewSkill, FormError> {
        let name = required("name", &self.name)?;
        let category = required("category", &self.category)?;
        if !(MIN_PROFICIENCY..=MAX_PROFICIENCY).contains(&self.proficiency) {
            return Err(FormError::OutOfRange {
                field: "proficiency",
                min: MIN_PROFICIENCY,
                max: MAX_PROFICIENCY,
                value: self.proficiency,
            });
        }
        Ok(NewSkill {
            name,
            category,
            proficiency: self.proficiency,
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
