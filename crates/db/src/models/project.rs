//! Project model and DTOs.

use buildup_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `projects` table. Owned by exactly one builder.
///
/// At most one project per builder is a convention kept by the single-row
/// getters and by `submitProject`; the schema does not enforce it.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: DbId,
    pub builder_id: DbId,
    pub name: String,
    pub description: String,
    pub team: String,
    pub category: String,
    pub keywords: String,
    pub launch_date: Timestamp,
    pub is_lucrative: bool,
    pub is_officially_registered: bool,
}

/// DTO for inserting a project under an existing builder.
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub builder_id: DbId,
    pub name: String,
    pub description: String,
    pub team: String,
    pub category: String,
    pub keywords: String,
    pub launch_date: Timestamp,
    pub is_lucrative: bool,
    pub is_officially_registered: bool,
}

/// Sparse change-set for a project.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub team: Option<String>,
    pub category: Option<String>,
    pub keywords: Option<String>,
    pub launch_date: Option<Timestamp>,
    pub is_lucrative: Option<bool>,
    pub is_officially_registered: Option<bool>,
}

impl ProjectChanges {
    pub fn apply_to(&self, project: &mut Project) {
        if let Some(name) = &self.name {
            project.name = name.clone();
        }
        if let Some(description) = &self.description {
            project.description = description.clone();
        }
        if let Some(team) = &self.team {
            project.team = team.clone();
        }
        if let Some(category) = &self.category {
            project.category = category.clone();
        }
        if let Some(keywords) = &self.keywords {
            project.keywords = keywords.clone();
        }
        if let Some(launch_date) = self.launch_date {
            project.launch_date = launch_date;
        }
        if let Some(is_lucrative) = self.is_lucrative {
            project.is_lucrative = is_lucrative;
        }
        if let Some(registered) = self.is_officially_registered {
            project.is_officially_registered = registered;
        }
    }
}

/// Predicate for [`ProjectRepository::list`](crate::repositories::ProjectRepository::list).
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    pub ids: Option<Vec<DbId>>,
    pub builder_id: Option<DbId>,
}

impl ProjectFilter {
    pub fn matches(&self, project: &Project) -> bool {
        self.ids.as_ref().map_or(true, |ids| ids.contains(&project.id))
            && self.builder_id.map_or(true, |id| id == project.builder_id)
    }
}
