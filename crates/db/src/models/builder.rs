//! Builder (founder) role-profile model and DTOs.

use buildup_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `builders` table. Owned by exactly one user.
///
/// `coach_id` is `None` while no coach is assigned. When set it may name a
/// coach that no longer exists; readers treat that as unassigned.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Builder {
    pub id: DbId,
    pub user_id: DbId,
    pub coach_id: Option<DbId>,
    pub candidating_date: Timestamp,
    pub situation: String,
    pub description: String,
}

/// DTO for inserting a builder under an existing user.
#[derive(Debug, Clone)]
pub struct CreateBuilder {
    pub user_id: DbId,
    pub coach_id: Option<DbId>,
    pub situation: String,
    pub description: String,
}

/// Sparse change-set for a builder's own text fields.
///
/// The coach reference is not part of it; it changes only through coach
/// assignment.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderChanges {
    pub situation: Option<String>,
    pub description: Option<String>,
}

impl BuilderChanges {
    pub fn apply_to(&self, builder: &mut Builder) {
        if let Some(situation) = &self.situation {
            builder.situation = situation.clone();
        }
        if let Some(description) = &self.description {
            builder.description = description.clone();
        }
    }
}

/// Predicate for [`BuilderRepository::list`](crate::repositories::BuilderRepository::list).
#[derive(Debug, Clone, Default)]
pub struct BuilderFilter {
    pub ids: Option<Vec<DbId>>,
    pub user_id: Option<DbId>,
    pub coach_id: Option<DbId>,
}

impl BuilderFilter {
    pub fn matches(&self, builder: &Builder) -> bool {
        self.ids.as_ref().map_or(true, |ids| ids.contains(&builder.id))
            && self.user_id.map_or(true, |id| id == builder.user_id)
            && self.coach_id.map_or(true, |id| builder.coach_id == Some(id))
    }
}
