//! Coach (mentor) role-profile model and DTOs.

use buildup_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `coachs` table. Owned by exactly one user; the builders it
/// mentors point back at it through `builders.coach_id`.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Coach {
    pub id: DbId,
    pub user_id: DbId,
    pub candidating_date: Timestamp,
    pub situation: String,
    pub description: String,
}

/// DTO for inserting a coach under an existing user.
#[derive(Debug, Clone)]
pub struct CreateCoach {
    pub user_id: DbId,
    pub situation: String,
    pub description: String,
}

/// Predicate for [`CoachRepository::list`](crate::repositories::CoachRepository::list).
#[derive(Debug, Clone, Default)]
pub struct CoachFilter {
    pub ids: Option<Vec<DbId>>,
    pub user_id: Option<DbId>,
}

impl CoachFilter {
    pub fn matches(&self, coach: &Coach) -> bool {
        self.ids.as_ref().map_or(true, |ids| ids.contains(&coach.id))
            && self.user_id.map_or(true, |id| id == coach.user_id)
    }
}
