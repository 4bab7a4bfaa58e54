//! Repository for the `coachs` table.

use async_trait::async_trait;
use buildup_core::types::{new_id, DbId};
use sqlx::PgPool;

use crate::models::coach::{Coach, CoachFilter, CreateCoach};
use crate::StoreError;

const COLUMNS: &str = "id, user_id, candidating_date, situation, description";

#[async_trait]
pub trait CoachRepository: Send + Sync {
    async fn list(&self, filter: &CoachFilter) -> Result<Vec<Coach>, StoreError>;

    /// Insert a coach; `candidating_date` is set to now.
    async fn create(&self, input: &CreateCoach) -> Result<Coach, StoreError>;

    async fn update(&self, coach: &Coach) -> Result<bool, StoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Coach>, StoreError> {
        let filter = CoachFilter {
            ids: Some(vec![id]),
            ..CoachFilter::default()
        };
        Ok(self.list(&filter).await?.into_iter().next())
    }

    /// The coach profile owned by `user_id`, if any.
    async fn find_for_user(&self, user_id: DbId) -> Result<Option<Coach>, StoreError> {
        let filter = CoachFilter {
            user_id: Some(user_id),
            ..CoachFilter::default()
        };
        Ok(self.list(&filter).await?.into_iter().next())
    }
}

/// PostgreSQL-backed [`CoachRepository`].
pub struct PgCoachRepo {
    pool: PgPool,
}

impl PgCoachRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CoachRepository for PgCoachRepo {
    async fn list(&self, filter: &CoachFilter) -> Result<Vec<Coach>, StoreError> {
        let query = format!(
            "SELECT {COLUMNS} FROM coachs
             WHERE ($1::UUID[] IS NULL OR id = ANY($1))
               AND ($2::UUID IS NULL OR user_id = $2)
             ORDER BY id"
        );
        let coachs = sqlx::query_as::<_, Coach>(&query)
            .bind(&filter.ids)
            .bind(filter.user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(coachs)
    }

    async fn create(&self, input: &CreateCoach) -> Result<Coach, StoreError> {
        let query = format!(
            "INSERT INTO coachs (id, user_id, situation, description)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let coach = sqlx::query_as::<_, Coach>(&query)
            .bind(new_id())
            .bind(input.user_id)
            .bind(&input.situation)
            .bind(&input.description)
            .fetch_one(&self.pool)
            .await?;
        Ok(coach)
    }

    async fn update(&self, coach: &Coach) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE coachs SET
                user_id = $2,
                candidating_date = $3,
                situation = $4,
                description = $5
             WHERE id = $1",
        )
        .bind(coach.id)
        .bind(coach.user_id)
        .bind(coach.candidating_date)
        .bind(&coach.situation)
        .bind(&coach.description)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
