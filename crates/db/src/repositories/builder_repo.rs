//! Repository for the `builders` table.

use async_trait::async_trait;
use buildup_core::types::{new_id, DbId};
use sqlx::PgPool;

use crate::models::builder::{Builder, BuilderFilter, CreateBuilder};
use crate::StoreError;

const COLUMNS: &str = "id, user_id, coach_id, candidating_date, situation, description";

#[async_trait]
pub trait BuilderRepository: Send + Sync {
    async fn list(&self, filter: &BuilderFilter) -> Result<Vec<Builder>, StoreError>;

    /// Insert a builder; `candidating_date` is set to now.
    async fn create(&self, input: &CreateBuilder) -> Result<Builder, StoreError>;

    async fn update(&self, builder: &Builder) -> Result<bool, StoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Builder>, StoreError> {
        let filter = BuilderFilter {
            ids: Some(vec![id]),
            ..BuilderFilter::default()
        };
        Ok(self.list(&filter).await?.into_iter().next())
    }

    /// The builder profile owned by `user_id`, if any.
    async fn find_for_user(&self, user_id: DbId) -> Result<Option<Builder>, StoreError> {
        let filter = BuilderFilter {
            user_id: Some(user_id),
            ..BuilderFilter::default()
        };
        Ok(self.list(&filter).await?.into_iter().next())
    }

    /// Every builder assigned to `coach_id`.
    async fn list_for_coach(&self, coach_id: DbId) -> Result<Vec<Builder>, StoreError> {
        let filter = BuilderFilter {
            coach_id: Some(coach_id),
            ..BuilderFilter::default()
        };
        self.list(&filter).await
    }
}

/// PostgreSQL-backed [`BuilderRepository`].
pub struct PgBuilderRepo {
    pool: PgPool,
}

impl PgBuilderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BuilderRepository for PgBuilderRepo {
    async fn list(&self, filter: &BuilderFilter) -> Result<Vec<Builder>, StoreError> {
        let query = format!(
            "SELECT {COLUMNS} FROM builders
             WHERE ($1::UUID[] IS NULL OR id = ANY($1))
               AND ($2::UUID IS NULL OR user_id = $2)
               AND ($3::UUID IS NULL OR coach_id = $3)
             ORDER BY id"
        );
        let builders = sqlx::query_as::<_, Builder>(&query)
            .bind(&filter.ids)
            .bind(filter.user_id)
            .bind(filter.coach_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(builders)
    }

    async fn create(&self, input: &CreateBuilder) -> Result<Builder, StoreError> {
        let query = format!(
            "INSERT INTO builders (id, user_id, coach_id, situation, description)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let builder = sqlx::query_as::<_, Builder>(&query)
            .bind(new_id())
            .bind(input.user_id)
            .bind(input.coach_id)
            .bind(&input.situation)
            .bind(&input.description)
            .fetch_one(&self.pool)
            .await?;
        Ok(builder)
    }

    async fn update(&self, builder: &Builder) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE builders SET
                user_id = $2,
                coach_id = $3,
                candidating_date = $4,
                situation = $5,
                description = $6
             WHERE id = $1",
        )
        .bind(builder.id)
        .bind(builder.user_id)
        .bind(builder.coach_id)
        .bind(builder.candidating_date)
        .bind(&builder.situation)
        .bind(&builder.description)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
