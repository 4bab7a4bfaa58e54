//! Repository for the `projects` table.

use async_trait::async_trait;
use buildup_core::types::{new_id, DbId};
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project, ProjectFilter};
use crate::StoreError;

const COLUMNS: &str = "id, builder_id, name, description, team, category, keywords, \
                       launch_date, is_lucrative, is_officially_registered";

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn list(&self, filter: &ProjectFilter) -> Result<Vec<Project>, StoreError>;

    async fn create(&self, input: &CreateProject) -> Result<Project, StoreError>;

    async fn update(&self, project: &Project) -> Result<bool, StoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Project>, StoreError> {
        let filter = ProjectFilter {
            ids: Some(vec![id]),
            ..ProjectFilter::default()
        };
        Ok(self.list(&filter).await?.into_iter().next())
    }

    /// The first project owned by `builder_id`, if any.
    async fn find_for_builder(&self, builder_id: DbId) -> Result<Option<Project>, StoreError> {
        let filter = ProjectFilter {
            builder_id: Some(builder_id),
            ..ProjectFilter::default()
        };
        Ok(self.list(&filter).await?.into_iter().next())
    }
}

/// PostgreSQL-backed [`ProjectRepository`].
pub struct PgProjectRepo {
    pool: PgPool,
}

impl PgProjectRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for PgProjectRepo {
    async fn list(&self, filter: &ProjectFilter) -> Result<Vec<Project>, StoreError> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE ($1::UUID[] IS NULL OR id = ANY($1))
               AND ($2::UUID IS NULL OR builder_id = $2)
             ORDER BY id"
        );
        let projects = sqlx::query_as::<_, Project>(&query)
            .bind(&filter.ids)
            .bind(filter.builder_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(projects)
    }

    async fn create(&self, input: &CreateProject) -> Result<Project, StoreError> {
        let query = format!(
            "INSERT INTO projects (id, builder_id, name, description, team, category,
                                   keywords, launch_date, is_lucrative,
                                   is_officially_registered)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(new_id())
            .bind(input.builder_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.team)
            .bind(&input.category)
            .bind(&input.keywords)
            .bind(input.launch_date)
            .bind(input.is_lucrative)
            .bind(input.is_officially_registered)
            .fetch_one(&self.pool)
            .await?;
        Ok(project)
    }

    async fn update(&self, project: &Project) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE projects SET
                builder_id = $2,
                name = $3,
                description = $4,
                team = $5,
                category = $6,
                keywords = $7,
                launch_date = $8,
                is_lucrative = $9,
                is_officially_registered = $10
             WHERE id = $1",
        )
        .bind(project.id)
        .bind(project.builder_id)
        .bind(&project.name)
        .bind(&project.description)
        .bind(&project.team)
        .bind(&project.category)
        .bind(&project.keywords)
        .bind(project.launch_date)
        .bind(project.is_lucrative)
        .bind(project.is_officially_registered)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
