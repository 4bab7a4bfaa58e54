//! Repository for the `users` table.

use async_trait::async_trait;
use buildup_core::types::{new_id, DbId};
use sqlx::PgPool;

use crate::models::user::{CreateUser, User, UserFilter};
use crate::StoreError;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, created_at, email, role, status, step, first_name, last_name, \
                       situation, description, birthdate, address, discord, linkedin, \
                       password_hash";

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Users matching every present field of `filter`.
    async fn list(&self, filter: &UserFilter) -> Result<Vec<User>, StoreError>;

    /// Insert a new user, returning the created row.
    async fn create(&self, input: &CreateUser) -> Result<User, StoreError>;

    /// Replace the stored user with `user`. Returns `false` if no row has its id.
    async fn update(&self, user: &User) -> Result<bool, StoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<User>, StoreError> {
        Ok(self.list(&UserFilter::by_ids(vec![id])).await?.into_iter().next())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.list(&UserFilter::by_email(email)).await?.into_iter().next())
    }
}

/// PostgreSQL-backed [`UserRepository`].
pub struct PgUserRepo {
    pool: PgPool,
}

impl PgUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepo {
    async fn list(&self, filter: &UserFilter) -> Result<Vec<User>, StoreError> {
        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE ($1::UUID[] IS NULL OR id = ANY($1))
               AND ($2::TEXT IS NULL OR email = $2)
               AND ($3::TEXT IS NULL OR role = $3)
               AND ($4::TEXT IS NULL OR status = $4)
               AND ($5::TEXT IS NULL OR step = $5)
               AND ($6::TEXT IS NULL OR first_name = $6)
               AND ($7::TEXT IS NULL OR last_name = $7)
             ORDER BY id"
        );
        let users = sqlx::query_as::<_, User>(&query)
            .bind(&filter.ids)
            .bind(&filter.email)
            .bind(filter.role.map(|r| r.as_str()))
            .bind(filter.status.map(|s| s.as_str()))
            .bind(filter.step.map(|s| s.as_str()))
            .bind(&filter.first_name)
            .bind(&filter.last_name)
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn create(&self, input: &CreateUser) -> Result<User, StoreError> {
        let query = format!(
            "INSERT INTO users (id, email, role, status, step, first_name, last_name,
                                situation, description, birthdate, address, discord,
                                linkedin, password_hash)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING {COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(new_id())
            .bind(&input.email)
            .bind(input.role.as_str())
            .bind(buildup_core::roles::UserStatus::default().as_str())
            .bind(buildup_core::roles::UserStep::default().as_str())
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.situation)
            .bind(&input.description)
            .bind(input.birthdate)
            .bind(&input.address)
            .bind(&input.discord)
            .bind(&input.linkedin)
            .bind(&input.password_hash)
            .fetch_one(&self.pool)
            .await?;
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE users SET
                email = $2,
                role = $3,
                status = $4,
                step = $5,
                first_name = $6,
                last_name = $7,
                situation = $8,
                description = $9,
                birthdate = $10,
                address = $11,
                discord = $12,
                linkedin = $13,
                password_hash = $14
             WHERE id = $1",
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(user.role.as_str())
        .bind(user.status.as_str())
        .bind(user.step.as_str())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.situation)
        .bind(&user.description)
        .bind(user.birthdate)
        .bind(&user.address)
        .bind(&user.discord)
        .bind(&user.linkedin)
        .bind(&user.password_hash)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
