//! Persistence layer for the role graph (users, builders, coachs, projects).
//!
//! Repositories are trait objects so the same orchestration code runs against
//! PostgreSQL in production and against [`memory::MemoryStore`] in tests.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;

pub mod memory;
pub mod models;
pub mod repositories;

use repositories::{
    BuilderRepository, CoachRepository, PgBuilderRepo, PgCoachRepo, PgProjectRepo, PgUserRepo,
    ProjectRepository, UserRepository,
};

pub type DbPool = sqlx::PgPool;

/// PostgreSQL SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// Error surfaced by every repository operation.
///
/// Unique constraint violations are split out because callers translate them
/// into domain conflicts; everything else passes through untouched.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Duplicate value violates unique constraint: {constraint}")]
    UniqueViolation { constraint: String },

    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                return Self::UniqueViolation {
                    constraint: db_err.constraint().unwrap_or("unknown").to_string(),
                };
            }
        }
        Self::Database(err)
    }
}

impl StoreError {
    /// Whether this error is a violation of the named unique constraint.
    pub fn violates(&self, name: &str) -> bool {
        matches!(self, Self::UniqueViolation { constraint } if constraint == name)
    }
}

/// Unique constraint names, shared by the migrations and [`memory::MemoryStore`].
pub mod constraints {
    pub const UQ_USERS_EMAIL: &str = "uq_users_email";
    pub const UQ_BUILDERS_USER_ID: &str = "uq_builders_user_id";
    pub const UQ_COACHS_USER_ID: &str = "uq_coachs_user_id";
}

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Run a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// The four entity repositories, bundled for sharing across requests.
///
/// Cheap to clone; every field is behind an `Arc`.
#[derive(Clone)]
pub struct Store {
    pub users: Arc<dyn UserRepository>,
    pub builders: Arc<dyn BuilderRepository>,
    pub coachs: Arc<dyn CoachRepository>,
    pub projects: Arc<dyn ProjectRepository>,
    pool: Option<DbPool>,
}

impl Store {
    /// Repositories backed by PostgreSQL.
    pub fn postgres(pool: DbPool) -> Self {
        Self {
            users: Arc::new(PgUserRepo::new(pool.clone())),
            builders: Arc::new(PgBuilderRepo::new(pool.clone())),
            coachs: Arc::new(PgCoachRepo::new(pool.clone())),
            projects: Arc::new(PgProjectRepo::new(pool.clone())),
            pool: Some(pool),
        }
    }

    /// Repositories backed by a shared in-memory store.
    pub fn in_memory(memory: Arc<memory::MemoryStore>) -> Self {
        Self {
            users: memory.clone(),
            builders: memory.clone(),
            coachs: memory.clone(),
            projects: memory,
            pool: None,
        }
    }

    /// Whether the backing store is reachable. Always true in memory.
    pub async fn health_check(&self) -> Result<(), StoreError> {
        match &self.pool {
            Some(pool) => Ok(health_check(pool).await?),
            None => Ok(()),
        }
    }
}
