//! Repository layer.
//!
//! Each entity has an async trait describing the shared contract:
//!
//! - `list(filter)` returns matching rows in the store's natural order
//! - `find_*` getters return `Ok(None)` when nothing matches, never an error
//! - `create` inserts and returns the stored row
//! - `update` replaces the whole row keyed by id and reports whether it existed
//!
//! Store errors are returned untouched: no retry and no partial-write
//! detection happens at this level.

pub mod builder_repo;
pub mod coach_repo;
pub mod project_repo;
pub mod user_repo;

pub use builder_repo::{BuilderRepository, PgBuilderRepo};
pub use coach_repo::{CoachRepository, PgCoachRepo};
pub use project_repo::{PgProjectRepo, ProjectRepository};
pub use user_repo::{PgUserRepo, UserRepository};
