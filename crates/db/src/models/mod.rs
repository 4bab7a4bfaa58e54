//! Entity models, create DTOs, change-sets and filters.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the table row
//! - A create DTO carrying the owner reference supplied by the caller
//! - A change-set (all `Option` fields) applied in place before a full replace
//! - A filter used by the repository `list` query

pub mod builder;
pub mod coach;
pub mod project;
pub mod user;
