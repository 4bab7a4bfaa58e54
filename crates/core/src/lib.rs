//! Domain vocabulary shared by the store and API crates.
//!
//! Nothing in here performs I/O.

pub mod error;
pub mod roles;
pub mod types;
