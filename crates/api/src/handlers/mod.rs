pub mod auth;
pub mod builders;
pub mod coachs;
pub mod users;
