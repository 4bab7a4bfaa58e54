//! HTTP service for the BuildUp role graph: accounts, builders, coaches and
//! their projects.

pub mod accounts;
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod role_graph;
pub mod router;
pub mod routes;
pub mod state;
