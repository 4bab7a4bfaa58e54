use std::sync::Arc;

use buildup_db::Store;

use crate::auth::CredentialService;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the store holds `Arc`ed repositories and the rest is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Entity repositories (PostgreSQL in production, in-memory in tests).
    pub store: Store,
    pub credentials: Arc<CredentialService>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: Store, config: ServerConfig) -> Self {
        let credentials = CredentialService::new(config.jwt.clone(), config.password);
        Self {
            store,
            credentials: Arc::new(credentials),
            config: Arc::new(config),
        }
    }
}
