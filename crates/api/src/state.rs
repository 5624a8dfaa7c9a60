use std::sync::Arc;

use filmcat_db::UnitOfWorkProvider;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool and the search handle are reference counted.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: filmcat_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Opens one transaction-scoped unit of work per request.
    pub uow: UnitOfWorkProvider,
}

impl AppState {
    pub fn new(pool: filmcat_db::DbPool, config: ServerConfig, search: filmcat_db::search::SearchHandle) -> Self {
        Self {
            uow: UnitOfWorkProvider::new(pool.clone(), search),
            pool,
            config: Arc::new(config),
        }
    }
}
