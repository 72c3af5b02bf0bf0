use std::sync::Arc;

use crate::config::Config;
use crate::store::Store;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL in production, in-memory when no database is configured.
    pub store: Arc<dyn Store>,
    pub config: Config,
}
