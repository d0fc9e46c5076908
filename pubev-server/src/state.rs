//! Application state shared across all request handlers.

use sqlx::PgPool;

/// Application state that is shared across all request handlers.
///
/// This is cloneable and cheap to pass around. The service is stateless
/// across requests; the pool is the only process-wide resource.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: PgPool,
}

impl AppState {
    /// Create a new AppState with the given database pool.
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}
