use sqlx::PgPool;

/// Executes entity messages against the connection pool.
///
/// Every operation in this service is a single auto-committed statement,
/// so there is no transactional variant.
pub struct DatabaseProcessor {
    pub pool: PgPool,
}
