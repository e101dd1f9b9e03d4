use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::Executor;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Port used by PgBouncer-style connection poolers (e.g. Supabase's pooler).
const POOLER_PORT_MARKER: &str = ":6543/";

/// Connection pool sizing and lifetime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSettings {
    pub min_connections: u32,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub max_lifetime: Duration,
}

impl PoolSettings {
    /// Pick settings for a database URL.
    ///
    /// Pooler endpoints (port 6543) already multiplex server connections, so
    /// we keep a small pool and recycle connections quickly. Direct
    /// connections get a larger, longer-lived pool.
    pub fn for_database_url(database_url: &str) -> Self {
        if Self::is_pooler_url(database_url) {
            Self {
                min_connections: 3,
                max_connections: 8,
                acquire_timeout: Duration::from_secs(30),
                max_lifetime: Duration::from_secs(300),
            }
        } else {
            Self {
                min_connections: 5,
                max_connections: 15,
                acquire_timeout: Duration::from_secs(30),
                max_lifetime: Duration::from_secs(1800),
            }
        }
    }

    pub fn is_pooler_url(database_url: &str) -> bool {
        database_url.contains(POOLER_PORT_MARKER)
    }
}

/// Create a connection pool from a database URL.
///
/// Every new connection is switched to UTC so `TIMESTAMPTZ` values render
/// consistently regardless of server defaults.
pub async fn create_pool(
    database_url: &str,
    settings: &PoolSettings,
) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .min_connections(settings.min_connections)
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout)
        .max_lifetime(settings.max_lifetime)
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                conn.execute("SET TIME ZONE 'UTC'").await?;
                Ok(())
            })
        })
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await?;
    Ok(())
}

/// Apply all pending migrations embedded from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
