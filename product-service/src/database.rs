//! Database connection pool management and schema bootstrap

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

use crate::{
    config::DatabaseConfig,
    error::{DatabaseError, DatabaseOperation, Result},
};

/// Idempotent DDL run at startup. `gen_random_uuid()` is built in from PostgreSQL 13.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS products (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        name VARCHAR(255) NOT NULL,
        sku VARCHAR(50) NOT NULL,
        price DOUBLE PRECISION NOT NULL,
        stock BIGINT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        deleted_at TIMESTAMPTZ
    )",
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_products_sku ON products (sku)",
    "CREATE INDEX IF NOT EXISTS idx_products_deleted_at ON products (deleted_at)",
];

/// Create a PostgreSQL connection pool with retry logic
///
/// Retries transient failures up to `max_retries` times with exponential
/// backoff starting at `retry_delay_secs`.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let mut attempt = 0;
    let base_delay = Duration::from_secs(config.retry_delay_secs);

    loop {
        match try_create_pool(config).await {
            Ok(pool) => {
                if attempt > 0 {
                    tracing::info!(
                        "Database connection established after {} attempt(s)",
                        attempt + 1
                    );
                } else {
                    tracing::info!(
                        "Database connection pool created: target={}, max={}, min={}",
                        config.display_target(),
                        config.max_connections,
                        config.min_connections
                    );
                }
                return Ok(pool);
            }
            Err(e) => {
                attempt += 1;

                if !should_retry(&e, attempt, config.max_retries) {
                    tracing::error!(
                        "Failed to connect to database after {} attempt(s): {}",
                        attempt,
                        e
                    );
                    return Err(e.into());
                }

                let delay = backoff_delay(base_delay, attempt);
                tracing::warn!(
                    "Database connection attempt {} failed: {}. Retrying in {:?}...",
                    attempt,
                    e,
                    delay
                );

                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// Whether failed attempt number `attempt` (1-based) is followed by another
///
/// Only transient failures are retried. Rejected credentials or a bad
/// configuration fail on the first attempt.
fn should_retry(err: &DatabaseError, attempt: u32, max_retries: u32) -> bool {
    err.is_retriable() && attempt <= max_retries
}

/// Delay before retry number `attempt` (1-based): base, 2x base, 4x base, ...
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    let multiplier = 2_u32.saturating_pow(attempt.saturating_sub(1));
    base.saturating_mul(multiplier)
}

async fn try_create_pool(config: &DatabaseConfig) -> std::result::Result<PgPool, DatabaseError> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connection_timeout_secs))
        .connect_with(config.connect_options())
        .await
        .map_err(|e| {
            let kind = categorize_db_error(&e);
            DatabaseError::from(e)
                .during(DatabaseOperation::Connect)
                .add_context(format!("{} ({})", config.display_target(), kind))
        })
}

/// Create the products table and its indexes if they do not exist
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    for statement in SCHEMA {
        sqlx::query(*statement).execute(pool).await.map_err(|e| {
            DatabaseError::from(e)
                .during(DatabaseOperation::Schema)
                .add_context("products")
        })?;
    }

    tracing::info!("Database schema ready");
    Ok(())
}

/// Categorize database error for operator guidance
fn categorize_db_error(err: &sqlx::Error) -> &'static str {
    use sqlx::Error;
    match err {
        Error::Configuration(_) => "configuration error",
        Error::Database(_) => "rejected by server, check credentials and database name",
        Error::Io(_) => "network I/O error, check host and port",
        Error::Tls(_) => "TLS error",
        Error::PoolTimedOut => "timed out, database may be down or overloaded",
        Error::PoolClosed => "connection pool closed",
        _ => "connection error",
    }
}
