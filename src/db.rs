use anyhow::Context;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tracing::info;

use crate::config::Config;

// thoughts
//   id:         uuid v7, text
//   message:    5..=140 chars
//   hearts:     only ever incremented
//   created_at: unix nanos, utc
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS thoughts (
    id          TEXT    PRIMARY KEY NOT NULL,
    message     TEXT    NOT NULL CHECK (length(message) BETWEEN 5 AND 140),
    hearts      INTEGER NOT NULL DEFAULT 0 CHECK (hearts >= 0),
    created_at  INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS thoughts_created_at ON thoughts (created_at DESC);
"#;

pub async fn connect(config: &Config) -> anyhow::Result<SqlitePool> {
    info!("Opening database at {}...", config.database_url);
    let db_pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .with_context(|| format!("could not connect to {}", config.database_url))?;

    init_schema(&db_pool).await.context("could not create schema")?;
    Ok(db_pool)
}

/// Single connection that never expires: every new sqlite memory connection is a fresh database.
pub async fn memory_pool() -> Result<SqlitePool, sqlx::Error> {
    let db_pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;

    init_schema(&db_pool).await?;
    Ok(db_pool)
}

pub async fn init_schema(db_pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA).execute(db_pool).await?;
    Ok(())
}
