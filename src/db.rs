use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::AppConfig;

/// Character limit of the `VARCHAR(100)` text columns.
pub const MAX_TEXT_LEN: usize = 100;

pub async fn connect(config: &AppConfig) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await
        .context("connect to database")?;
    Ok(pool)
}

pub async fn migrate(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("run migrations")?;
    Ok(())
}

/// Name of the violated constraint when `e` is a unique violation.
pub fn unique_violation(e: &sqlx::Error) -> Option<String> {
    let db_err = e.as_database_error()?;
    if !db_err.is_unique_violation() {
        return None;
    }
    Some(db_err.constraint().unwrap_or_default().to_string())
}

/// SQLSTATE 22001: a string did not fit its column.
pub fn value_too_long(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .and_then(|d| d.code())
        .is_some_and(|code| code == "22001")
}
