#![cfg(test)]
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use common::locale::Locale;
use crate::context::StaticContext;

pub const TEST_TENANT: i64 = 100;
pub const TEST_USER: i64 = 1001;

/// Fresh in-memory SQLite database with the full schema applied.
/// The pool is pinned to a single connection; with sqlx, every connection to
/// `sqlite::memory:` would otherwise see its own empty database.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub fn zh_context() -> StaticContext {
    StaticContext {
        user_id: TEST_USER,
        tenant_id: TEST_TENANT,
        language: Locale::ZhCn,
    }
}

pub fn en_context() -> StaticContext {
    StaticContext {
        user_id: TEST_USER,
        tenant_id: TEST_TENANT,
        language: Locale::En,
    }
}
