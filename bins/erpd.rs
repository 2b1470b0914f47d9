//! Schema bootstrapper: loads config, connects to the database and applies
//! (or reverts) migrations. Run with `up` (default), `down` or `status`.

use migration::MigratorTrait;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    common::utils::logging::init_logging_default();

    let config = configs::AppConfig::load_and_validate()?;
    let db = models::db::connect_with_config(&config.database).await?;

    let command = std::env::args().nth(1).unwrap_or_else(|| "up".to_string());
    match command.as_str() {
        "up" => {
            migration::Migrator::up(&db, None).await?;
            info!("database schema is up to date");
        }
        "down" => {
            migration::Migrator::down(&db, Some(1)).await?;
            info!("reverted last migration");
        }
        "status" => {
            let pending = migration::Migrator::get_pending_migrations(&db).await?;
            info!(pending = pending.len(), "migration status");
        }
        other => anyhow::bail!("unknown command: {other} (expected up | down | status)"),
    }
    Ok(())
}
