// src/config/db.rs
// DOCUMENTATION: Database connection pool initialization and schema migrations
// PURPOSE: Setup the PostgreSQL pool and apply the embedded migration set

use crate::config::Config;
use crate::errors::PortalError;
use sqlx::migrate::Migrator;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Executor;
use std::time::Duration;

/// Embedded migrations, ordered leaves first:
/// users, contributions, events, announcements, photos, payments
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Initialize PostgreSQL connection pool
/// DOCUMENTATION: Creates connection pool with settings from Config
/// Returns pool that is used for all database operations
pub async fn init_db_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    log::info!(
        "Initializing database pool (max {} connections)",
        config.db_max_connections
    );

    let pool = PgPoolOptions::new()
        // Maximum concurrent connections
        .max_connections(config.db_max_connections)
        // Timeout waiting for connection from pool
        .acquire_timeout(Duration::from_secs(config.db_connection_timeout))
        // Connection idle timeout (5 minutes)
        .idle_timeout(Duration::from_secs(300))
        // Connection lifetime (30 minutes before recycle)
        .max_lifetime(Duration::from_secs(1800))
        .connect(&config.database_url)
        .await?;

    // Verify connection works
    sqlx::query("SELECT 1").execute(&pool).await?;

    log::info!("Database pool initialized successfully");
    Ok(pool)
}

/// Apply pending migrations, recording them in `_sqlx_migrations`
pub async fn run_migrations(pool: &PgPool) -> Result<(), PortalError> {
    log::info!("Applying {} embedded migrations", MIGRATOR.iter().count());

    MIGRATOR.run(pool).await.map_err(|e| {
        log::error!("Migration failed: {}", e);
        PortalError::MigrationError(e.to_string())
    })?;

    log::info!("Schema is up to date");
    Ok(())
}

/// Execute every migration script again, bypassing the migration ledger.
/// Each script is guarded with IF NOT EXISTS / duplicate_object, so this
/// must leave an already-migrated schema untouched.
pub async fn reapply_migrations(pool: &PgPool) -> Result<(), PortalError> {
    for migration in MIGRATOR.iter() {
        log::debug!(
            "Re-executing migration {} ({})",
            migration.version,
            migration.description
        );

        pool.execute(&*migration.sql).await.map_err(|e| {
            log::error!(
                "Migration {} is not re-runnable: {}",
                migration.version,
                e
            );
            PortalError::MigrationError(format!("{}: {}", migration.description, e))
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_ordered_leaves_first() {
        let descriptions: Vec<String> = MIGRATOR
            .iter()
            .map(|m| m.description.to_string())
            .collect();

        assert_eq!(
            descriptions,
            vec![
                "create users",
                "create contributions",
                "create events",
                "create announcements",
                "create photos",
                "create payments",
            ]
        );
    }

    #[test]
    fn test_every_migration_is_guarded() {
        for migration in MIGRATOR.iter() {
            let sql = migration.sql.to_uppercase();

            assert!(
                !sql.contains("CREATE TABLE ") || sql.contains("CREATE TABLE IF NOT EXISTS"),
                "{} creates a table without IF NOT EXISTS",
                migration.description
            );
            assert_eq!(
                sql.matches("CREATE INDEX ").count(),
                sql.matches("CREATE INDEX IF NOT EXISTS").count(),
                "{} creates an unguarded index",
                migration.description
            );
            if sql.contains("CREATE TYPE") {
                assert!(
                    sql.contains("DUPLICATE_OBJECT"),
                    "{} creates an enum without a duplicate_object guard",
                    migration.description
                );
            }
        }
    }

    #[test]
    fn test_payment_status_default_is_verified() {
        let payments = MIGRATOR
            .iter()
            .find(|m| m.description == "create payments")
            .expect("payments migration present");

        assert!(payments
            .sql
            .contains("status payment_status NOT NULL DEFAULT 'verified',"));
    }
}
