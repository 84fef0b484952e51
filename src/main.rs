// src/main.rs
// DOCUMENTATION: Schema bootstrap entry point
// PURPOSE: Load config, connect, apply embedded migrations and report the schema

use anyhow::Context;
use community_portal_db::config::{self, Config};
use community_portal_db::db::SchemaRepository;
use community_portal_db::logging::init_logging;
use dotenv::dotenv;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize logging
    init_logging(&config);

    if let Err(e) = config.validate() {
        log::error!("Configuration error: {}", e);
        anyhow::bail!("invalid configuration: {}", e);
    }

    log::info!("Starting community-portal-db...");
    log::info!("Environment: {}", config.environment);

    // 4. Initialize database connection pool
    let pool = config::init_db_pool(&config)
        .await
        .context("failed to connect to database")?;

    // 5. Apply migrations
    if config.run_migrations {
        config::run_migrations(&pool).await?;
    } else {
        log::info!("Skipping migrations (RUN_MIGRATIONS=false)");
    }

    // 6. Report the resulting schema
    let snapshot = SchemaRepository::snapshot(&pool).await?;
    log::info!(
        "Schema has {} columns, {} indexes, {} foreign keys",
        snapshot.columns.len(),
        snapshot.indexes.len(),
        snapshot.foreign_keys.len()
    );
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    pool.close().await;
    Ok(())
}
