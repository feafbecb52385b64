//! Bootstrap binary for `CampusMarket`.
//!
//! Initializes logging, loads configuration, prepares the database schema,
//! and seeds the category list. The web layer runs against the same database
//! afterwards.

use campus_market::errors::Result;
use campus_market::{config, core::catalog};
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Make it non-fatal, env vars can be set externally
    info!("Attempted to load .env file.");

    // 3. Load the category seed configuration
    let seed_config = config::categories::load_default_config()
        .inspect_err(|e| error!("Failed to load config.toml: {e}"))?;
    info!(
        categories = seed_config.categories.len(),
        "Loaded category seed configuration."
    );

    // 4. Connect and create the schema
    let db = config::database::create_connection()
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    config::database::create_tables(&db)
        .await
        .inspect(|_| info!("Database schema initialized."))
        .inspect_err(|e| error!("Failed to initialize schema: {e}"))?;

    // 5. Seed categories (idempotent across restarts)
    let created = catalog::seed_categories(&db, &seed_config.categories)
        .await
        .inspect_err(|e| error!("Failed to seed categories: {e}"))?;
    info!(created, "Category seeding complete.");

    Ok(())
}
