use dotenvy::dotenv;
use prep_buddy::{
    bot,
    config::{database, products, settings::Settings},
    core::product,
    errors::{Error, Result},
};
use std::env;
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

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load config.toml and resolve settings (env overrides win)
    let config = products::load_default_config()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;
    let settings = Settings::resolve(&config.settings)
        .inspect_err(|e| error!("Invalid settings: {}", e))?;
    info!(
        locale = ?settings.locale,
        horizon_days = settings.horizon_days,
        today = %settings.today(),
        "Settings resolved"
    );

    // 4. Connect to the database and make sure the tables exist
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    // 5. Seed configured products on first run
    product::seed_products(&db, &config.products)
        .await
        .inspect_err(|e| error!("Failed to seed products: {}", e))?;

    // 6. Run the bot
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {}", e))
        .map_err(Error::EnvVar)?;

    bot::run_bot(token, settings, db).await
}
