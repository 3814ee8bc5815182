//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the PrepBuddy application,
//! including all slash commands, autocomplete handlers, and bot context management.

/// Discord command implementations (dashboard, product, stock, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::{
    config::settings::Settings,
    core::{product::get_product_by_name, undo::UndoBuffers},
    entities::product,
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use tracing::{info, instrument};

/// Shared data available to all bot commands.
/// This structure holds the database connection, the resolved settings and
/// the per-product undo buffers.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Locale, horizon and reference day
    pub settings: Settings,
    /// Last deleted batch, keyed by product id
    pub undo: UndoBuffers,
}

impl BotData {
    /// Creates a new `BotData` instance with empty undo buffers.
    #[must_use]
    pub fn new(database: DatabaseConnection, settings: Settings) -> Self {
        Self {
            database,
            settings,
            undo: UndoBuffers::default(),
        }
    }
}

/// Replies with the error text for user-correctable errors and returns
/// `Ok(None)`; other errors are propagated to the framework's error handler.
pub async fn user_facing<T>(
    ctx: poise::Context<'_, BotData, Error>,
    result: Result<T>,
) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_user_error() => {
            ctx.say(format!("❌ {e}")).await?;
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Looks up a product by its exact name.
///
/// # Errors
/// Returns [`Error::ProductNotFound`] if no product has that name.
pub async fn find_product(db: &DatabaseConnection, name: &str) -> Result<product::Model> {
    get_product_by_name(db, name)
        .await?
        .ok_or_else(|| Error::ProductNotFound {
            id: name.to_string(),
        })
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            tracing::error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say(format!("An error occurred: {error}")).await {
                tracing::error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                tracing::error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Builds the framework, registers all commands globally and runs the client
/// until it stops.
///
/// # Errors
/// Returns an error if the client cannot be created or stops with an error.
#[instrument(skip(token, settings, database))]
pub async fn run_bot(token: String, settings: Settings, database: DatabaseConnection) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::ping(),
                commands::help(),
                commands::dashboard(),
                commands::expiring(),
                commands::product(),
                commands::stock(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(BotData::new(database, settings))
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(&token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| tracing::error!("Error creating client: {:?}", e))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| tracing::error!("Client error: {:?}", e))?;
    Ok(())
}

pub use commands::*;
pub use handlers::*;
