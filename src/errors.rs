//! Unified error type for `PrepBuddy`.
//!
//! Store, configuration and bot operations all return [`Result`]. The pure
//! computations in [`crate::core`] never fail; bad dates and zero targets are
//! absorbed into best-effort values there instead of surfacing here.

use poise::serenity_prelude as serenity;
use thiserror::Error;

/// Every failure the application can report.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or is inconsistent
    #[error("Configuration error: {message}")]
    Config {
        /// Human readable description
        message: String,
    },

    /// Product name was empty or whitespace only
    #[error("Product name cannot be empty")]
    EmptyName,

    /// Stock quantity was negative or not a finite number
    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity {
        /// The rejected quantity
        quantity: f64,
    },

    /// Target quantity was negative or not a finite number
    #[error("Invalid target quantity: {target}")]
    InvalidTarget {
        /// The rejected target
        target: f64,
    },

    /// A date field was present but not a valid `YYYY-MM-DD` date
    #[error("Invalid date '{value}', expected YYYY-MM-DD")]
    InvalidDate {
        /// The rejected input
        value: String,
    },

    /// Product lookup failed
    #[error("Product not found: {id}")]
    ProductNotFound {
        /// Product id or name that was looked up
        id: String,
    },

    /// Another product already uses this name
    #[error("A product named '{name}' already exists")]
    DuplicateProductName {
        /// The conflicting name
        name: String,
    },

    /// Stock entry lookup failed
    #[error("Stock entry not found: {id}")]
    StockEntryNotFound {
        /// Stock entry id
        id: i64,
    },

    /// Undo was requested but no deleted batch is remembered
    #[error("Nothing to undo")]
    NothingToUndo,

    /// Database failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Backend JSON payload could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Required environment variable missing or invalid
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Building a message string failed
    #[error("Formatting error: {0}")]
    Format(#[from] std::fmt::Error),

    /// Discord framework failure
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<serenity::Error>),
}

impl Error {
    /// True for errors caused by bad input or a missing record, which the bot
    /// reports back to the user instead of treating as a failure.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyName
                | Self::InvalidQuantity { .. }
                | Self::InvalidTarget { .. }
                | Self::InvalidDate { .. }
                | Self::ProductNotFound { .. }
                | Self::DuplicateProductName { .. }
                | Self::StockEntryNotFound { .. }
                | Self::NothingToUndo
        )
    }
}

impl From<serenity::Error> for Error {
    fn from(value: serenity::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
