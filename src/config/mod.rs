/// Database configuration and connection management
pub mod database;

/// Seed products and settings loading from config.toml
pub mod products;

/// Locale, expiry horizon and reference day
pub mod settings;
