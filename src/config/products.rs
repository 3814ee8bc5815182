//! Application configuration loading from config.toml
//!
//! config.toml holds the `[settings]` table and an optional list of
//! `[[products]]` used to seed an empty database on first run, e.g. a default
//! water product with a household target.

use crate::{
    config::settings::RawSettings,
    entities::{Category, Unit},
    errors::{Error, Result},
};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Locale, horizon and today override
    #[serde(default)]
    pub settings: RawSettings,
    /// Products to seed when the product table is empty
    #[serde(default)]
    pub products: Vec<ProductConfig>,
}

/// Configuration for a single seeded product
#[derive(Debug, Deserialize, Clone)]
pub struct ProductConfig {
    /// Name of the product
    pub name: String,
    /// Supply category, e.g. `WATER`
    pub category: Category,
    /// Unit of measure, e.g. `LITERS`
    pub unit: Unit,
    /// Desired on-hand amount
    pub target_quantity: f64,
    /// Optional notes
    #[serde(default)]
    pub notes: Option<String>,
}

/// Loads configuration from a TOML file
///
/// # Arguments
/// * `path` - Path to the config.toml file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A product has an unknown category or unit
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })
}

/// Loads configuration from the default location (./config.toml)
///
/// A missing file is not an error: defaults are used and nothing is seeded.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_default_config() -> Result<Config> {
    let path = Path::new("config.toml");
    if !path.exists() {
        tracing::info!("No config.toml found, using defaults");
        return Ok(Config::default());
    }
    load_config(path)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_parse_product_config() {
        let toml_str = r#"
            [settings]
            locale = "en"
            horizon_days = 14

            [[products]]
            name = "Water"
            category = "WATER"
            unit = "LITERS"
            target_quantity = 100.0

            [[products]]
            name = "Canned beans"
            category = "PRESERVED_FOOD"
            unit = "CANS"
            target_quantity = 24.0
            notes = "Basement shelf"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.settings.locale.as_deref(), Some("en"));
        assert_eq!(config.settings.horizon_days, Some(14));
        assert_eq!(config.products.len(), 2);
        assert_eq!(config.products[0].category, Category::Water);
        assert_eq!(config.products[0].unit, Unit::Liters);
        assert_eq!(config.products[0].target_quantity, 100.0);
        assert_eq!(config.products[1].notes.as_deref(), Some("Basement shelf"));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.products.is_empty());
        assert!(config.settings.locale.is_none());
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let toml_str = r#"
            [[products]]
            name = "Snacks"
            category = "SNACKS"
            unit = "PIECES"
            target_quantity = 1.0
        "#;
        assert!(toml::from_str::<Config>(toml_str).is_err());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("definitely/not/here.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
