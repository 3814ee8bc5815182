//! Shared test utilities for `PrepBuddy`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        product::{self, ProductPayload},
        stock_entry::{self, StockEntryPayload},
    },
    entities::{self, Category, Unit},
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Builds a product payload.
///
/// # Defaults
/// * `unit`: liters for water, cans for everything else
/// * `notes`: None
pub fn payload(name: &str, category: Category, target_quantity: f64) -> ProductPayload {
    let unit = if category == Category::Water {
        Unit::Liters
    } else {
        Unit::Cans
    };
    ProductPayload {
        name: name.to_string(),
        category,
        unit,
        target_quantity,
        notes: None,
    }
}

/// Creates a test product with sensible defaults.
///
/// # Arguments
/// * `db` - Database connection
/// * `name` - Product name
/// * `category` - Supply category
///
/// # Defaults
/// * target: 10.0
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
    category: Category,
) -> Result<entities::product::Model> {
    product::create_product(db, &payload(name, category, 10.0)).await
}

/// Creates a test product with a custom target.
pub async fn create_custom_product(
    db: &DatabaseConnection,
    name: &str,
    category: Category,
    target_quantity: f64,
) -> Result<entities::product::Model> {
    product::create_product(db, &payload(name, category, target_quantity)).await
}

/// Adds a batch with only a quantity and an optional expiry date.
pub async fn add_test_stock(
    db: &DatabaseConnection,
    product_id: i64,
    quantity: f64,
    expiry_date: Option<&str>,
) -> Result<entities::stock_entry::Model> {
    let payload = StockEntryPayload {
        quantity,
        expiry_date: expiry_date.map(ToString::to_string),
        ..Default::default()
    };
    stock_entry::add_stock_entry(db, product_id, &payload).await
}

/// Sets up a complete test environment with one food product.
/// Returns (db, product) for stock-related tests.
pub async fn setup_with_product() -> Result<(DatabaseConnection, entities::product::Model)> {
    let db = setup_test_db().await?;
    let product = create_test_product(&db, "Canned beans", Category::PreservedFood).await?;
    Ok((db, product))
}

/// An unsaved product model for pure-function tests.
pub fn sample_product(
    id: i64,
    category: Category,
    target_quantity: f64,
    current_stock: f64,
) -> entities::product::Model {
    let payload = payload(&format!("Product {id}"), category, target_quantity);
    entities::product::Model {
        id,
        name: payload.name,
        category,
        unit: payload.unit,
        target_quantity,
        current_stock,
        notes: None,
    }
}

/// An unsaved stock entry model for pure-function tests.
pub fn sample_entry(
    id: i64,
    product_id: i64,
    quantity: f64,
    expiry_date: Option<&str>,
) -> entities::stock_entry::Model {
    entities::stock_entry::Model {
        id,
        product_id,
        quantity,
        sub_type: None,
        purchased_date: None,
        expiry_date: expiry_date.map(ToString::to_string),
        location: None,
        notes: None,
    }
}
