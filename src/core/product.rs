//! Product business logic - Handles all product-related operations.
//!
//! This module provides functions for creating, listing, updating and deleting
//! products. `current_stock` is never written from here except on creation;
//! it is owned by [`crate::core::stock_entry`], which recomputes it whenever a
//! batch changes. Deleting a product removes its batches in the same database
//! transaction.

use crate::{
    config::products::ProductConfig,
    core::stock,
    entities::{Category, Product, StockEntry, Unit, product, stock_entry},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, TransactionTrait, prelude::*};
use serde::{Deserialize, Serialize};

/// Fields a client supplies when creating or replacing a product.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    /// Display name
    pub name: String,
    /// Supply category
    pub category: Category,
    /// Unit of measure
    pub unit: Unit,
    /// Desired on-hand amount
    pub target_quantity: f64,
    /// Free-form notes
    #[serde(default)]
    pub notes: Option<String>,
}

impl ProductPayload {
    /// Checks the payload and returns a normalized copy.
    ///
    /// The name and notes are trimmed; blank notes become `None`.
    ///
    /// # Errors
    /// Returns [`Error::EmptyName`] for a blank name and
    /// [`Error::InvalidTarget`] for a negative or non-finite target.
    pub fn validate(&self) -> Result<Self> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        if !self.target_quantity.is_finite() || self.target_quantity < 0.0 {
            return Err(Error::InvalidTarget {
                target: self.target_quantity,
            });
        }
        Ok(Self {
            name: name.to_string(),
            category: self.category,
            unit: self.unit,
            target_quantity: self.target_quantity,
            notes: normalize_text(self.notes.as_deref()),
        })
    }
}

impl From<&ProductConfig> for ProductPayload {
    fn from(config: &ProductConfig) -> Self {
        Self {
            name: config.name.clone(),
            category: config.category,
            unit: config.unit,
            target_quantity: config.target_quantity,
            notes: config.notes.clone(),
        }
    }
}

/// Trims optional free text, mapping blank input to `None`.
pub(crate) fn normalize_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// Retrieves all products, optionally restricted to one category, ordered by name.
pub async fn get_products(
    db: &DatabaseConnection,
    category: Option<Category>,
) -> Result<Vec<product::Model>> {
    let mut query = Product::find();
    if let Some(category) = category {
        query = query.filter(product::Column::Category.eq(category));
    }
    query
        .order_by_asc(product::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific product by its unique ID.
pub async fn get_product_by_id(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Option<product::Model>> {
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a product by its exact name.
pub async fn get_product_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<product::Model>> {
    Product::find()
        .filter(product::Column::Name.eq(name.trim()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Fails if a product other than `except` already uses `name`.
async fn ensure_name_available(
    db: &DatabaseConnection,
    name: &str,
    except: Option<i64>,
) -> Result<()> {
    match get_product_by_name(db, name).await? {
        Some(existing) if Some(existing.id) != except => Err(Error::DuplicateProductName {
            name: existing.name,
        }),
        _ => Ok(()),
    }
}

/// Products below their target quantity.
///
/// Uses the same rule as [`stock::low_stock`]: a zero target is never low.
pub async fn get_low_stock(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
    let products = get_products(db, None).await?;
    Ok(stock::low_stock(&products))
}

/// Creates a new product with no stock.
///
/// # Errors
/// Returns an error if:
/// - The product name is empty or whitespace-only
/// - The target is negative or not finite (NaN, infinity)
/// - Another product already has the same name
/// - The database insert operation fails
pub async fn create_product(
    db: &DatabaseConnection,
    payload: &ProductPayload,
) -> Result<product::Model> {
    let payload = payload.validate()?;
    ensure_name_available(db, &payload.name, None).await?;

    let model = product::ActiveModel {
        name: Set(payload.name),
        category: Set(payload.category),
        unit: Set(payload.unit),
        target_quantity: Set(payload.target_quantity),
        current_stock: Set(0.0),
        notes: Set(payload.notes),
        ..Default::default()
    };
    let created = model.insert(db).await?;
    tracing::info!(product_id = created.id, name = %created.name, "Created product");
    Ok(created)
}

/// Replaces a product's editable fields, leaving its stock untouched.
///
/// # Errors
/// Returns an error if validation fails, the product does not exist, the new
/// name belongs to another product or the database update fails.
pub async fn update_product(
    db: &DatabaseConnection,
    product_id: i64,
    payload: &ProductPayload,
) -> Result<product::Model> {
    let payload = payload.validate()?;

    let mut product: product::ActiveModel = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::ProductNotFound {
            id: product_id.to_string(),
        })?
        .into();
    ensure_name_available(db, &payload.name, Some(product_id)).await?;

    product.name = Set(payload.name);
    product.category = Set(payload.category);
    product.unit = Set(payload.unit);
    product.target_quantity = Set(payload.target_quantity);
    product.notes = Set(payload.notes);

    product.update(db).await.map_err(Into::into)
}

/// Deletes a product together with all of its stock entries.
///
/// # Errors
/// Returns an error if the product does not exist or a database operation fails.
pub async fn delete_product(db: &DatabaseConnection, product_id: i64) -> Result<product::Model> {
    let txn = db.begin().await?;

    let product = Product::find_by_id(product_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::ProductNotFound {
            id: product_id.to_string(),
        })?;

    let removed = StockEntry::delete_many()
        .filter(stock_entry::Column::ProductId.eq(product_id))
        .exec(&txn)
        .await?;
    Product::delete_by_id(product_id).exec(&txn).await?;

    txn.commit().await?;

    tracing::info!(
        product_id,
        batches_removed = removed.rows_affected,
        "Deleted product"
    );
    Ok(product)
}

/// Inserts the configured products if the product table is empty.
///
/// Returns the number of products created.
pub async fn seed_products(db: &DatabaseConnection, seeds: &[ProductConfig]) -> Result<usize> {
    if seeds.is_empty() || Product::find().count(db).await? > 0 {
        return Ok(0);
    }
    for seed in seeds {
        create_product(db, &ProductPayload::from(seed)).await?;
    }
    tracing::info!("Seeded {} products from config", seeds.len());
    Ok(seeds.len())
}
