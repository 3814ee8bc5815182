//! Stock entry business logic - adding, adjusting and removing batches.
//!
//! Every mutation runs in a database transaction that also recomputes the
//! owning product's `current_stock`, so the product total always equals the
//! sum of its batches. A batch whose quantity drops to zero is deleted.

use crate::{
    core::{consumption::consume_next, expiry::parse_date, product::normalize_text, stock},
    entities::{Product, StockEntry, product, stock_entry},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::{Deserialize, Serialize};

/// Fields a client supplies when adding or replacing a batch.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockEntryPayload {
    /// Amount in the product's unit
    pub quantity: f64,
    /// Optional batch label
    #[serde(default)]
    pub sub_type: Option<String>,
    /// Purchase date, `YYYY-MM-DD`
    #[serde(default)]
    pub purchased_date: Option<String>,
    /// Expiry date, `YYYY-MM-DD`
    #[serde(default)]
    pub expiry_date: Option<String>,
    /// Where the batch is stored
    #[serde(default)]
    pub location: Option<String>,
    /// Free-form notes
    #[serde(default)]
    pub notes: Option<String>,
}

impl StockEntryPayload {
    /// Checks the payload and returns a normalized copy.
    ///
    /// Blank text fields and blank dates become `None`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidQuantity`] for a negative or non-finite
    /// quantity and [`Error::InvalidDate`] for a date that is present but not
    /// `YYYY-MM-DD`.
    pub fn validate(&self) -> Result<Self> {
        validate_quantity(self.quantity)?;
        Ok(Self {
            quantity: self.quantity,
            sub_type: normalize_text(self.sub_type.as_deref()),
            purchased_date: validate_date(self.purchased_date.as_deref())?,
            expiry_date: validate_date(self.expiry_date.as_deref())?,
            location: normalize_text(self.location.as_deref()),
            notes: normalize_text(self.notes.as_deref()),
        })
    }
}

impl From<&stock_entry::Model> for StockEntryPayload {
    fn from(entry: &stock_entry::Model) -> Self {
        Self {
            quantity: entry.quantity,
            sub_type: entry.sub_type.clone(),
            purchased_date: entry.purchased_date.clone(),
            expiry_date: entry.expiry_date.clone(),
            location: entry.location.clone(),
            notes: entry.notes.clone(),
        }
    }
}

fn validate_quantity(quantity: f64) -> Result<()> {
    if !quantity.is_finite() || quantity < 0.0 {
        return Err(Error::InvalidQuantity { quantity });
    }
    Ok(())
}

fn validate_date(value: Option<&str>) -> Result<Option<String>> {
    match normalize_text(value) {
        None => Ok(None),
        Some(text) => {
            if parse_date(&text).is_some() {
                Ok(Some(text))
            } else {
                Err(Error::InvalidDate { value: text })
            }
        }
    }
}

/// Which batch "use one" touched and what is left of it.
#[derive(Clone, Debug, PartialEq)]
pub struct UsedBatch {
    /// The batch as it was before the change
    pub entry: stock_entry::Model,
    /// Quantity left in the batch; zero means it was deleted
    pub remaining: f64,
}

/// Retrieves all batches for a product, oldest first by insertion.
pub async fn get_product_stock(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Vec<stock_entry::Model>> {
    StockEntry::find()
        .filter(stock_entry::Column::ProductId.eq(product_id))
        .order_by_asc(stock_entry::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a single batch by ID.
pub async fn get_stock_entry_by_id(
    db: &DatabaseConnection,
    entry_id: i64,
) -> Result<Option<stock_entry::Model>> {
    StockEntry::find_by_id(entry_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// All batches across every product.
pub async fn get_all_stock(db: &DatabaseConnection) -> Result<Vec<stock_entry::Model>> {
    StockEntry::find()
        .order_by_asc(stock_entry::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Batches whose expiry date is before `today`.
pub async fn get_expired_stock(
    db: &DatabaseConnection,
    today: NaiveDate,
) -> Result<Vec<stock_entry::Model>> {
    let entries = get_all_stock(db).await?;
    Ok(stock::expired_entries(&entries, today))
}

/// Batches expiring today or within `days` days, excluding expired ones.
pub async fn get_expiring_stock(
    db: &DatabaseConnection,
    today: NaiveDate,
    days: i64,
) -> Result<Vec<stock_entry::Model>> {
    let entries = get_all_stock(db).await?;
    Ok(stock::expiring_entries(&entries, today, days))
}

/// Adds a batch to a product and updates the product's stock total.
///
/// # Errors
/// Returns an error if validation fails, the product does not exist or a
/// database operation fails.
pub async fn add_stock_entry(
    db: &DatabaseConnection,
    product_id: i64,
    payload: &StockEntryPayload,
) -> Result<stock_entry::Model> {
    let payload = payload.validate()?;
    let txn = db.begin().await?;

    Product::find_by_id(product_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::ProductNotFound {
            id: product_id.to_string(),
        })?;

    let model = stock_entry::ActiveModel {
        product_id: Set(product_id),
        quantity: Set(payload.quantity),
        sub_type: Set(payload.sub_type),
        purchased_date: Set(payload.purchased_date),
        expiry_date: Set(payload.expiry_date),
        location: Set(payload.location),
        notes: Set(payload.notes),
        ..Default::default()
    };
    let created = model.insert(&txn).await?;
    recompute_current_stock(&txn, product_id).await?;

    txn.commit().await?;

    tracing::info!(
        entry_id = created.id,
        product_id,
        quantity = created.quantity,
        "Added stock entry"
    );
    Ok(created)
}

/// Sets a batch's quantity. A quantity of zero deletes the batch.
///
/// Returns the updated batch, or `None` if it was deleted.
///
/// # Errors
/// Returns an error if the quantity is invalid, the batch does not exist or a
/// database operation fails.
pub async fn patch_stock_quantity(
    db: &DatabaseConnection,
    entry_id: i64,
    quantity: f64,
) -> Result<Option<stock_entry::Model>> {
    validate_quantity(quantity)?;
    let txn = db.begin().await?;

    let entry = find_entry(&txn, entry_id).await?;
    let product_id = entry.product_id;

    let result = if quantity == 0.0 {
        StockEntry::delete_by_id(entry_id).exec(&txn).await?;
        tracing::info!(entry_id, product_id, "Stock entry used up, deleted");
        None
    } else {
        let mut active: stock_entry::ActiveModel = entry.into();
        active.quantity = Set(quantity);
        Some(active.update(&txn).await?)
    };
    recompute_current_stock(&txn, product_id).await?;

    txn.commit().await?;
    Ok(result)
}

/// Replaces every editable field of a batch. A quantity of zero deletes it.
///
/// Returns the updated batch, or `None` if it was deleted.
///
/// # Errors
/// Returns an error if validation fails, the batch does not exist or a
/// database operation fails.
pub async fn update_stock_entry(
    db: &DatabaseConnection,
    entry_id: i64,
    payload: &StockEntryPayload,
) -> Result<Option<stock_entry::Model>> {
    let payload = payload.validate()?;
    let txn = db.begin().await?;

    let entry = find_entry(&txn, entry_id).await?;
    let product_id = entry.product_id;

    let result = if payload.quantity == 0.0 {
        StockEntry::delete_by_id(entry_id).exec(&txn).await?;
        None
    } else {
        let mut active: stock_entry::ActiveModel = entry.into();
        active.quantity = Set(payload.quantity);
        active.sub_type = Set(payload.sub_type);
        active.purchased_date = Set(payload.purchased_date);
        active.expiry_date = Set(payload.expiry_date);
        active.location = Set(payload.location);
        active.notes = Set(payload.notes);
        Some(active.update(&txn).await?)
    };
    recompute_current_stock(&txn, product_id).await?;

    txn.commit().await?;
    Ok(result)
}

/// Deletes a batch and returns it as it was, so the caller can offer undo.
///
/// # Errors
/// Returns an error if the batch does not exist or a database operation fails.
pub async fn delete_stock_entry(
    db: &DatabaseConnection,
    entry_id: i64,
) -> Result<stock_entry::Model> {
    let txn = db.begin().await?;

    let entry = find_entry(&txn, entry_id).await?;
    StockEntry::delete_by_id(entry_id).exec(&txn).await?;
    recompute_current_stock(&txn, entry.product_id).await?;

    txn.commit().await?;

    tracing::info!(entry_id, product_id = entry.product_id, "Deleted stock entry");
    Ok(entry)
}

/// Takes one unit step from the product's consume-next batch.
///
/// Only batches with a positive quantity are considered. The batch is deleted
/// when the step empties it. Returns `None` if the product has no stock.
/// Picking the batch and writing its new quantity happen in one transaction.
///
/// # Errors
/// Returns an error if the product does not exist or a database operation fails.
pub async fn use_one(db: &DatabaseConnection, product_id: i64) -> Result<Option<UsedBatch>> {
    let txn = db.begin().await?;

    let product = Product::find_by_id(product_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::ProductNotFound {
            id: product_id.to_string(),
        })?;

    let in_stock = StockEntry::find()
        .filter(stock_entry::Column::ProductId.eq(product_id))
        .filter(stock_entry::Column::Quantity.gt(0.0))
        .order_by_asc(stock_entry::Column::Id)
        .all(&txn)
        .await?;

    let Some(next) = consume_next(&in_stock).cloned() else {
        txn.rollback().await?;
        return Ok(None);
    };

    let remaining = (next.quantity - product.unit.step()).max(0.0);
    if remaining == 0.0 {
        StockEntry::delete_by_id(next.id).exec(&txn).await?;
    } else {
        let mut active: stock_entry::ActiveModel = next.clone().into();
        active.quantity = Set(remaining);
        active.update(&txn).await?;
    }
    recompute_current_stock(&txn, product_id).await?;

    txn.commit().await?;

    tracing::info!(entry_id = next.id, product_id, remaining, "Used one unit");
    Ok(Some(UsedBatch {
        entry: next,
        remaining,
    }))
}

async fn find_entry<C>(db: &C, entry_id: i64) -> Result<stock_entry::Model>
where
    C: ConnectionTrait,
{
    StockEntry::find_by_id(entry_id)
        .one(db)
        .await?
        .ok_or(Error::StockEntryNotFound { id: entry_id })
}

/// Sets a product's `current_stock` to the sum of its batch quantities.
async fn recompute_current_stock<C>(db: &C, product_id: i64) -> Result<product::Model>
where
    C: ConnectionTrait,
{
    let entries = StockEntry::find()
        .filter(stock_entry::Column::ProductId.eq(product_id))
        .all(db)
        .await?;
    let total: f64 = entries.iter().map(|e| e.quantity).sum();

    let mut product: product::ActiveModel = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::ProductNotFound {
            id: product_id.to_string(),
        })?
        .into();
    product.current_stock = Set(total);
    product.update(db).await.map_err(Into::into)
}
