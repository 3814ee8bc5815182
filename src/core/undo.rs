//! Single-step undo for deleted batches.
//!
//! Only the most recently deleted batch is remembered. Restoring re-adds it
//! with its last known fields under a new id; there is no history beyond
//! that one slot.

use crate::{
    core::stock_entry::{self, StockEntryPayload},
    entities::stock_entry as stock_entry_entity,
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// One undo slot per product id, shared between commands.
pub type UndoBuffers = Mutex<HashMap<i64, UndoBuffer>>;

/// Holds the last deleted batch, if any.
#[derive(Debug, Default)]
pub struct UndoBuffer {
    last_deleted: Option<stock_entry_entity::Model>,
}

impl UndoBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self { last_deleted: None }
    }

    /// Remembers `entry`, replacing anything remembered before.
    pub fn remember(&mut self, entry: stock_entry_entity::Model) {
        self.last_deleted = Some(entry);
    }

    /// The batch that would be restored.
    #[must_use]
    pub const fn peek(&self) -> Option<&stock_entry_entity::Model> {
        self.last_deleted.as_ref()
    }

    /// Forgets the remembered batch.
    pub fn clear(&mut self) {
        self.last_deleted = None;
    }

    /// Removes the remembered batch, returning its product id and fields.
    pub fn take(&mut self) -> Option<(i64, StockEntryPayload)> {
        self.last_deleted
            .take()
            .map(|entry| (entry.product_id, StockEntryPayload::from(&entry)))
    }
}

/// Deletes a batch and remembers it in its product's slot for [`undo_delete`].
///
/// The lock is only taken after the delete has committed.
///
/// # Errors
/// Returns an error if the batch does not exist or the delete fails; the
/// buffers are left untouched in that case.
pub async fn delete_with_undo(
    db: &DatabaseConnection,
    buffers: &UndoBuffers,
    entry_id: i64,
) -> Result<stock_entry_entity::Model> {
    let deleted = stock_entry::delete_stock_entry(db, entry_id).await?;
    buffers
        .lock()
        .await
        .entry(deleted.product_id)
        .or_default()
        .remember(deleted.clone());
    Ok(deleted)
}

/// Restores the last deleted batch.
///
/// The buffer is emptied whether or not the restore succeeds, so a failed
/// undo cannot be retried against a stale snapshot.
///
/// # Errors
/// Returns [`Error::NothingToUndo`] if nothing is remembered, otherwise any
/// error from re-adding the batch (e.g. its product was deleted meanwhile).
pub async fn undo_delete(
    db: &DatabaseConnection,
    buffer: &mut UndoBuffer,
) -> Result<stock_entry_entity::Model> {
    let (product_id, payload) = buffer.take().ok_or(Error::NothingToUndo)?;
    stock_entry::add_stock_entry(db, product_id, &payload)
        .await
        .inspect(|restored| tracing::info!(entry_id = restored.id, "Restored deleted stock entry"))
        .inspect_err(|e| tracing::warn!("Undo failed: {e}"))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::{
        core::{product, stock_entry::get_product_stock},
        test_utils::*,
    };

    #[test]
    fn test_buffer_keeps_only_last() {
        let mut buffer = UndoBuffer::new();
        assert!(buffer.peek().is_none());

        buffer.remember(sample_entry(1, 1, 1.0, None));
        buffer.remember(sample_entry(2, 1, 2.0, Some("2030-01-01")));
        assert_eq!(buffer.peek().unwrap().id, 2);

        let (product_id, payload) = buffer.take().unwrap();
        assert_eq!(product_id, 1);
        assert_eq!(payload.quantity, 2.0);
        assert_eq!(payload.expiry_date.as_deref(), Some("2030-01-01"));
        assert!(buffer.take().is_none());
    }

    #[test]
    fn test_clear() {
        let mut buffer = UndoBuffer::new();
        buffer.remember(sample_entry(1, 1, 1.0, None));
        buffer.clear();
        assert!(buffer.peek().is_none());
    }

    #[tokio::test]
    async fn test_delete_then_undo_restores_fields() -> Result<()> {
        let (db, product) = setup_with_product().await?;
        let entry = add_test_stock(&db, product.id, 3.0, Some("2030-02-02")).await?;
        let buffers = UndoBuffers::default();

        delete_with_undo(&db, &buffers, entry.id).await?;
        assert!(get_product_stock(&db, product.id).await?.is_empty());

        let mut slots = buffers.lock().await;
        let buffer = slots.get_mut(&product.id).unwrap();
        let restored = undo_delete(&db, buffer).await?;
        assert_ne!(restored.id, entry.id);
        assert_eq!(restored.quantity, 3.0);
        assert_eq!(restored.expiry_date, entry.expiry_date);
        assert_eq!(restored.product_id, product.id);
        assert!(buffer.peek().is_none());

        let current = product::get_product_by_id(&db, product.id)
            .await?
            .unwrap()
            .current_stock;
        assert_eq!(current, 3.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_delete_leaves_slots_untouched() -> Result<()> {
        let (db, product) = setup_with_product().await?;
        let entry = add_test_stock(&db, product.id, 2.0, None).await?;
        let buffers = UndoBuffers::default();

        delete_with_undo(&db, &buffers, entry.id).await?;
        let result = delete_with_undo(&db, &buffers, entry.id).await;
        assert!(matches!(result, Err(Error::StockEntryNotFound { .. })));

        let slots = buffers.lock().await;
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[&product.id].peek().unwrap().id, entry.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_undo_with_empty_buffer() -> Result<()> {
        let db = setup_test_db().await?;
        let mut buffer = UndoBuffer::new();
        let result = undo_delete(&db, &mut buffer).await;
        assert!(matches!(result, Err(Error::NothingToUndo)));
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_undo_clears_buffer() -> Result<()> {
        let (db, product) = setup_with_product().await?;
        let entry = add_test_stock(&db, product.id, 1.0, None).await?;
        let buffers = UndoBuffers::default();

        delete_with_undo(&db, &buffers, entry.id).await?;
        product::delete_product(&db, product.id).await?;

        let mut slots = buffers.lock().await;
        let buffer = slots.get_mut(&product.id).unwrap();
        let result = undo_delete(&db, buffer).await;
        assert!(matches!(result, Err(Error::ProductNotFound { .. })));
        assert!(buffer.peek().is_none());
        Ok(())
    }
}
