//! Stock entry entity - One dated batch of a product.
//!
//! Dates are kept as the `YYYY-MM-DD` strings the backend contract uses.
//! Parsing happens in [`crate::core::expiry`], where a malformed date is
//! treated as absent rather than rejected.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Stock entry database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stock_entries")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the batch
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the product this batch belongs to
    pub product_id: i64,
    /// Amount in the product's unit
    pub quantity: f64,
    /// Optional batch label (e.g. "5L bottles")
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

/// Defines relationships between StockEntry and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each batch belongs to one product; deleting the product removes its batches
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id",
        on_delete = "Cascade"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
