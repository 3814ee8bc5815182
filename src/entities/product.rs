//! Product entity - A supply the household wants to keep on hand.
//!
//! Each product has a category, a unit of measure and a target quantity.
//! `current_stock` is maintained by the store as the sum of the product's
//! stock entries, so reads never need to re-aggregate batches.

use sea_orm::Iterable;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Supply category. Food and water categories drive the preparedness rating.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    /// Drinking water
    #[sea_orm(string_value = "WATER")]
    Water,
    /// Canned and jarred food
    #[sea_orm(string_value = "PRESERVED_FOOD")]
    PreservedFood,
    /// Rice, pasta, beans and similar
    #[sea_orm(string_value = "DRY_GOODS")]
    DryGoods,
    /// Freeze-dried meals
    #[sea_orm(string_value = "FREEZE_DRIED")]
    FreezeDried,
    /// Medicine and first aid
    #[sea_orm(string_value = "MEDICINE")]
    Medicine,
    /// Fuel for cooking and heating
    #[sea_orm(string_value = "FUEL")]
    Fuel,
    /// Anything else
    #[sea_orm(string_value = "OTHER")]
    Other,
}

impl Category {
    /// Categories that count as food for the preparedness rating.
    pub const FOOD: [Self; 3] = [Self::PreservedFood, Self::DryGoods, Self::FreezeDried];

    /// Returns true for the food categories.
    #[must_use]
    pub fn is_food(self) -> bool {
        Self::FOOD.contains(&self)
    }

    /// Wire name, e.g. `PRESERVED_FOOD`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Water => "WATER",
            Self::PreservedFood => "PRESERVED_FOOD",
            Self::DryGoods => "DRY_GOODS",
            Self::FreezeDried => "FREEZE_DRIED",
            Self::Medicine => "MEDICINE",
            Self::Fuel => "FUEL",
            Self::Other => "OTHER",
        }
    }

    /// Parses a wire name case-insensitively.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::iter().find(|c| c.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

/// Unit of measure for a product's quantities.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Unit {
    /// Liters
    #[sea_orm(string_value = "LITERS")]
    Liters,
    /// Kilograms
    #[sea_orm(string_value = "KG")]
    Kg,
    /// Cans
    #[sea_orm(string_value = "CANS")]
    Cans,
    /// Individual pieces
    #[sea_orm(string_value = "PIECES")]
    Pieces,
    /// Grams
    #[sea_orm(string_value = "GRAMS")]
    Grams,
}

impl Unit {
    /// Increment used when stepping a quantity up or down ("use one").
    #[must_use]
    pub const fn step(self) -> f64 {
        match self {
            Self::Liters | Self::Kg => 0.5,
            Self::Grams => 100.0,
            Self::Pieces | Self::Cans => 1.0,
        }
    }

    /// Wire name, e.g. `LITERS`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Liters => "LITERS",
            Self::Kg => "KG",
            Self::Cans => "CANS",
            Self::Pieces => "PIECES",
            Self::Grams => "GRAMS",
        }
    }

    /// Parses a wire name case-insensitively.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::iter().find(|u| u.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (e.g., "Canned beans", "Water")
    pub name: String,
    /// Supply category
    pub category: Category,
    /// Unit all quantities of this product are measured in
    pub unit: Unit,
    /// Desired on-hand amount
    pub target_quantity: f64,
    /// Sum of all stock entry quantities for this product
    pub current_stock: f64,
    /// Free-form notes
    pub notes: Option<String>,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One product has many stock entries
    #[sea_orm(has_many = "super::stock_entry::Entity")]
    StockEntries,
}

impl Related<super::stock_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
