//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities double as the wire shapes of the backend contract: field
//! names serialize in camelCase and enum values in SCREAMING_SNAKE_CASE.

pub mod product;
pub mod stock_entry;

// Re-export specific types to avoid conflicts
pub use product::{
    Category, Column as ProductColumn, Entity as Product, Model as ProductModel, Unit,
};
pub use stock_entry::{
    Column as StockEntryColumn, Entity as StockEntry, Model as StockEntryModel,
};
