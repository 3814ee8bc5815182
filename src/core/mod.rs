//! Core inventory logic.
//!
//! `expiry`, `consumption`, `stock`, `preparedness`, `dashboard` and `report`
//! are pure functions over entity models and an explicit reference day.
//! `product`, `stock_entry`, `undo` and `snapshot` talk to the database.

/// Consumption order (earliest expiry first)
pub mod consumption;
/// Dashboard statistics and category breakdown
pub mod dashboard;
/// Expiry classification and date parsing
pub mod expiry;
/// 0-5 star preparedness rating
pub mod preparedness;
/// Product CRUD and seeding
pub mod product;
/// Locale-aware text rendering
pub mod report;
/// Whole-inventory snapshots and their evaluation
pub mod snapshot;
/// Stock aggregation and the expired / expiring / low views
pub mod stock;
/// Stock entry CRUD and "use one"
pub mod stock_entry;
/// Single-step undo for deleted batches
pub mod undo;
