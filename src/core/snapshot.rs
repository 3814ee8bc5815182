//! Inventory snapshots and the dashboard evaluation built from them.
//!
//! A [`Snapshot`] is every product and every batch at one moment, loaded
//! either from the database or from a backend JSON dump. [`Snapshot::evaluate`]
//! runs the classifier, aggregator, scorer and dashboard over it in one pass.

use crate::{
    config::settings::Settings,
    core::{
        dashboard::{self, CategoryBreakdown, DashboardStats},
        preparedness::{self, PreparednessRating},
        product::get_products,
        stock,
        stock_entry::get_all_stock,
    },
    entities::{product, stock_entry},
    errors::Result,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

/// Every product and batch at one point in time.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// All products
    #[serde(default)]
    pub products: Vec<product::Model>,
    /// All batches
    #[serde(default)]
    pub stock: Vec<stock_entry::Model>,
}

/// Everything the dashboard shows, derived from one snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    /// Headline numbers
    pub stats: DashboardStats,
    /// Water vs. other supplies at-target tallies
    pub breakdown: CategoryBreakdown,
    /// Star rating, `None` when there is no food or water
    pub rating: Option<PreparednessRating>,
    /// Batches past their expiry date
    pub expired: Vec<stock_entry::Model>,
    /// Batches expiring within the horizon
    pub expiring: Vec<stock_entry::Model>,
    /// Products below target
    pub low: Vec<product::Model>,
}

impl Snapshot {
    /// Parses a `{ "products": [...], "stock": [...] }` dump.
    ///
    /// # Errors
    /// Returns [`crate::errors::Error::Json`] if the payload is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads every product and batch from the database.
    ///
    /// # Errors
    /// Returns an error if a database query fails.
    pub async fn load(db: &DatabaseConnection) -> Result<Self> {
        let products = get_products(db, None).await?;
        let stock = get_all_stock(db).await?;
        tracing::debug!(
            products = products.len(),
            batches = stock.len(),
            "Loaded inventory snapshot"
        );
        Ok(Self { products, stock })
    }

    /// Computes the dashboard for the settings' reference day and horizon.
    #[must_use]
    pub fn evaluate(&self, settings: &Settings) -> Evaluation {
        let today = settings.today();
        let expired = stock::expired_entries(&self.stock, today);
        let expiring = stock::expiring_entries(&self.stock, today, settings.horizon_days);
        let low = stock::low_stock(&self.products);

        Evaluation {
            stats: dashboard::summarize(&self.products, &expired, &expiring, &low, today),
            breakdown: dashboard::category_breakdown(&self.products),
            rating: preparedness::rate(&self.products, &expired),
            expired,
            expiring,
            low,
        }
    }
}
