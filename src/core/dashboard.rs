//! Dashboard aggregation - summary statistics over the whole inventory.
//!
//! Inputs are the same lists the store serves for the dashboard: all
//! products, expired batches, batches expiring within the horizon and
//! products below target. Everything here is a pure function of those lists
//! and the reference day.

use crate::{
    core::{expiry::parse_date, stock::is_at_target},
    entities::{Category, product, stock_entry},
};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

/// Time left until the soonest expiring batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryCountdown {
    /// Nothing expires within the horizon
    BeyondHorizon,
    /// The soonest batch expires today (or is already due)
    Today,
    /// Whole days remaining, always at least 1
    Days(i64),
}

impl ExpiryCountdown {
    /// Builds a countdown from a signed day difference.
    #[must_use]
    pub const fn from_days(days: i64) -> Self {
        if days <= 0 { Self::Today } else { Self::Days(days) }
    }
}

/// Headline dashboard numbers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    /// Number of products
    pub product_count: usize,
    /// Products whose current stock reaches their target
    pub at_target_count: usize,
    /// `at_target_count` as a rounded percentage of all products
    pub readiness_percent: u8,
    /// Distinct products that are expired, expiring or low
    pub at_risk_count: usize,
    /// Number of expired batches
    pub expired_count: usize,
    /// Number of batches expiring within the horizon
    pub expiring_count: usize,
    /// Number of products below target
    pub low_count: usize,
    /// Earliest expiry date among the expiring batches
    pub soonest_expiry: Option<NaiveDate>,
    /// Countdown to `soonest_expiry`
    pub countdown: ExpiryCountdown,
}

/// At-target tally for one group of products.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct GroupTally {
    /// Products in the group that reach their target
    pub at_target: usize,
    /// Products in the group
    pub total: usize,
}

/// At-target tallies split into water and everything else.
///
/// A group is `None` when it has no products.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryBreakdown {
    /// Water products
    pub water: Option<GroupTally>,
    /// All non-water products
    pub supplies: Option<GroupTally>,
}

/// Computes the dashboard statistics.
#[must_use]
pub fn summarize(
    products: &[product::Model],
    expired: &[stock_entry::Model],
    expiring: &[stock_entry::Model],
    low: &[product::Model],
    today: NaiveDate,
) -> DashboardStats {
    let at_target_count = products.iter().filter(|p| is_at_target(p)).count();

    let at_risk: BTreeSet<i64> = expired
        .iter()
        .chain(expiring)
        .map(|e| e.product_id)
        .chain(low.iter().map(|p| p.id))
        .collect();

    let soonest_expiry = soonest_expiry(expiring);
    let countdown = soonest_expiry.map_or(ExpiryCountdown::BeyondHorizon, |date| {
        ExpiryCountdown::from_days((date - today).num_days())
    });

    DashboardStats {
        product_count: products.len(),
        at_target_count,
        readiness_percent: readiness_percent(at_target_count, products.len()),
        at_risk_count: at_risk.len(),
        expired_count: expired.len(),
        expiring_count: expiring.len(),
        low_count: low.len(),
        soonest_expiry,
        countdown,
    }
}

/// Rounded percentage of `at_target` over `total`, `0` when `total` is zero.
#[must_use]
pub fn readiness_percent(at_target: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    // Counts are far below 2^53 and the result is in [0, 100]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let percent = (at_target.min(total) as f64 / total as f64 * 100.0).round() as u8;
    percent
}

/// Earliest parseable expiry date among `entries`.
///
/// For well-formed `YYYY-MM-DD` strings this is also the lexicographically
/// smallest one. Missing and malformed dates are skipped.
#[must_use]
pub fn soonest_expiry(entries: &[stock_entry::Model]) -> Option<NaiveDate> {
    entries
        .iter()
        .filter_map(|e| e.expiry_date.as_deref().and_then(parse_date))
        .min()
}

/// Splits products into water and other supplies and tallies each group.
#[must_use]
pub fn category_breakdown(products: &[product::Model]) -> CategoryBreakdown {
    let tally = |water: bool| {
        let group: Vec<&product::Model> = products
            .iter()
            .filter(|p| (p.category == Category::Water) == water)
            .collect();
        (!group.is_empty()).then(|| GroupTally {
            at_target: group.iter().filter(|p| is_at_target(p)).count(),
            total: group.len(),
        })
    };
    CategoryBreakdown {
        water: tally(true),
        supplies: tally(false),
    }
}

/// Current stock as a percentage of target, capped at 100.
///
/// Returns `0.0` when the target is zero or negative.
#[must_use]
pub fn stock_progress(product: &product::Model) -> f64 {
    if product.target_quantity <= 0.0 {
        return 0.0;
    }
    (product.current_stock / product.target_quantity * 100.0).clamp(0.0, 100.0)
}
