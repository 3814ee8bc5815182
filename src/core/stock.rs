//! Stock aggregation and the expired / expiring / low views.
//!
//! The views here recompute locally what the store serves from its
//! `stock/expired`, `stock/expiring` and `stock/low` queries. Both paths go
//! through [`crate::core::expiry::classify`], so they always agree.

use crate::{
    core::expiry::{ExpiryStatus, classify},
    entities::{product, stock_entry},
};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Sums, per product, the quantities of the entries accepted by `counts`.
///
/// Every product in `products` gets a key, defaulting to zero. Entries for
/// products outside the list are still summed under their own id. Negative or
/// non-finite quantities contribute nothing, so no total is ever negative.
#[must_use]
pub fn aggregate<F>(
    products: &[product::Model],
    entries: &[stock_entry::Model],
    counts: F,
) -> BTreeMap<i64, f64>
where
    F: Fn(&stock_entry::Model) -> bool,
{
    let mut totals: BTreeMap<i64, f64> = products.iter().map(|p| (p.id, 0.0)).collect();
    for entry in entries.iter().filter(|e| counts(e)) {
        *totals.entry(entry.product_id).or_insert(0.0) += sanitize(entry.quantity);
    }
    totals
}

/// Net available stock per product: everything that is not expired on `today`.
///
/// Entries with no (or an unparseable) expiry date count as available.
#[must_use]
pub fn available_stock(
    products: &[product::Model],
    entries: &[stock_entry::Model],
    today: NaiveDate,
) -> BTreeMap<i64, f64> {
    aggregate(products, entries, |e| !is_expired(e, today))
}

/// Total quantity per product across the given (already expired) entries.
#[must_use]
pub fn expired_quantity_by_product(expired: &[stock_entry::Model]) -> BTreeMap<i64, f64> {
    aggregate(&[], expired, |_| true)
}

/// Returns true if the entry's expiry date is before `today`.
#[must_use]
pub fn is_expired(entry: &stock_entry::Model, today: NaiveDate) -> bool {
    classify(entry.expiry_date.as_deref(), today, 0) == Some(ExpiryStatus::Expired)
}

/// Entries whose expiry date has passed.
#[must_use]
pub fn expired_entries(entries: &[stock_entry::Model], today: NaiveDate) -> Vec<stock_entry::Model> {
    entries
        .iter()
        .filter(|e| is_expired(e, today))
        .cloned()
        .collect()
}

/// Entries expiring today or within `days` days, excluding already expired ones.
#[must_use]
pub fn expiring_entries(
    entries: &[stock_entry::Model],
    today: NaiveDate,
    days: i64,
) -> Vec<stock_entry::Model> {
    entries
        .iter()
        .filter(|e| {
            classify(e.expiry_date.as_deref(), today, days) == Some(ExpiryStatus::Approaching)
        })
        .cloned()
        .collect()
}

/// Returns true if the product is below its target.
///
/// A target of zero (or less) is always satisfied, so such products are never low.
#[must_use]
pub fn is_low(product: &product::Model) -> bool {
    product.target_quantity > 0.0 && product.current_stock < product.target_quantity
}

/// Returns true if the product has reached its target.
#[must_use]
pub fn is_at_target(product: &product::Model) -> bool {
    product.current_stock >= product.target_quantity
}

/// Products below their target quantity.
#[must_use]
pub fn low_stock(products: &[product::Model]) -> Vec<product::Model> {
    products.iter().filter(|p| is_low(p)).cloned().collect()
}

fn sanitize(quantity: f64) -> f64 {
    if quantity.is_finite() { quantity.max(0.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::{
        core::expiry::parse_date,
        entities::Category,
        test_utils::{sample_entry, sample_product},
    };

    fn today() -> NaiveDate {
        parse_date("2025-06-15").unwrap()
    }

    #[test]
    fn test_available_stock_excludes_expired() {
        let products = vec![sample_product(1, Category::DryGoods, 10.0, 6.0)];
        let entries = vec![
            sample_entry(1, 1, 2.0, Some("2025-06-14")),
            sample_entry(2, 1, 3.0, Some("2025-06-15")),
            sample_entry(3, 1, 1.0, None),
        ];
        let totals = available_stock(&products, &entries, today());
        assert_eq!(totals[&1], 4.0);
    }

    #[test]
    fn test_empty_entries_yield_zero_for_every_product() {
        let products = vec![
            sample_product(1, Category::Water, 10.0, 0.0),
            sample_product(2, Category::Fuel, 5.0, 0.0),
        ];
        let totals = available_stock(&products, &[], today());
        assert_eq!(totals.len(), 2);
        assert!(totals.values().all(|q| *q == 0.0));
    }

    #[test]
    fn test_totals_are_never_negative() {
        let products = vec![sample_product(1, Category::Water, 10.0, 0.0)];
        let entries = vec![
            sample_entry(1, 1, -4.0, None),
            sample_entry(2, 1, f64::NAN, None),
            sample_entry(3, 1, 1.5, None),
        ];
        let totals = aggregate(&products, &entries, |_| true);
        assert_eq!(totals[&1], 1.5);
        assert!(totals.values().all(|q| *q >= 0.0));
    }

    #[test]
    fn test_custom_predicate() {
        let products = vec![sample_product(1, Category::Water, 10.0, 0.0)];
        let entries = vec![sample_entry(1, 1, 2.0, None), sample_entry(2, 1, 5.0, Some("2030-01-01"))];
        let dated_only = aggregate(&products, &entries, |e| e.expiry_date.is_some());
        assert_eq!(dated_only[&1], 5.0);
    }

    #[test]
    fn test_expired_quantity_by_product_groups_ids() {
        let expired = vec![
            sample_entry(1, 1, 2.0, Some("2020-01-01")),
            sample_entry(2, 2, 1.0, Some("2020-01-01")),
            sample_entry(3, 1, 0.5, Some("2020-01-01")),
        ];
        let totals = expired_quantity_by_product(&expired);
        assert_eq!(totals[&1], 2.5);
        assert_eq!(totals[&2], 1.0);
    }

    #[test]
    fn test_expired_and_expiring_views_are_disjoint() {
        let entries = vec![
            sample_entry(1, 1, 1.0, Some("2025-06-01")),
            sample_entry(2, 1, 1.0, Some("2025-06-15")),
            sample_entry(3, 1, 1.0, Some("2025-07-15")),
            sample_entry(4, 1, 1.0, Some("2025-07-16")),
            sample_entry(5, 1, 1.0, None),
        ];
        let expired: Vec<i64> = expired_entries(&entries, today()).iter().map(|e| e.id).collect();
        let expiring: Vec<i64> = expiring_entries(&entries, today(), 30)
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(expired, vec![1]);
        assert_eq!(expiring, vec![2, 3]);
    }

    #[test]
    fn test_low_stock_skips_zero_targets() {
        let products = vec![
            sample_product(1, Category::Water, 10.0, 4.0),
            sample_product(2, Category::Fuel, 0.0, 0.0),
            sample_product(3, Category::DryGoods, 2.0, 2.0),
        ];
        let low: Vec<i64> = low_stock(&products).iter().map(|p| p.id).collect();
        assert_eq!(low, vec![1]);
        assert!(is_at_target(&products[1]));
        assert!(is_at_target(&products[2]));
    }
}
