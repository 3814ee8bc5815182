//! Consumption order - which batch to use first.
//!
//! Batches are consumed earliest-expiry first so the soonest-to-spoil stock is
//! always surfaced. Batches without a usable expiry date go last.

use crate::{core::expiry::parse_date, entities::stock_entry};
use chrono::NaiveDate;
use std::cmp::Ordering;

/// Orders two optional expiry dates, with `None` after every date.
fn compare_expiry(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Returns the batches in the order they should be consumed.
///
/// The sort is stable: batches sharing an expiry date, and batches with no
/// expiry date, keep their input order.
#[must_use]
pub fn consumption_order(entries: &[stock_entry::Model]) -> Vec<stock_entry::Model> {
    let mut keyed: Vec<(Option<NaiveDate>, &stock_entry::Model)> = entries
        .iter()
        .map(|e| (e.expiry_date.as_deref().and_then(parse_date), e))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| compare_expiry(*a, *b));
    keyed.into_iter().map(|(_, e)| e.clone()).collect()
}

/// The batch to consume next, if any.
#[must_use]
pub fn consume_next(entries: &[stock_entry::Model]) -> Option<&stock_entry::Model> {
    entries.iter().reduce(|best, e| {
        let best_date = best.expiry_date.as_deref().and_then(parse_date);
        let date = e.expiry_date.as_deref().and_then(parse_date);
        if compare_expiry(date, best_date) == Ordering::Less {
            e
        } else {
            best
        }
    })
}
