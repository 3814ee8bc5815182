//! Expiry classification for stock batches.
//!
//! All comparisons happen on calendar days (`NaiveDate`). A `YYYY-MM-DD`
//! string is read as a local calendar date and never passes through a
//! timestamp, so the effective day cannot shift with the caller's timezone.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default look-ahead window for "approaching expiry", in days.
pub const DEFAULT_HORIZON_DAYS: i64 = 30;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Derived freshness of a batch relative to a reference day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpiryStatus {
    /// Expires after the horizon
    Fresh,
    /// Expires today or within the horizon
    Approaching,
    /// Expiry date is before today
    Expired,
}

/// Parses a bare `YYYY-MM-DD` date. Returns `None` for anything else.
#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_iso(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Classifies an expiry date against `today`.
///
/// Returns `None` when the batch has no expiry date or the date cannot be
/// parsed. The horizon is inclusive: a batch expiring exactly `horizon_days`
/// from today is still `Approaching`. Negative horizons are treated as zero.
#[must_use]
pub fn classify(
    expiry_date: Option<&str>,
    today: NaiveDate,
    horizon_days: i64,
) -> Option<ExpiryStatus> {
    let days = days_until(expiry_date?, today)?;
    let status = if days < 0 {
        ExpiryStatus::Expired
    } else if days <= horizon_days.max(0) {
        ExpiryStatus::Approaching
    } else {
        ExpiryStatus::Fresh
    };
    Some(status)
}

/// Whole calendar days from `today` until `date`; negative when in the past.
///
/// Returns `None` if `date` is not a valid `YYYY-MM-DD` string.
#[must_use]
pub fn days_until(date: &str, today: NaiveDate) -> Option<i64> {
    parse_date(date).map(|d| (d - today).num_days())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use chrono::NaiveDateTime;

    fn day(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn test_no_expiry_date_has_no_status() {
        assert_eq!(classify(None, day("2025-06-15"), 30), None);
    }

    #[test]
    fn test_unparseable_date_has_no_status() {
        let today = day("2025-06-15");
        assert_eq!(classify(Some("not-a-date"), today, 30), None);
        assert_eq!(classify(Some("2025-13-01"), today, 30), None);
        assert_eq!(classify(Some("2025-06-15T00:00:00Z"), today, 30), None);
        assert_eq!(classify(Some(""), today, 30), None);
    }

    #[test]
    fn test_expiring_today_is_approaching() {
        let today = day("2025-06-15");
        for horizon in [0, 1, 7, 30, 365] {
            let status = classify(Some("2025-06-15"), today, horizon);
            assert_eq!(status, Some(ExpiryStatus::Approaching));
        }
    }

    #[test]
    fn test_yesterday_is_expired() {
        let today = day("2025-06-15");
        assert_eq!(
            classify(Some("2025-06-14"), today, 30),
            Some(ExpiryStatus::Expired)
        );
        assert_eq!(
            classify(Some("2025-06-14"), today, 0),
            Some(ExpiryStatus::Expired)
        );
    }

    #[test]
    fn test_horizon_is_inclusive() {
        let today = day("2025-06-15");
        assert_eq!(
            classify(Some("2025-07-15"), today, 30),
            Some(ExpiryStatus::Approaching)
        );
        assert_eq!(
            classify(Some("2025-07-16"), today, 30),
            Some(ExpiryStatus::Fresh)
        );
    }

    #[test]
    fn test_classification_across_month_and_year_boundaries() {
        let today = day("2024-12-31");
        assert_eq!(
            classify(Some("2025-01-01"), today, 1),
            Some(ExpiryStatus::Approaching)
        );
        assert_eq!(
            classify(Some("2024-12-30"), today, 1),
            Some(ExpiryStatus::Expired)
        );
    }

    #[test]
    fn test_negative_horizon_behaves_like_zero() {
        let today = day("2025-06-15");
        assert_eq!(
            classify(Some("2025-06-15"), today, -5),
            Some(ExpiryStatus::Approaching)
        );
        assert_eq!(
            classify(Some("2025-06-16"), today, -5),
            Some(ExpiryStatus::Fresh)
        );
    }

    #[test]
    fn test_days_until_late_evening_clock() {
        // 23:00 local on the 15th is still the 15th
        let now =
            NaiveDateTime::parse_from_str("2025-06-15T23:00:00", "%Y-%m-%dT%H:%M:%S").unwrap();
        assert_eq!(days_until("2025-06-20", now.date()), Some(5));
    }

    #[test]
    fn test_days_until_past_and_invalid() {
        let today = day("2025-06-15");
        assert_eq!(days_until("2025-06-15", today), Some(0));
        assert_eq!(days_until("2025-06-10", today), Some(-5));
        assert_eq!(days_until("garbage", today), None);
    }

    #[test]
    fn test_format_iso_round_trips() {
        assert_eq!(format_iso(day("2025-01-05")), "2025-01-05");
    }
}
