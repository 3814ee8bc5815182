//! Report formatting - turns core results into display text.
//!
//! All functions are pure and take the [`Locale`] explicitly. The bot layer
//! composes these into messages; nothing here knows about Discord.

use crate::{
    config::settings::Locale,
    core::{
        dashboard::{DashboardStats, ExpiryCountdown, stock_progress},
        expiry::{ExpiryStatus, parse_date},
        preparedness::{Hint, MAX_STARS},
    },
    entities::{Category, Unit, product},
};
use chrono::{Datelike, NaiveDate};

const MONTHS_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sept", "Oct", "Nov", "Dec",
];

const MONTHS_SV: [&str; 12] = [
    "jan.", "feb.", "mars", "apr.", "maj", "juni", "juli", "aug.", "sep.", "okt.", "nov.", "dec.",
];

/// Fixed headings used by dashboard and stock listings.
#[derive(Clone, Copy, Debug)]
pub struct Labels {
    /// Dashboard title
    pub dashboard: &'static str,
    /// "Products" stat
    pub products: &'static str,
    /// Readiness stat
    pub readiness: &'static str,
    /// At-risk stat
    pub at_risk: &'static str,
    /// Closest expiry stat
    pub closest_expiry: &'static str,
    /// Category breakdown section
    pub breakdown: &'static str,
    /// Water group
    pub water: &'static str,
    /// Non-water group
    pub supplies: &'static str,
    /// Preparedness section
    pub preparedness: &'static str,
    /// Marker on the batch to use first
    pub consume_next: &'static str,
    /// Expired section
    pub expired: &'static str,
    /// Expiring section
    pub expiring: &'static str,
    /// Batch without an expiry date
    pub no_expiry: &'static str,
    /// Shown when a list is empty
    pub none: &'static str,
}

impl Labels {
    /// Headings in the given language.
    #[must_use]
    pub const fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::En => Self {
                dashboard: "Preparedness overview",
                products: "Products",
                readiness: "Readiness",
                at_risk: "At risk",
                closest_expiry: "Closest expiry",
                breakdown: "By category",
                water: "Water",
                supplies: "Supplies",
                preparedness: "Preparedness",
                consume_next: "consume next",
                expired: "Expired",
                expiring: "Expiring soon",
                no_expiry: "no expiry date",
                none: "None",
            },
            Locale::Sv => Self {
                dashboard: "Beredskapsöversikt",
                products: "Produkter",
                readiness: "Beredskap",
                at_risk: "I riskzonen",
                closest_expiry: "Närmaste utgång",
                breakdown: "Per kategori",
                water: "Vatten",
                supplies: "Förnödenheter",
                preparedness: "Beredskapsnivå",
                consume_next: "använd först",
                expired: "Utgånget",
                expiring: "Går ut snart",
                no_expiry: "inget bäst före-datum",
                none: "Inga",
            },
        }
    }
}

/// "`n` of `total` at target", or "`n` at target" without a total.
#[must_use]
pub fn at_target_text(at_target: usize, total: Option<usize>, locale: Locale) -> String {
    match (total, locale) {
        (Some(total), Locale::En) => format!("{at_target} of {total} at target"),
        (Some(total), Locale::Sv) => format!("{at_target} av {total} når målet"),
        (None, Locale::En) => format!("{at_target} at target"),
        (None, Locale::Sv) => format!("{at_target} når målet"),
    }
}

/// Formats a date as day, short month and year, e.g. `15 Jun 2025` or
/// `15 juni 2025`.
#[must_use]
pub fn format_date(date: NaiveDate, locale: Locale) -> String {
    let months = match locale {
        Locale::Sv => &MONTHS_SV,
        Locale::En => &MONTHS_EN,
    };
    let month = months[date.month0() as usize];
    format!("{} {month} {}", date.day(), date.year())
}

/// Formats a `YYYY-MM-DD` string, returning the input unchanged if it does
/// not parse.
#[must_use]
pub fn format_date_str(value: &str, locale: Locale) -> String {
    parse_date(value).map_or_else(|| value.to_string(), |date| format_date(date, locale))
}

/// Renders a star count as filled and empty stars, e.g. `★★★☆☆`.
#[must_use]
pub fn format_stars(stars: u8) -> String {
    let filled = stars.min(MAX_STARS);
    let empty = MAX_STARS - filled;
    format!(
        "{}{}",
        "★".repeat(filled.into()),
        "☆".repeat(empty.into())
    )
}

/// Advice text for a preparedness hint.
#[must_use]
pub const fn hint_text(hint: Hint, locale: Locale) -> &'static str {
    match (hint, locale) {
        (Hint::AddFood, Locale::En) => "Add some food to earn a star.",
        (Hint::AddFood, Locale::Sv) => "Lägg till mat för att få en stjärna.",
        (Hint::AddWater, Locale::En) => "Add some water to earn a star.",
        (Hint::AddWater, Locale::Sv) => "Lägg till vatten för att få en stjärna.",
        (Hint::AddFoodOrWater, Locale::En) => "Add food or water to get started.",
        (Hint::AddFoodOrWater, Locale::Sv) => "Lägg till mat eller vatten för att komma igång.",
        (Hint::FoodHalf, Locale::En) => "Stock at least half of your food target.",
        (Hint::FoodHalf, Locale::Sv) => "Fyll på minst hälften av ditt matmål.",
        (Hint::WaterHalf, Locale::En) => "Stock at least half of your water target.",
        (Hint::WaterHalf, Locale::Sv) => "Fyll på minst hälften av ditt vattenmål.",
        (Hint::FoodOrWaterHalf, Locale::En) => "Add more food or water to reach half your targets.",
        (Hint::FoodOrWaterHalf, Locale::Sv) => {
            "Fyll på mer mat eller vatten för att nå hälften av dina mål."
        }
        (Hint::FullBoth, Locale::En) => "Fill every food target and your water target.",
        (Hint::FullBoth, Locale::Sv) => "Fyll alla matmål och ditt vattenmål.",
        (Hint::Perfect, Locale::En) => "Fully prepared. Well done!",
        (Hint::Perfect, Locale::Sv) => "Fullt förberedd. Bra jobbat!",
    }
}

/// Countdown text for the closest expiry.
#[must_use]
pub fn countdown_text(countdown: ExpiryCountdown, locale: Locale) -> String {
    match (countdown, locale) {
        (ExpiryCountdown::BeyondHorizon, Locale::En) => "Nothing expiring soon".to_string(),
        (ExpiryCountdown::BeyondHorizon, Locale::Sv) => "Inget går ut snart".to_string(),
        (ExpiryCountdown::Today, Locale::En) => "expires today".to_string(),
        (ExpiryCountdown::Today, Locale::Sv) => "går ut idag".to_string(),
        (ExpiryCountdown::Days(1), Locale::En) => "1 day".to_string(),
        (ExpiryCountdown::Days(1), Locale::Sv) => "1 dag".to_string(),
        (ExpiryCountdown::Days(n), Locale::En) => format!("{n} days"),
        (ExpiryCountdown::Days(n), Locale::Sv) => format!("{n} dagar"),
    }
}

/// The "N expired · N expiring · N low" line, listing only non-zero parts.
///
/// Returns `None` when nothing is at risk.
#[must_use]
pub fn at_risk_detail(stats: &DashboardStats, locale: Locale) -> Option<String> {
    let (expired, expiring, low) = match locale {
        Locale::En => ("expired", "expiring", "low"),
        Locale::Sv => ("utgångna", "går ut snart", "lågt lager"),
    };
    let parts: Vec<String> = [
        (stats.expired_count, expired),
        (stats.expiring_count, expiring),
        (stats.low_count, low),
    ]
    .into_iter()
    .filter(|(count, _)| *count > 0)
    .map(|(count, label)| format!("{count} {label}"))
    .collect();

    (!parts.is_empty()).then(|| parts.join(" · "))
}

/// Short label for an expiry status.
#[must_use]
pub const fn status_label(status: ExpiryStatus, locale: Locale) -> &'static str {
    match (status, locale) {
        (ExpiryStatus::Fresh, Locale::En) => "fresh",
        (ExpiryStatus::Fresh, Locale::Sv) => "färsk",
        (ExpiryStatus::Approaching, Locale::En) => "expiring soon",
        (ExpiryStatus::Approaching, Locale::Sv) => "går ut snart",
        (ExpiryStatus::Expired, Locale::En) => "expired",
        (ExpiryStatus::Expired, Locale::Sv) => "utgången",
    }
}

/// Status marker used in batch listings.
#[must_use]
pub const fn status_icon(status: Option<ExpiryStatus>) -> &'static str {
    match status {
        None => "▫️",
        Some(ExpiryStatus::Fresh) => "🟢",
        Some(ExpiryStatus::Approaching) => "🟡",
        Some(ExpiryStatus::Expired) => "🔴",
    }
}

/// Display name for a category.
#[must_use]
pub const fn category_label(category: Category, locale: Locale) -> &'static str {
    match (category, locale) {
        (Category::Water, Locale::En) => "Water",
        (Category::Water, Locale::Sv) => "Vatten",
        (Category::PreservedFood, Locale::En) => "Preserved food",
        (Category::PreservedFood, Locale::Sv) => "Konserver",
        (Category::DryGoods, Locale::En) => "Dry goods",
        (Category::DryGoods, Locale::Sv) => "Torrvaror",
        (Category::FreezeDried, Locale::En) => "Freeze-dried",
        (Category::FreezeDried, Locale::Sv) => "Frystorkat",
        (Category::Medicine, Locale::En) => "Medicine",
        (Category::Medicine, Locale::Sv) => "Medicin",
        (Category::Fuel, Locale::En) => "Fuel",
        (Category::Fuel, Locale::Sv) => "Bränsle",
        (Category::Other, Locale::En) => "Other",
        (Category::Other, Locale::Sv) => "Övrigt",
    }
}

/// Abbreviated unit, e.g. `L` or `st`.
#[must_use]
pub const fn unit_label(unit: Unit, locale: Locale) -> &'static str {
    match (unit, locale) {
        (Unit::Liters, _) => "L",
        (Unit::Kg, _) => "kg",
        (Unit::Grams, _) => "g",
        (Unit::Cans, Locale::En) => "cans",
        (Unit::Cans, Locale::Sv) => "burkar",
        (Unit::Pieces, Locale::En) => "pcs",
        (Unit::Pieces, Locale::Sv) => "st",
    }
}

/// Formats a quantity with at most two decimals and no trailing zeros.
#[must_use]
pub fn format_quantity(quantity: f64) -> String {
    let rounded = (quantity * 100.0).round() / 100.0;
    // Avoid printing "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded}")
}

/// Generates a progress bar string for visual representation.
///
/// Creates a text-based progress bar like: `[████████░░] 80.0%`
///
/// # Arguments
/// * `progress_percent` - Progress percentage (0-100)
/// * `bar_length` - Length of the progress bar in characters (default 10)
#[must_use]
pub fn format_progress_bar(progress_percent: f64, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let clamped_progress = progress_percent.clamp(0.0, 100.0);

    // Cast safety: clamped_progress ∈ [0, 100], length is small (10-20).
    // Result is mathematically in [0, length], truncation/sign loss intentional for display.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((clamped_progress / 100.0) * length as f64).round() as usize;
    let empty = length.saturating_sub(filled);

    let filled_str = "█".repeat(filled);
    let empty_str = "░".repeat(empty);

    format!("[{filled_str}{empty_str}] {clamped_progress:.1}%")
}

/// One-line stock summary for a product, e.g.
/// `Water: 40 / 100 L [████░░░░░░] 40.0%`.
#[must_use]
pub fn format_product_line(product: &product::Model, locale: Locale) -> String {
    format!(
        "{}: {} / {} {} {}",
        product.name,
        format_quantity(product.current_stock),
        format_quantity(product.target_quantity),
        unit_label(product.unit, locale),
        format_progress_bar(stock_progress(product), None)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_product;

    fn date(value: &str) -> NaiveDate {
        parse_date(value).unwrap_or_default()
    }

    fn stats(expired: usize, expiring: usize, low: usize) -> DashboardStats {
        DashboardStats {
            product_count: 3,
            at_target_count: 0,
            readiness_percent: 0,
            at_risk_count: 0,
            expired_count: expired,
            expiring_count: expiring,
            low_count: low,
            soonest_expiry: None,
            countdown: ExpiryCountdown::BeyondHorizon,
        }
    }

    #[test]
    fn test_format_date_by_locale() {
        let d = date("2025-06-15");
        assert_eq!(format_date(d, Locale::En), "15 Jun 2025");
        assert_eq!(format_date(d, Locale::Sv), "15 juni 2025");
        assert_ne!(format_date(d, Locale::En), format_date(d, Locale::Sv));
        assert_eq!(format_date(date("2025-03-01"), Locale::Sv), "1 mars 2025");
    }

    #[test]
    fn test_format_date_str_invalid_passthrough() {
        assert_eq!(format_date_str("not-a-date", Locale::Sv), "not-a-date");
        assert_eq!(format_date_str("2025-12-24", Locale::En), "24 Dec 2025");
    }

    #[test]
    fn test_format_stars() {
        assert_eq!(format_stars(0), "☆☆☆☆☆");
        assert_eq!(format_stars(3), "★★★☆☆");
        assert_eq!(format_stars(5), "★★★★★");
        assert_eq!(format_stars(9), "★★★★★");
    }

    #[test]
    fn test_countdown_text() {
        assert_eq!(countdown_text(ExpiryCountdown::Today, Locale::En), "expires today");
        assert_eq!(countdown_text(ExpiryCountdown::Days(1), Locale::En), "1 day");
        assert_eq!(countdown_text(ExpiryCountdown::Days(5), Locale::En), "5 days");
        assert_eq!(countdown_text(ExpiryCountdown::Days(5), Locale::Sv), "5 dagar");
    }

    #[test]
    fn test_at_risk_detail_lists_non_zero_parts() {
        assert_eq!(at_risk_detail(&stats(0, 0, 0), Locale::En), None);
        assert_eq!(
            at_risk_detail(&stats(2, 0, 1), Locale::En).as_deref(),
            Some("2 expired · 1 low")
        );
        assert_eq!(
            at_risk_detail(&stats(1, 3, 2), Locale::En).as_deref(),
            Some("1 expired · 3 expiring · 2 low")
        );
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(2.0), "2");
        assert_eq!(format_quantity(2.5), "2.5");
        assert_eq!(format_quantity(0.1 + 0.2), "0.3");
        assert_eq!(format_quantity(-0.001), "0");
    }

    #[test]
    fn test_format_progress_bar() {
        assert_eq!(format_progress_bar(100.0, Some(10)), "[██████████] 100.0%");
        assert_eq!(format_progress_bar(50.0, Some(10)), "[█████░░░░░] 50.0%");
        assert_eq!(format_progress_bar(0.0, Some(10)), "[░░░░░░░░░░] 0.0%");
        assert_eq!(format_progress_bar(-25.0, Some(4)), "[░░░░] 0.0%");
    }

    #[test]
    fn test_format_product_line() {
        let mut water = sample_product(1, Category::Water, 100.0, 40.0);
        water.name = "Water".to_string();
        assert_eq!(
            format_product_line(&water, Locale::En),
            "Water: 40 / 100 L [████░░░░░░] 40.0%"
        );

        // Overfilled stock caps the bar at 100%
        water.current_stock = 150.0;
        assert!(format_product_line(&water, Locale::Sv).ends_with("[██████████] 100.0%"));
    }

    #[test]
    fn test_labels_cover_both_locales() {
        assert_eq!(status_label(ExpiryStatus::Expired, Locale::En), "expired");
        assert_eq!(category_label(Category::DryGoods, Locale::Sv), "Torrvaror");
        assert_eq!(unit_label(Unit::Pieces, Locale::Sv), "st");
        assert_ne!(hint_text(Hint::Perfect, Locale::En), hint_text(Hint::Perfect, Locale::Sv));
        assert_eq!(Labels::for_locale(Locale::Sv).water, "Vatten");
    }

    #[test]
    fn test_at_target_text() {
        assert_eq!(at_target_text(2, Some(3), Locale::En), "2 of 3 at target");
        assert_eq!(at_target_text(1, None, Locale::Sv), "1 når målet");
    }
}
