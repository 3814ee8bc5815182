//! Runtime settings - locale, expiry horizon and the reference day.
//!
//! Settings are an explicit value handed to every formatter and every
//! date-sensitive call site. Nothing in the core reads the clock or a global
//! language setting; [`Settings::today`] is the only place "now" is sampled.

use crate::{
    core::expiry::{DEFAULT_HORIZON_DAYS, parse_date},
    errors::{Error, Result},
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;

/// Display language.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Swedish
    #[default]
    Sv,
    /// English
    En,
}

impl Locale {
    /// Parses a language code such as `sv`, `en` or `en-GB`.
    #[must_use]
    pub fn parse(code: &str) -> Option<Self> {
        let lang = code.trim().split(['-', '_']).next()?.to_ascii_lowercase();
        match lang.as_str() {
            "sv" => Some(Self::Sv),
            "en" => Some(Self::En),
            _ => None,
        }
    }
}

/// Settings as written in the `[settings]` table of config.toml.
#[derive(Debug, Default, Deserialize)]
pub struct RawSettings {
    /// Language code
    #[serde(default)]
    pub locale: Option<String>,
    /// Look-ahead window for "expiring soon"
    #[serde(default)]
    pub horizon_days: Option<i64>,
    /// Fixed reference day, `YYYY-MM-DD`
    #[serde(default)]
    pub today: Option<String>,
}

/// Resolved runtime settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Display language
    pub locale: Locale,
    /// Look-ahead window for "expiring soon", in days
    pub horizon_days: i64,
    /// Fixed reference day; `None` means use the local clock
    pub today_override: Option<NaiveDate>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            horizon_days: DEFAULT_HORIZON_DAYS,
            today_override: None,
        }
    }
}

impl Settings {
    /// Settings pinned to a fixed day, mostly for tests.
    #[must_use]
    pub fn fixed(locale: Locale, today: NaiveDate) -> Self {
        Self {
            locale,
            today_override: Some(today),
            ..Self::default()
        }
    }

    /// The reference day: the override if set, otherwise the local calendar date.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.today_override
            .unwrap_or_else(|| Local::now().date_naive())
    }

    /// Resolves raw config values, then applies `PREP_LOCALE`,
    /// `PREP_HORIZON_DAYS` and `PREP_TODAY` from the environment on top.
    ///
    /// # Errors
    /// Returns [`Error::Config`] for an unknown locale, a negative horizon or
    /// an invalid date in either source.
    pub fn resolve(raw: &RawSettings) -> Result<Self> {
        let mut settings = Self::default();
        apply(&mut settings, raw.locale.as_deref(), raw.horizon_days, raw.today.as_deref())?;

        let env_horizon = match std::env::var("PREP_HORIZON_DAYS") {
            Ok(value) => Some(value.trim().parse::<i64>().map_err(|e| Error::Config {
                message: format!("PREP_HORIZON_DAYS must be a whole number of days: {e}"),
            })?),
            Err(_) => None,
        };
        apply(
            &mut settings,
            std::env::var("PREP_LOCALE").ok().as_deref(),
            env_horizon,
            std::env::var("PREP_TODAY").ok().as_deref(),
        )?;

        tracing::debug!(?settings, "Resolved settings");
        Ok(settings)
    }
}

fn apply(
    settings: &mut Settings,
    locale: Option<&str>,
    horizon_days: Option<i64>,
    today: Option<&str>,
) -> Result<()> {
    if let Some(code) = locale {
        settings.locale = Locale::parse(code).ok_or_else(|| Error::Config {
            message: format!("Unsupported locale '{code}', expected 'sv' or 'en'"),
        })?;
    }
    if let Some(days) = horizon_days {
        if days < 0 {
            return Err(Error::Config {
                message: format!("horizon_days cannot be negative (got {days})"),
            });
        }
        settings.horizon_days = days;
    }
    if let Some(value) = today {
        settings.today_override = Some(parse_date(value).ok_or_else(|| Error::Config {
            message: format!("Invalid today override '{value}', expected YYYY-MM-DD"),
        })?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_locale_parse() {
        assert_eq!(Locale::parse("sv"), Some(Locale::Sv));
        assert_eq!(Locale::parse("en-GB"), Some(Locale::En));
        assert_eq!(Locale::parse("EN"), Some(Locale::En));
        assert_eq!(Locale::parse("de"), None);
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.locale, Locale::Sv);
        assert_eq!(settings.horizon_days, 30);
        assert_eq!(settings.today_override, None);
    }

    #[test]
    fn test_today_override_wins() {
        let day = parse_date("2025-06-15").unwrap();
        assert_eq!(Settings::fixed(Locale::En, day).today(), day);
    }

    #[test]
    fn test_apply_raw_values() {
        let mut settings = Settings::default();
        apply(&mut settings, Some("en"), Some(14), Some("2025-01-01")).unwrap();
        assert_eq!(settings.locale, Locale::En);
        assert_eq!(settings.horizon_days, 14);
        assert_eq!(settings.today_override, parse_date("2025-01-01"));
    }

    #[test]
    fn test_apply_rejects_bad_values() {
        let mut settings = Settings::default();
        assert!(matches!(
            apply(&mut settings, Some("klingon"), None, None),
            Err(Error::Config { .. })
        ));
        assert!(matches!(
            apply(&mut settings, None, Some(-1), None),
            Err(Error::Config { .. })
        ));
        assert!(matches!(
            apply(&mut settings, None, None, Some("tomorrow")),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn test_raw_settings_from_toml() {
        let raw: RawSettings = toml::from_str(
            r#"
            locale = "en"
            horizon_days = 7
            "#,
        )
        .unwrap();
        assert_eq!(raw.locale.as_deref(), Some("en"));
        assert_eq!(raw.horizon_days, Some(7));
        assert!(raw.today.is_none());
    }
}
