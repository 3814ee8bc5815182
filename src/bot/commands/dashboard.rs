//! Overview Discord commands - dashboard and expiring.
//!
//! Both commands load a [`crate::core::snapshot::Snapshot`] and render its evaluation through
//! [`crate::core::report`], so they show exactly what the core computes.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        config::settings::Locale,
        core::{
            dashboard::GroupTally,
            report::{self, Labels},
            snapshot::Snapshot,
        },
        entities::{product, stock_entry},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use std::{collections::HashMap, fmt::Write};

    /// Keeps embed fields under Discord's 1024 character limit.
    const MAX_LINES: usize = 15;

    /// Shows readiness, at-risk products, the closest expiry and the star rating.
    #[poise::command(slash_command, prefix_command)]
    pub async fn dashboard(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let data = ctx.data();
        let locale = data.settings.locale;
        let labels = Labels::for_locale(locale);

        let snapshot = Snapshot::load(&data.database).await?;
        if snapshot.products.is_empty() {
            ctx.say("📦 No products yet. Add one with `/product add` to get started!")
                .await?;
            return Ok(());
        }
        let evaluation = snapshot.evaluate(&data.settings);
        let stats = &evaluation.stats;

        let mut at_risk = stats.at_risk_count.to_string();
        if let Some(detail) = report::at_risk_detail(stats, locale) {
            write!(&mut at_risk, "\n{detail}")?;
        }

        let closest = stats.soonest_expiry.map_or_else(
            || report::countdown_text(stats.countdown, locale),
            |date| {
                format!(
                    "{}\n{}",
                    report::format_date(date, locale),
                    report::countdown_text(stats.countdown, locale)
                )
            },
        );

        let mut embed = serenity::CreateEmbed::default()
            .title(format!("🛡️ {}", labels.dashboard))
            .color(0x0034_98DB)
            .field(
                labels.products,
                format!(
                    "{}\n{}",
                    stats.product_count,
                    report::at_target_text(stats.at_target_count, None, locale)
                ),
                true,
            )
            .field(labels.readiness, format!("{}%", stats.readiness_percent), true)
            .field(labels.at_risk, at_risk, true)
            .field(labels.closest_expiry, closest, true);

        let breakdown = breakdown_text(
            &[
                (labels.water, evaluation.breakdown.water),
                (labels.supplies, evaluation.breakdown.supplies),
            ],
            locale,
        )?;
        if !breakdown.is_empty() {
            embed = embed.field(labels.breakdown, breakdown, false);
        }

        if let Some(rating) = evaluation.rating {
            embed = embed.field(
                labels.preparedness,
                format!(
                    "{}\n{}",
                    report::format_stars(rating.stars),
                    report::hint_text(rating.hint, locale)
                ),
                false,
            );
        }

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Lists expired batches and batches expiring within the given number of days.
    #[poise::command(slash_command, prefix_command)]
    pub async fn expiring(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Look-ahead window in days (defaults to the configured horizon)"]
        days: Option<i64>,
    ) -> Result<()> {
        let data = ctx.data();
        let locale = data.settings.locale;
        let labels = Labels::for_locale(locale);

        let mut settings = data.settings;
        if let Some(days) = days {
            settings.horizon_days = days.max(0);
        }

        let snapshot = Snapshot::load(&data.database).await?;
        let evaluation = snapshot.evaluate(&settings);
        let names: HashMap<i64, &product::Model> =
            snapshot.products.iter().map(|p| (p.id, p)).collect();

        let embed = serenity::CreateEmbed::default()
            .title(format!("⏳ {} ({})", labels.expiring, settings.horizon_days))
            .color(0x00E6_7E22)
            .field(
                format!("🔴 {}", labels.expired),
                batch_lines(&evaluation.expired, &names, locale, labels.none)?,
                false,
            )
            .field(
                format!("🟡 {}", labels.expiring),
                batch_lines(&evaluation.expiring, &names, locale, labels.none)?,
                false,
            );

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    fn breakdown_text(groups: &[(&str, Option<GroupTally>)], locale: Locale) -> Result<String> {
        let mut text = String::new();
        for (label, tally) in groups {
            if let Some(tally) = tally {
                writeln!(
                    &mut text,
                    "**{label}:** {}",
                    report::at_target_text(tally.at_target, Some(tally.total), locale)
                )?;
            }
        }
        Ok(text)
    }

    fn batch_lines(
        entries: &[stock_entry::Model],
        products: &HashMap<i64, &product::Model>,
        locale: Locale,
        empty: &str,
    ) -> Result<String> {
        if entries.is_empty() {
            return Ok(empty.to_string());
        }
        let mut text = String::new();
        for entry in entries.iter().take(MAX_LINES) {
            let (name, unit) = products.get(&entry.product_id).map_or(("?", ""), |p| {
                (p.name.as_str(), report::unit_label(p.unit, locale))
            });
            let date = entry
                .expiry_date
                .as_deref()
                .map(|d| report::format_date_str(d, locale))
                .unwrap_or_default();
            writeln!(
                &mut text,
                "#{} **{name}** {} {unit} · {date}",
                entry.id,
                report::format_quantity(entry.quantity)
            )?;
        }
        if entries.len() > MAX_LINES {
            write!(&mut text, "… +{}", entries.len() - MAX_LINES)?;
        }
        Ok(text)
    }
}

// Re-export all commands
pub use inner::*;
