//! Stock Discord commands - `/stock list|add|use|set|delete|undo`.
//!
//! Deleting a batch remembers it in the product's undo buffer held in
//! [`BotData`](crate::bot::BotData); `/stock undo` restores it.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, find_product, handlers::autocomplete, user_facing},
        config::settings::Settings,
        core::{
            consumption::consumption_order,
            expiry::classify,
            report::{self, Labels},
            stock_entry::{self, StockEntryPayload},
            undo,
        },
        entities::{product, stock_entry as stock_entry_entity},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use std::fmt::Write;

    /// Keeps the embed description well under Discord's limit.
    const MAX_BATCHES: usize = 20;

    /// Parent command for the batches of a product.
    #[poise::command(
        slash_command,
        subcommands(
            "stock_list",
            "stock_add",
            "stock_use",
            "stock_set",
            "stock_delete",
            "stock_undo"
        )
    )]
    pub async fn stock(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Stock command. Available subcommands:\n\
            `/stock list` - Batches of a product, use-first on top\n\
            `/stock add` - Add a batch\n\
            `/stock use` - Use one unit from the batch that expires first\n\
            `/stock set` - Set a batch quantity\n\
            `/stock delete` - Remove a batch\n\
            `/stock undo` - Restore the last removed batch";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Lists a product's batches in the order they should be used.
    #[poise::command(slash_command, rename = "list")]
    pub async fn stock_list(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Product to list"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        product: String,
    ) -> Result<()> {
        let data = ctx.data();
        let db = &data.database;

        let Some(found) = user_facing(ctx, find_product(db, &product).await).await? else {
            return Ok(());
        };
        let entries = stock_entry::get_product_stock(db, found.id).await?;
        let ordered = consumption_order(&entries);

        let description = if ordered.is_empty() {
            Labels::for_locale(data.settings.locale).none.to_string()
        } else {
            batch_listing(&found, &ordered, &data.settings)?
        };

        let embed = serenity::CreateEmbed::default()
            .title(report::format_product_line(&found, data.settings.locale))
            .color(0x002E_CC71)
            .description(description);

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Adds a batch to a product.
    #[poise::command(slash_command, rename = "add")]
    pub async fn stock_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Product to add stock to"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        product: String,
        #[description = "Amount in the product's unit"] quantity: f64,
        #[description = "Expiry date, YYYY-MM-DD"] expiry: Option<String>,
        #[description = "Purchase date, YYYY-MM-DD"] purchased: Option<String>,
        #[description = "Where the batch is stored"] location: Option<String>,
        #[description = "Batch label (e.g., '5L bottles')"] sub_type: Option<String>,
    ) -> Result<()> {
        let data = ctx.data();
        let db = &data.database;

        let Some(found) = user_facing(ctx, find_product(db, &product).await).await? else {
            return Ok(());
        };

        let payload = StockEntryPayload {
            quantity,
            sub_type,
            purchased_date: purchased,
            expiry_date: expiry,
            location,
            notes: None,
        };
        let Some(created) =
            user_facing(ctx, stock_entry::add_stock_entry(db, found.id, &payload).await).await?
        else {
            return Ok(());
        };

        let locale = data.settings.locale;
        let mut message = format!(
            "✅ Added {} {} of '{}' (batch #{})",
            report::format_quantity(created.quantity),
            report::unit_label(found.unit, locale),
            found.name,
            created.id
        );
        if let Some(expiry) = created.expiry_date.as_deref() {
            write!(
                &mut message,
                ", expires {}",
                report::format_date_str(expiry, locale)
            )?;
        }
        message.push('.');

        ctx.say(message).await?;
        Ok(())
    }

    /// Uses one unit step from the batch that expires first.
    #[poise::command(slash_command, rename = "use")]
    pub async fn stock_use(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Product to use"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        product: String,
    ) -> Result<()> {
        let data = ctx.data();
        let db = &data.database;
        let locale = data.settings.locale;

        let Some(found) = user_facing(ctx, find_product(db, &product).await).await? else {
            return Ok(());
        };

        let Some(used) = stock_entry::use_one(db, found.id).await? else {
            ctx.say(format!("ℹ️ '{}' has no stock to use.", found.name))
                .await?;
            return Ok(());
        };

        let unit = report::unit_label(found.unit, locale);
        let message = if used.remaining > 0.0 {
            format!(
                "✅ Used {} {unit} of '{}' from batch #{} ({} {unit} left in it).",
                report::format_quantity(found.unit.step()),
                found.name,
                used.entry.id,
                report::format_quantity(used.remaining)
            )
        } else {
            format!(
                "✅ Used up batch #{} of '{}'.",
                used.entry.id, found.name
            )
        };

        ctx.say(message).await?;
        Ok(())
    }

    /// Sets a batch's quantity. Zero removes the batch.
    #[poise::command(slash_command, rename = "set")]
    pub async fn stock_set(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Batch number (see /stock list)"] entry_id: i64,
        #[description = "New quantity"] quantity: f64,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let Some(result) = user_facing(
            ctx,
            stock_entry::patch_stock_quantity(db, entry_id, quantity).await,
        )
        .await?
        else {
            return Ok(());
        };

        let message = match result {
            Some(entry) => format!(
                "✅ Batch #{} now holds {}.",
                entry.id,
                report::format_quantity(entry.quantity)
            ),
            None => format!("✅ Batch #{entry_id} is empty and was removed."),
        };
        ctx.say(message).await?;
        Ok(())
    }

    /// Removes a batch. The product's last removed batch can be restored with `/stock undo`.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn stock_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Batch number (see /stock list)"] entry_id: i64,
    ) -> Result<()> {
        let data = ctx.data();

        let Some(deleted) = user_facing(
            ctx,
            undo::delete_with_undo(&data.database, &data.undo, entry_id).await,
        )
        .await?
        else {
            return Ok(());
        };

        ctx.say(format!(
            "🗑️ Removed batch #{} ({}). Use `/stock undo` to restore it.",
            deleted.id,
            report::format_quantity(deleted.quantity)
        ))
        .await?;
        Ok(())
    }

    /// Restores the last removed batch of a product.
    #[poise::command(slash_command, rename = "undo")]
    pub async fn stock_undo(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Product whose last removed batch to restore"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        product: String,
    ) -> Result<()> {
        let data = ctx.data();
        let db = &data.database;

        let Some(found) = user_facing(ctx, find_product(db, &product).await).await? else {
            return Ok(());
        };

        // Undo always empties the slot
        let mut buffer = data.undo.lock().await.remove(&found.id).unwrap_or_default();
        let Some(restored) = user_facing(ctx, undo::undo_delete(db, &mut buffer).await).await?
        else {
            return Ok(());
        };
        ctx.say(format!(
            "↩️ Restored {} to '{}' as batch #{}.",
            report::format_quantity(restored.quantity),
            found.name,
            restored.id
        ))
        .await?;
        Ok(())
    }

    /// One line per batch, the first marked as the one to use next.
    fn batch_listing(
        product: &product::Model,
        ordered: &[stock_entry_entity::Model],
        settings: &Settings,
    ) -> Result<String> {
        let locale = settings.locale;
        let labels = Labels::for_locale(locale);
        let today = settings.today();
        let unit = report::unit_label(product.unit, locale);

        let mut text = String::new();
        for (index, entry) in ordered.iter().take(MAX_BATCHES).enumerate() {
            let status = classify(entry.expiry_date.as_deref(), today, settings.horizon_days);
            write!(
                &mut text,
                "{} #{} · {} {unit} · ",
                report::status_icon(status),
                entry.id,
                report::format_quantity(entry.quantity)
            )?;
            match (entry.expiry_date.as_deref(), status) {
                (Some(date), Some(status)) => write!(
                    &mut text,
                    "{} ({})",
                    report::format_date_str(date, locale),
                    report::status_label(status, locale)
                )?,
                (Some(date), None) => write!(&mut text, "{date}")?,
                (None, _) => write!(&mut text, "{}", labels.no_expiry)?,
            }
            for extra in [entry.sub_type.as_deref(), entry.location.as_deref()]
                .into_iter()
                .flatten()
            {
                write!(&mut text, " · {extra}")?;
            }
            if index == 0 {
                write!(&mut text, " ⬅️ **{}**", labels.consume_next)?;
            }
            text.push('\n');
        }
        if ordered.len() > MAX_BATCHES {
            write!(&mut text, "… +{}", ordered.len() - MAX_BATCHES)?;
        }
        Ok(text)
    }
}

// Re-export all commands
pub use inner::*;
