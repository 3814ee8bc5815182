//! Product Discord commands - `/product add|list|update|delete`.
//!
//! Categories and units are entered as their wire names (e.g. `DRY_GOODS`,
//! `LITERS`) with autocomplete; validation happens in the core.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, find_product, handlers::autocomplete, user_facing},
        core::{
            product::{self, ProductPayload},
            report,
        },
        entities::{Category, Unit},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Discord's limit on fields per embed.
    const MAX_FIELDS: usize = 25;

    /// Parent command for managing the supplies you want to keep on hand.
    #[poise::command(
        slash_command,
        subcommands("product_add", "product_list", "product_update", "product_delete")
    )]
    pub async fn product(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Product management command. Available subcommands:\n\
            `/product add` - Add a new product\n\
            `/product list` - List all products\n\
            `/product update` - Edit a product\n\
            `/product delete` - Delete a product and its stock";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Adds a new product with no stock.
    #[poise::command(slash_command, rename = "add")]
    pub async fn product_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Name of the product (e.g., 'Canned beans')"] name: String,
        #[description = "Category (e.g., WATER, DRY_GOODS)"]
        #[autocomplete = "autocomplete::autocomplete_category"]
        category: String,
        #[description = "Unit of measure (e.g., LITERS, CANS)"]
        #[autocomplete = "autocomplete::autocomplete_unit"]
        unit: String,
        #[description = "How much you want to keep on hand"] target: f64,
        #[description = "Optional notes"] notes: Option<String>,
    ) -> Result<()> {
        let Some((category, unit)) = parse_kind(ctx, Some(&category), Some(&unit)).await? else {
            return Ok(());
        };
        let (Some(category), Some(unit)) = (category, unit) else {
            return Ok(());
        };
        let db = &ctx.data().database;

        let payload = ProductPayload {
            name,
            category,
            unit,
            target_quantity: target,
            notes,
        };
        let Some(created) = user_facing(ctx, product::create_product(db, &payload).await).await?
        else {
            return Ok(());
        };

        let locale = ctx.data().settings.locale;
        ctx.say(format!(
            "✅ Product '{}' added ({}, target {} {}).",
            created.name,
            report::category_label(created.category, locale),
            report::format_quantity(created.target_quantity),
            report::unit_label(created.unit, locale)
        ))
        .await?;
        Ok(())
    }

    /// Lists products with their stock progress, optionally for one category.
    #[poise::command(slash_command, rename = "list")]
    pub async fn product_list(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Only show this category"]
        #[autocomplete = "autocomplete::autocomplete_category"]
        category: Option<String>,
    ) -> Result<()> {
        let Some((category, _)) = parse_kind(ctx, category.as_deref(), None).await? else {
            return Ok(());
        };
        let db = &ctx.data().database;
        let locale = ctx.data().settings.locale;

        let products = product::get_products(db, category).await?;
        if products.is_empty() {
            ctx.say("No products found. Use `/product add` to create some!")
                .await?;
            return Ok(());
        }

        let embed_fields: Vec<(String, String, bool)> = products
            .iter()
            .take(MAX_FIELDS)
            .map(|p| {
                let name = format!("{} ({})", p.name, report::category_label(p.category, locale));
                (name, report::format_product_line(p, locale), false)
            })
            .collect();

        let mut list_embed = serenity::CreateEmbed::default()
            .title("**Product List**")
            .color(0x0058_65F2) // Discord purple
            .fields(embed_fields);
        if products.len() > MAX_FIELDS {
            list_embed = list_embed.footer(serenity::CreateEmbedFooter::new(format!(
                "Showing {MAX_FIELDS} of {} products",
                products.len()
            )));
        }

        ctx.send(poise::CreateReply::default().embed(list_embed))
            .await?;
        Ok(())
    }

    /// Edits a product. Fields that are left out keep their current value.
    #[poise::command(slash_command, rename = "update")]
    pub async fn product_update(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Name of the product to update"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        name: String,
        #[description = "New name"] new_name: Option<String>,
        #[description = "New category"]
        #[autocomplete = "autocomplete::autocomplete_category"]
        category: Option<String>,
        #[description = "New unit"]
        #[autocomplete = "autocomplete::autocomplete_unit"]
        unit: Option<String>,
        #[description = "New target quantity"] target: Option<f64>,
        #[description = "New notes (blank clears them)"] notes: Option<String>,
    ) -> Result<()> {
        let Some((category, unit)) =
            parse_kind(ctx, category.as_deref(), unit.as_deref()).await?
        else {
            return Ok(());
        };
        let db = &ctx.data().database;

        let Some(existing) = user_facing(ctx, find_product(db, &name).await).await? else {
            return Ok(());
        };

        let payload = ProductPayload {
            name: new_name.unwrap_or_else(|| existing.name.clone()),
            category: category.unwrap_or(existing.category),
            unit: unit.unwrap_or(existing.unit),
            target_quantity: target.unwrap_or(existing.target_quantity),
            notes: notes.or_else(|| existing.notes.clone()),
        };
        let Some(updated) =
            user_facing(ctx, product::update_product(db, existing.id, &payload).await).await?
        else {
            return Ok(());
        };

        ctx.say(format!("✅ Product '{}' updated.", updated.name))
            .await?;
        Ok(())
    }

    /// Deletes a product together with all of its stock.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn product_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Name of the product to delete"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        name: String,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let Some(existing) = user_facing(ctx, find_product(db, &name).await).await? else {
            return Ok(());
        };
        product::delete_product(db, existing.id).await?;
        ctx.data().undo.lock().await.remove(&existing.id);

        ctx.say(format!("✅ Product '{}' has been deleted.", existing.name))
            .await?;
        Ok(())
    }

    /// Parses optional category and unit names, replying if either is unknown.
    ///
    /// Returns `None` when a reply was sent and the command should stop.
    async fn parse_kind(
        ctx: poise::Context<'_, BotData, Error>,
        category: Option<&str>,
        unit: Option<&str>,
    ) -> Result<Option<(Option<Category>, Option<Unit>)>> {
        let parsed_category = match category {
            None => None,
            Some(raw) => {
                let Some(parsed) = Category::parse(raw) else {
                    ctx.say(format!("❌ Unknown category '{raw}'.")).await?;
                    return Ok(None);
                };
                Some(parsed)
            }
        };
        let parsed_unit = match unit {
            None => None,
            Some(raw) => {
                let Some(parsed) = Unit::parse(raw) else {
                    ctx.say(format!("❌ Unknown unit '{raw}'.")).await?;
                    return Ok(None);
                };
                Some(parsed)
            }
        };
        Ok(Some((parsed_category, parsed_unit)))
    }
}

// Re-export all commands
pub use inner::*;
