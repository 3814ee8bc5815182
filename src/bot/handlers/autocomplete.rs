//! Autocomplete handlers for Discord slash command parameters.
//!
//! This module provides autocomplete functionality for command parameters like
//! product names, categories and units, suggesting valid options as the user types.

use crate::{
    bot::BotData,
    core::product,
    entities::{Category, Unit},
    errors::Error,
};
use sea_orm::Iterable;

/// Discord's limit on autocomplete suggestions.
const MAX_SUGGESTIONS: usize = 25;

/// Provides autocomplete suggestions for product names.
///
/// This function queries the database for products that match the user's
/// partial input (case-insensitive) and returns up to 25 names, sorted
/// alphabetically.
pub async fn autocomplete_product_name(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let db = &ctx.data().database;

    let Ok(products) = product::get_products(db, None).await else {
        return Vec::new();
    };

    matching(products.into_iter().map(|p| p.name), partial)
}

/// Provides autocomplete suggestions for category wire names.
pub async fn autocomplete_category(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    matching(Category::iter().map(|c| c.as_str().to_string()), partial)
}

/// Provides autocomplete suggestions for unit wire names.
pub async fn autocomplete_unit(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    matching(Unit::iter().map(|u| u.as_str().to_string()), partial)
}

fn matching(names: impl Iterator<Item = String>, partial: &str) -> Vec<String> {
    let partial_lower = partial.to_lowercase();
    let mut matching: Vec<String> = names
        .filter(|name| name.to_lowercase().contains(&partial_lower))
        .take(MAX_SUGGESTIONS)
        .collect();

    // Sort alphabetically for consistent UX
    matching.sort();
    matching
}
