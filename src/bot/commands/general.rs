//! General Discord commands - ping and help.
//! This module contains simple commands that don't require database operations.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**PrepBuddy Help**\n\
        Track your emergency supplies and how prepared your household is.\n\n\
        **Overview**\n\
        • `/dashboard` - Readiness, at-risk products, closest expiry and star rating.\n\
        • `/expiring [days]` - Expired batches and batches expiring soon.\n\n\
        **Products**\n\
        • `/product add <name> <category> <unit> <target> [notes]` - Adds a product.\n\
        • `/product list [category]` - Lists products with stock progress.\n\
        • `/product update <name> [new_name] [category] [unit] [target] [notes]` - Edits a product.\n\
        • `/product delete <name>` - Deletes a product and all of its stock.\n\n\
        **Stock**\n\
        • `/stock list <product>` - Batches in the order they should be used.\n\
        • `/stock add <product> <quantity> [expiry] [purchased] [location] [sub_type]` - Adds a batch.\n\
        • `/stock use <product>` - Uses one unit from the batch that expires first.\n\
        • `/stock set <entry_id> <quantity>` - Sets a batch quantity (0 removes it).\n\
        • `/stock delete <entry_id>` - Removes a batch.\n\
        • `/stock undo <product>` - Restores the last removed batch of a product.\n\n\
        **Utility**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.\n\n\
        Dates use the `YYYY-MM-DD` format.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
