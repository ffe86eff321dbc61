//! Dispatcher setup: shared dependencies and the long-polling loop

use anyhow::{Context, Result};
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{info, warn};

use crate::config::BotConfig;
use crate::extractor::ListingExtractor;
use crate::localization::LocalizationManager;

use super::message_handler::message_handler;

/// Run the bot until Ctrl-C
///
/// The token comes from `config`; nothing is read from the environment here.
pub async fn run(config: BotConfig) -> Result<()> {
    let localization = LocalizationManager::new().context("Failed to load localization resources")?;
    if !localization.is_supported(&config.language) {
        warn!(language = %config.language, "Unsupported reply language, falling back to Russian");
    }

    let extractor = ListingExtractor::new(config.extractor.clone())
        .context("Failed to build listing extractor")?;

    let bot = Bot::new(config.telegram_token.clone());

    info!(config = ?config, "Bot initialized, starting dispatcher");

    let handler = dptree::entry().branch(Update::filter_message().endpoint(message_handler));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![
            Arc::new(extractor),
            Arc::new(config),
            Arc::new(localization)
        ])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
