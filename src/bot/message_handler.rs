//! Message Handler module for processing incoming Telegram messages

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::InputFile;
use tracing::{debug, error, info, warn};

use crate::config::BotConfig;
use crate::extractor::ListingExtractor;
use crate::localization::LocalizationManager;

use super::ui_builder::{format_error_reply, format_listing_reply, plan_photos, PhotoPlan};

/// What an incoming text message asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncomingMessage<'a> {
    Start,
    Help,
    /// Any other `/command`; left unanswered
    OtherCommand,
    Link(&'a str),
    NotALink,
}

/// Classify message text without touching the network
///
/// # Examples
///
/// ```rust
/// use encar_bot::bot::{classify_message, IncomingMessage};
///
/// assert_eq!(classify_message("/start"), IncomingMessage::Start);
/// assert_eq!(
///     classify_message("  https://fem.encar.com/cars/detail/1  "),
///     IncomingMessage::Link("https://fem.encar.com/cars/detail/1")
/// );
/// assert_eq!(classify_message("hello"), IncomingMessage::NotALink);
/// ```
pub fn classify_message(text: &str) -> IncomingMessage<'_> {
    let text = text.trim();

    if let Some(command_text) = text.strip_prefix('/') {
        let command = command_text
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .split('@')
            .next()
            .unwrap_or_default();
        return match command {
            "start" => IncomingMessage::Start,
            "help" => IncomingMessage::Help,
            _ => IncomingMessage::OtherCommand,
        };
    }

    if text.starts_with("http") {
        IncomingMessage::Link(text)
    } else {
        IncomingMessage::NotALink
    }
}

async fn send_photos(bot: &Bot, chat_id: ChatId, plan: &PhotoPlan) -> Result<()> {
    match plan {
        PhotoPlan::Nothing => {}
        PhotoPlan::Single(url) => {
            bot.send_photo(chat_id, InputFile::url(url.clone())).await?;
        }
        PhotoPlan::Album(_) => {
            bot.send_media_group(chat_id, plan.album_media()).await?;
        }
    }
    Ok(())
}

async fn handle_listing_link(
    bot: &Bot,
    chat_id: ChatId,
    url: &str,
    extractor: &ListingExtractor,
    config: &BotConfig,
    localization: &LocalizationManager,
) -> Result<()> {
    info!(user_id = %chat_id, url = %url, "Processing listing link");

    let record = match extractor.extract(url).await {
        Ok(record) => record,
        Err(e) => {
            error!(user_id = %chat_id, url = %url, error = %e, "Listing extraction failed");
            bot.send_message(chat_id, format_error_reply(&e, localization, &config.language))
                .await?;
            return Ok(());
        }
    };

    let reply = format_listing_reply(&record, localization, &config.language);
    bot.send_message(chat_id, reply).await?;

    let plan = plan_photos(&record.images, config.max_photos);
    if plan.is_empty() {
        debug!(user_id = %chat_id, "No photos to send");
        return Ok(());
    }

    // The text reply is already out; a failed photo upload only gets logged.
    match send_photos(bot, chat_id, &plan).await {
        Ok(()) => info!(user_id = %chat_id, photos = plan.len(), "Listing photos sent"),
        Err(e) => warn!(user_id = %chat_id, photos = plan.len(), error = %e, "Failed to send listing photos"),
    }

    Ok(())
}

async fn handle_text_message(
    bot: &Bot,
    msg: &Message,
    text: &str,
    extractor: &ListingExtractor,
    config: &BotConfig,
    localization: &LocalizationManager,
) -> Result<()> {
    debug!(user_id = %msg.chat.id, message_length = text.len(), "Received text message from user");
    let language = config.language.as_str();

    match classify_message(text) {
        IncomingMessage::Start => {
            bot.send_message(msg.chat.id, localization.message("start-greeting", language))
                .await?;
        }
        IncomingMessage::Help => {
            bot.send_message(msg.chat.id, localization.message("help-text", language))
                .await?;
        }
        IncomingMessage::OtherCommand => {
            debug!(user_id = %msg.chat.id, "Ignoring unknown command");
        }
        IncomingMessage::NotALink => {
            bot.send_message(msg.chat.id, localization.message("not-a-link", language))
                .await?;
        }
        IncomingMessage::Link(url) => {
            handle_listing_link(bot, msg.chat.id, url, extractor, config, localization).await?;
        }
    }

    Ok(())
}

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    extractor: Arc<ListingExtractor>,
    config: Arc<BotConfig>,
    localization: Arc<LocalizationManager>,
) -> Result<()> {
    if let Some(text) = msg.text() {
        handle_text_message(&bot, &msg, text, &extractor, &config, &localization).await?;
    } else {
        debug!(user_id = %msg.chat.id, "Ignoring non-text message");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands() {
        assert_eq!(classify_message("/start"), IncomingMessage::Start);
        assert_eq!(classify_message("/start@EncarBot"), IncomingMessage::Start);
        assert_eq!(classify_message("/help"), IncomingMessage::Help);
        assert_eq!(classify_message("/settings"), IncomingMessage::OtherCommand);
        assert_eq!(classify_message("/"), IncomingMessage::OtherCommand);
    }

    #[test]
    fn test_links_are_trimmed() {
        assert_eq!(
            classify_message("\n https://m.encar.com/1 \n"),
            IncomingMessage::Link("https://m.encar.com/1")
        );
        assert_eq!(
            classify_message("http://m.encar.com/1"),
            IncomingMessage::Link("http://m.encar.com/1")
        );
    }

    #[test]
    fn test_not_a_link() {
        assert_eq!(classify_message("m.encar.com/1"), IncomingMessage::NotALink);
        assert_eq!(classify_message("привет"), IncomingMessage::NotALink);
        assert_eq!(classify_message(""), IncomingMessage::NotALink);
    }
}
