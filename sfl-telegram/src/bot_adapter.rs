//! Wraps teloxide::Bot and implements [`sfl_core::Bot`]. Production code sends messages via Telegram; tests substitute another Bot impl.

use async_trait::async_trait;
use sfl_core::{Bot as CoreBot, BotError, Chat, ReplyFormat, Result};
use teloxide::{
    prelude::*,
    types::{ChatId, LinkPreviewOptions, ParseMode},
};
use tracing::warn;

/// Thin wrapper around teloxide::Bot that implements sfl-core's Bot trait.
/// Link previews are always disabled.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    async fn send(&self, chat: &Chat, text: &str, format: ReplyFormat) -> Result<()> {
        let request = self
            .bot
            .send_message(ChatId(chat.id), text.to_string())
            .link_preview_options(no_preview());
        let request = match format {
            ReplyFormat::Markdown => request.parse_mode(ParseMode::Markdown),
            ReplyFormat::Plain => request,
        };
        request
            .await
            .map_err(|e| BotError::Bot(e.to_string()))?;
        Ok(())
    }
}

fn no_preview() -> LinkPreviewOptions {
    LinkPreviewOptions {
        is_disabled: true,
        url: None,
        prefer_small_media: false,
        prefer_large_media: false,
        show_above_text: false,
    }
}

/// Drops legacy Markdown markup so the plain-text fallback reads cleanly. Escaped characters are kept literally.
fn strip_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(next @ ('_' | '*' | '`' | '[')) => out.push(next),
                Some(next) => {
                    out.push(c);
                    out.push(next);
                }
                None => out.push(c),
            },
            '*' | '_' | '`' => {}
            _ => out.push(c),
        }
    }
    out
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str, format: ReplyFormat) -> Result<()> {
        match self.send(chat, text, format).await {
            Err(e) if format == ReplyFormat::Markdown => {
                // Telegram rejects unbalanced entities; fall back to plain text once.
                warn!(chat_id = chat.id, error = %e, "Markdown send failed, retrying as plain text");
                self.send(chat, &strip_markdown(text), ReplyFormat::Plain).await
            }
            other => other,
        }
    }
}
