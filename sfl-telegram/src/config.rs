//! Minimal Telegram config: token and optional Bot API URL.
//! Loaded from env: BOT_TOKEN (or TELEGRAM_BOT_TOKEN), TELEGRAM_API_URL (or TELOXIDE_API_URL).

use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub telegram_api_url: Option<String>,
}

impl TelegramConfig {
    /// Loads from env. `token` overrides BOT_TOKEN when given.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(t) => t,
            None => env::var("BOT_TOKEN")
                .or_else(|_| env::var("TELEGRAM_BOT_TOKEN"))
                .map_err(|_| anyhow::anyhow!("BOT_TOKEN not set. Configure BOT_TOKEN in .env"))?,
        };
        if bot_token.trim().is_empty() {
            anyhow::bail!("BOT_TOKEN is empty");
        }
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        Ok(Self {
            bot_token,
            telegram_api_url,
        })
    }

    /// Builds config with the given token and the default API URL.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            telegram_api_url: None,
        }
    }

    /// Fails if TELEGRAM_API_URL is set but not a valid URL.
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url_str) = self.telegram_api_url {
            reqwest::Url::parse(url_str).with_context(|| {
                format!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                )
            })?;
        }
        Ok(())
    }

    /// Creates the teloxide Bot, pointed at the custom API URL when configured.
    pub fn build_bot(&self) -> Result<teloxide::Bot> {
        let bot = teloxide::Bot::new(self.bot_token.clone());
        match self.telegram_api_url {
            Some(ref url_str) => {
                let url = reqwest::Url::parse(url_str)
                    .with_context(|| format!("Invalid TELEGRAM_API_URL: {}", url_str))?;
                Ok(bot.set_api_url(url))
            }
            None => Ok(bot),
        }
    }
}
