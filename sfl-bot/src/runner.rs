//! Startup: config → tracing → market → handler chain → health endpoint → Telegram REPL.

use anyhow::{Context, Result};
use handler_chain::HandlerChain;
use rust_decimal::Decimal;
use sfl_core::init_tracing;
use sfl_market::{CachedMarket, SflWorldClient};
use sfl_telegram::{register_commands, run_repl, TelegramBotAdapter};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::config::BotConfig;
use crate::handlers::{CommandHandler, LoggingHandler};
use crate::health;

/// Command menu registered with Telegram at startup.
pub const BOT_COMMANDS: [(&str, &str); 7] = [
    ("start", "Show available commands and items"),
    ("help", "Detailed help"),
    ("usd", "Convert SFL to USD: /usd <amount>"),
    ("sfl", "Convert USD to SFL: /sfl <amount>"),
    ("status", "Show cache status"),
    ("oilcost", "Oil production cost: /oilcost [leather|wool]"),
    ("lavapit", "Lava Pit seasonal costs: /lavapit [leather|wool]"),
];

/// HTTP client plus TTL cache, shared by every handler.
pub fn build_market(config: &BotConfig) -> Result<Arc<CachedMarket>> {
    let client = SflWorldClient::new(config.market.clone()).context("Failed to build market client")?;
    Ok(Arc::new(CachedMarket::new(Arc::new(client), config.cache_ttl)))
}

/// Logging → command handler.
pub fn build_handler_chain(market: Arc<CachedMarket>, market_fee: Decimal) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(CommandHandler::new(market, market_fee)))
}

/// Runs until Ctrl-C stops the REPL; the health endpoint is stopped with it.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    if let Some(dir) = Path::new(&config.log_file).parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
        }
    }
    init_tracing(Some(config.log_file.as_str()))?;

    info!(
        health_port = config.health_port,
        cache_ttl_secs = config.cache_ttl.as_secs(),
        market_fee = %config.market_fee,
        prices_url = %config.market.prices_url,
        exchange_url = %config.market.exchange_url,
        "Initializing bot"
    );

    let market = build_market(&config)?;
    let handler_chain = build_handler_chain(market, config.market_fee);
    let bot = config.telegram.build_bot()?;

    let listener = health::bind(config.health_port).await?;
    let health_task = tokio::spawn(health::serve(listener));

    register_commands(&bot, &BOT_COMMANDS).await;

    info!("Bot started successfully");
    let replier = Arc::new(TelegramBotAdapter::new(bot.clone()));
    let result = run_repl(bot, handler_chain, replier).await;

    health_task.abort();
    info!("Bot stopped");
    result
}
