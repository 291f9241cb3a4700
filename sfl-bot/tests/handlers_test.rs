//! Drives the full handler chain with fake market data and checks the reply texts.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use handler_chain::HandlerChain;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sfl_bot::build_handler_chain;
use sfl_core::{Chat, HandlerResponse, Message, User};
use sfl_market::{CachedMarket, ExchangeRates, MarketClient, MarketError, PriceTable};

struct StaticClient {
    rate: Decimal,
    down: AtomicBool,
    extra_prices: Vec<(&'static str, Decimal)>,
}

impl StaticClient {
    fn with_rate(rate: Decimal) -> Self {
        Self {
            rate,
            down: AtomicBool::new(false),
            extra_prices: Vec::new(),
        }
    }
}

#[async_trait]
impl MarketClient for StaticClient {
    async fn fetch_prices(&self) -> Result<PriceTable, MarketError> {
        if self.down.load(Ordering::SeqCst) {
            return Err(MarketError::Request("connection refused".to_string()));
        }
        let base = [
            ("Wood", dec!(0.01)),
            ("Iron", dec!(0.1)),
            ("Leather", dec!(0.2)),
            ("Wool", dec!(0.05)),
            ("Merino Wool", dec!(0.31)),
            ("Onion", dec!(0.001)),
        ];
        Ok(PriceTable::new(
            base.into_iter().chain(self.extra_prices.iter().copied()),
        ))
    }

    async fn fetch_exchange_rates(&self) -> Result<ExchangeRates, MarketError> {
        if self.down.load(Ordering::SeqCst) {
            return Err(MarketError::Request("connection refused".to_string()));
        }
        let mut sfl = HashMap::new();
        sfl.insert("usd".to_string(), self.rate);
        let mut rates = HashMap::new();
        rates.insert("sfl".to_string(), sfl);
        Ok(ExchangeRates::new(rates))
    }
}

fn chain_with(client: Arc<StaticClient>) -> HandlerChain {
    let market = Arc::new(CachedMarket::new(client, Duration::from_secs(300)));
    build_handler_chain(market, dec!(0.10))
}

fn message(content: &str) -> Message {
    Message {
        id: "1".to_string(),
        user: User {
            id: 1001,
            username: Some("bumpkin".to_string()),
            first_name: Some("Bumpkin".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: 1001,
            chat_type: "private".to_string(),
        },
        content: content.to_string(),
        created_at: chrono::Utc::now(),
    }
}

async fn reply(chain: &HandlerChain, text: &str) -> String {
    match chain.handle(&message(text)).await.unwrap() {
        HandlerResponse::Reply(text) => text,
        other => panic!("expected a reply for {:?}, got {:?}", text, other),
    }
}

#[tokio::test]
async fn test_usd_conversion() {
    let chain = chain_with(Arc::new(StaticClient::with_rate(dec!(0.05))));
    assert_eq!(
        reply(&chain, "/usd 10").await,
        "🌻 *10 SFL* ≈ *$0.5 USD*\n📊 Current rate: 1 SFL ≈ $0.05"
    );
}

#[tokio::test]
async fn test_sfl_conversion() {
    let chain = chain_with(Arc::new(StaticClient::with_rate(dec!(0.05))));
    assert_eq!(
        reply(&chain, "/sfl 1").await,
        "💵 *$1 USD* ≈ *20 SFL*\n📊 Current rate: 1 SFL ≈ $0.05"
    );
}

#[tokio::test]
async fn test_missing_amount_shows_example() {
    let chain = chain_with(Arc::new(StaticClient::with_rate(dec!(0.05))));
    assert_eq!(reply(&chain, "/usd").await, "ℹ️ Example: /usd 0.00012345");
    assert_eq!(reply(&chain, "/sfl").await, "ℹ️ Example: /sfl 1.2345");
}

#[tokio::test]
async fn test_amount_below_minimum() {
    let chain = chain_with(Arc::new(StaticClient::with_rate(dec!(0.05))));
    assert_eq!(
        reply(&chain, "/usd 0.000000001").await,
        "⚠️ Amount must be at least 0.00000001"
    );
    assert_eq!(
        reply(&chain, "/wood 0").await,
        "⚠️ Amount must be at least 0.00000001"
    );
}

#[tokio::test]
async fn test_item_quote_with_fee() {
    let chain = chain_with(Arc::new(StaticClient::with_rate(dec!(2))));
    assert_eq!(
        reply(&chain, "/wood 100").await,
        "🪙 *100 Wood* ≈ *1 SFL*\n💵 Gross value: ≈ *$2*\n📉 Commission (10%): ≈ *-$0.2*\n🤑 Net received: ≈ *$1.8*"
    );
}

#[tokio::test]
async fn test_item_unit_price_ignores_case_and_spaces() {
    let chain = chain_with(Arc::new(StaticClient::with_rate(dec!(0.05))));
    let expected = "📈 1 Merino wool ≈ *0.31 SFL* (≈ $0.0155 USD)";
    assert_eq!(reply(&chain, "/Merino Wool").await, expected);
    assert_eq!(reply(&chain, "/merinowool").await, expected);
}

#[tokio::test]
async fn test_unknown_item() {
    let chain = chain_with(Arc::new(StaticClient::with_rate(dec!(0.05))));
    assert_eq!(
        reply(&chain, "/golden_egg").await,
        "❌ Item 'golden\\_egg' not found"
    );
}

#[tokio::test]
async fn test_invalid_rate() {
    let chain = chain_with(Arc::new(StaticClient::with_rate(dec!(0))));
    assert_eq!(reply(&chain, "/usd 1").await, "❌ Invalid exchange rate");
    assert_eq!(reply(&chain, "/wood").await, "❌ Invalid exchange rate");
}

#[tokio::test]
async fn test_market_down_without_cache() {
    let client = Arc::new(StaticClient::with_rate(dec!(0.05)));
    client.down.store(true, Ordering::SeqCst);
    let chain = chain_with(client);

    assert_eq!(reply(&chain, "/wood 5").await, "❌ Error processing your request");
    assert_eq!(reply(&chain, "/usd 5").await, "❌ Error processing your request");
    assert_eq!(reply(&chain, "/start").await, "❌ Error showing available items");
}

#[tokio::test]
async fn test_input_errors() {
    let chain = chain_with(Arc::new(StaticClient::with_rate(dec!(0.05))));
    assert_eq!(reply(&chain, "/").await, "⚠️ Invalid format. Use /help");
    assert_eq!(reply(&chain, "/usd 1.2.3").await, "⚠️ Invalid amount format");
    assert_eq!(
        reply(&chain, &format!("/{}", "x".repeat(60))).await,
        "⚠️ Input too long. Please shorten your request."
    );
}

#[tokio::test]
async fn test_plain_text_gets_no_reply() {
    let chain = chain_with(Arc::new(StaticClient::with_rate(dec!(0.05))));
    let response = chain.handle(&message("hello bot")).await.unwrap();
    assert_eq!(response, HandlerResponse::Stop);
}

#[tokio::test]
async fn test_start_lists_items() {
    let chain = chain_with(Arc::new(StaticClient::with_rate(dec!(0.05))));
    let text = reply(&chain, "/start").await;
    assert!(text.contains("🌟 *SFL Conversion Bot* 🌟"));
    assert!(text.ends_with("iron, leather, merino wool, onion, wood, wool"));
}

#[tokio::test]
async fn test_help() {
    let chain = chain_with(Arc::new(StaticClient::with_rate(dec!(0.05))));
    assert!(reply(&chain, "/help").await.starts_with("🛠 *Complete Help*"));
}

#[tokio::test]
async fn test_status_reflects_cache() {
    let chain = chain_with(Arc::new(StaticClient::with_rate(dec!(0.05))));

    let before = reply(&chain, "/status").await;
    assert!(before.contains("📊 Prices cache:\nExpired (TTL: 0s)"));

    reply(&chain, "/wood").await;
    let after = reply(&chain, "/status").await;
    assert!(after.contains("📊 Prices cache:\nValid"));
    assert!(after.contains("💱 Exchange cache:\nValid"));
}

#[tokio::test]
async fn test_oil_cost() {
    let chain = chain_with(Arc::new(StaticClient::with_rate(dec!(0.05))));
    let text = reply(&chain, "/oilcost").await;
    assert!(text.contains("(Leather)"));
    assert!(text.contains("💰 Total: *9.3 Flower*"));
    assert!(text.contains("📈 1 oil ≈ *0.186 Flower*"));

    let wool = reply(&chain, "/oilcost wool").await;
    assert!(wool.contains("  • Wool x60: 3 Flower"));
}

#[tokio::test]
async fn test_lava_pit() {
    let chain = chain_with(Arc::new(StaticClient::with_rate(dec!(0.05))));
    let text = reply(&chain, "/lavapit").await;
    assert!(text.contains("*Winter*: 62.4 Flower"));
    assert!(text.contains("❌ turnip: Not found"));
    assert!(text.contains("  • Oil x100 (leather): 18.6 Flower (production cost)"));
}

#[tokio::test]
async fn test_unknown_drill_resource() {
    let chain = chain_with(Arc::new(StaticClient::with_rate(dec!(0.05))));
    assert_eq!(
        reply(&chain, "/oilcost silk").await,
        "⚠️ Unknown resource 'silk'. Use leather or wool"
    );
}

#[tokio::test]
async fn test_lava_pit_with_huge_price_still_replies() {
    let client = StaticClient {
        extra_prices: vec![("Rhubarb", Decimal::MAX / dec!(2))],
        ..StaticClient::with_rate(dec!(0.05))
    };
    let chain = chain_with(Arc::new(client));
    assert_eq!(
        reply(&chain, "/lavapit").await,
        "❌ Error processing your request"
    );
    assert!(reply(&chain, "/oilcost").await.contains("💰 Total: *9.3 Flower*"));
}
