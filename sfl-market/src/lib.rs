//! # sfl-market
//!
//! Market data for Sunflower Land: item prices (in SFL) and SFL exchange rates fetched from
//! sfl.world, cached in memory with a TTL, plus the pure conversion and production-cost math
//! the bot replies are built from.

pub mod cache;
pub mod client;
pub mod convert;
pub mod error;
pub mod format;
pub mod models;
pub mod production;

pub use cache::{CacheStatus, CachedMarket, SlotStatus};
pub use client::{ClientConfig, MarketClient, SflWorldClient, EXCHANGE_API_URL, PRICES_API_URL};
pub use convert::{sfl_to_usd, usd_to_sfl, validate_amount, ItemQuote, UnitPrice, MIN_AMOUNT};
pub use error::MarketError;
pub use format::format_decimal;
pub use models::{ExchangeRates, PriceTable};
pub use production::{
    lava_pit_costs, oil_cost, DrillResource, LineItem, OilCost, Season, SeasonCost,
};
