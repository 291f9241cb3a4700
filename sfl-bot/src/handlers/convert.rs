//! `/usd`, `/sfl` and `/<item> [amount]`.

use rust_decimal::Decimal;
use sfl_market::{
    sfl_to_usd, usd_to_sfl, validate_amount, CachedMarket, ExchangeRates, ItemQuote, UnitPrice,
};
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::messages;

pub struct Conversions {
    market: Arc<CachedMarket>,
    market_fee: Decimal,
}

impl Conversions {
    pub fn new(market: Arc<CachedMarket>, market_fee: Decimal) -> Self {
        Self { market, market_fee }
    }

    #[instrument(skip(self))]
    pub async fn sfl_to_usd(&self, amount: Option<Decimal>) -> String {
        let Some(amount) = amount else {
            return messages::USD_EXAMPLE.to_string();
        };
        if !validate_amount(amount) {
            return messages::min_amount();
        }
        let rate = match self.rate().await {
            Ok(rate) => rate,
            Err(reply) => return reply,
        };
        match sfl_to_usd(amount, rate) {
            Some(usd) => messages::usd_conversion(amount, usd, rate),
            None => messages::GENERIC_ERROR.to_string(),
        }
    }

    #[instrument(skip(self))]
    pub async fn usd_to_sfl(&self, amount: Option<Decimal>) -> String {
        let Some(amount) = amount else {
            return messages::SFL_EXAMPLE.to_string();
        };
        if !validate_amount(amount) {
            return messages::min_amount();
        }
        let rate = match self.rate().await {
            Ok(rate) => rate,
            Err(reply) => return reply,
        };
        match usd_to_sfl(amount, rate) {
            Some(sfl) => messages::sfl_conversion(amount, sfl, rate),
            None => messages::GENERIC_ERROR.to_string(),
        }
    }

    #[instrument(skip(self))]
    pub async fn item(&self, name: &str, amount: Option<Decimal>) -> String {
        let (prices, rates) = match self.market.snapshot().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!(error = %e, item = %name, "Failed to load market data");
                return messages::GENERIC_ERROR.to_string();
            }
        };

        let Some((item, price)) = prices.lookup(name) else {
            info!(item = %name, "Item not found");
            return messages::item_not_found(name);
        };
        let Some(rate) = positive_rate(&rates) else {
            return messages::INVALID_RATE.to_string();
        };

        match amount {
            Some(amount) => {
                if !validate_amount(amount) {
                    return messages::min_amount();
                }
                match ItemQuote::compute(amount, price, rate, self.market_fee) {
                    Some(quote) => messages::item_quote(item, &quote, self.market_fee),
                    None => messages::GENERIC_ERROR.to_string(),
                }
            }
            None => match UnitPrice::compute(price, rate) {
                Some(unit) => messages::unit_price(item, &unit),
                None => messages::GENERIC_ERROR.to_string(),
            },
        }
    }

    /// SFL→USD rate, or the reply to send instead.
    async fn rate(&self) -> std::result::Result<Decimal, String> {
        let rates = self.market.exchange_rates().await.map_err(|e| {
            error!(error = %e, "Failed to load exchange rates");
            messages::GENERIC_ERROR.to_string()
        })?;
        positive_rate(&rates).ok_or_else(|| messages::INVALID_RATE.to_string())
    }
}

fn positive_rate(rates: &ExchangeRates) -> Option<Decimal> {
    rates
        .sfl_usd()
        .filter(|r| r.is_sign_positive() && !r.is_zero())
}
