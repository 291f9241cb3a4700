use sfl_market::CachedMarket;
use std::sync::Arc;
use tracing::{error, instrument};

use crate::messages;

/// `/start`: welcome text with the list of known items.
pub struct Welcome {
    market: Arc<CachedMarket>,
}

impl Welcome {
    pub fn new(market: Arc<CachedMarket>) -> Self {
        Self { market }
    }

    #[instrument(skip(self))]
    pub async fn reply(&self) -> String {
        match self.market.prices().await {
            Ok(prices) => messages::welcome(prices.names()),
            Err(e) => {
                error!(error = %e, "Failed to load prices for /start");
                messages::START_ERROR.to_string()
            }
        }
    }
}
