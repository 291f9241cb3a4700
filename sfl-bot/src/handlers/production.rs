//! `/oilcost` and `/lavapit`.

use sfl_market::{lava_pit_costs, oil_cost, CachedMarket, DrillResource, MarketError};
use std::sync::Arc;
use tracing::{error, instrument, warn};

use crate::messages;

pub struct ProductionCosts {
    market: Arc<CachedMarket>,
}

impl ProductionCosts {
    pub fn new(market: Arc<CachedMarket>) -> Self {
        Self { market }
    }

    #[instrument(skip(self))]
    pub async fn report(&self, resource: DrillResource, lava_pit: bool) -> String {
        let prices = match self.market.prices().await {
            Ok(prices) => prices,
            Err(e) => {
                error!(error = %e, "Failed to load prices");
                return messages::GENERIC_ERROR.to_string();
            }
        };

        let oil = match oil_cost(&prices, resource) {
            Ok(cost) => cost,
            Err(MarketError::MissingPrices) => {
                warn!(resource = %resource, "Oil inputs missing from price table");
                return messages::PRODUCTION_ERROR.to_string();
            }
            Err(e) => {
                error!(error = %e, "Oil cost failed");
                return messages::GENERIC_ERROR.to_string();
            }
        };

        if !lava_pit {
            return messages::oil_cost(&oil);
        }
        match lava_pit_costs(&prices, oil.unit_price) {
            Ok(seasons) => messages::lava_pit(&seasons, resource),
            Err(e) => {
                error!(error = %e, "Lava Pit cost failed");
                messages::GENERIC_ERROR.to_string()
            }
        }
    }
}
