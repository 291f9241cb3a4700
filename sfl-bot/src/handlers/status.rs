use sfl_market::CachedMarket;
use std::sync::Arc;

use crate::messages;

/// `/status`: validity and remaining TTL of both caches. Never triggers a fetch.
pub struct StatusReport {
    market: Arc<CachedMarket>,
}

impl StatusReport {
    pub fn new(market: Arc<CachedMarket>) -> Self {
        Self { market }
    }

    pub fn reply(&self) -> String {
        messages::status(&self.market.status())
    }
}
