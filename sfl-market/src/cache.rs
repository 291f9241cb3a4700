//! TTL cache in front of a [`MarketClient`].
//!
//! A fresh value is served without I/O. When a refresh fails and an older value exists, the older value is
//! served again and its expiry renewed for another TTL, so a flaky upstream is polled at most once per TTL.

use parking_lot::RwLock;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::client::MarketClient;
use crate::error::MarketError;
use crate::models::{ExchangeRates, PriceTable};

struct Entry<T> {
    value: Option<Arc<T>>,
    expires_at: Option<Instant>,
}

/// One cached dataset. `entry` is only locked for reads and writes, never across I/O;
/// `refresh` is held for the whole upstream fetch so concurrent misses share one request.
struct Slot<T> {
    entry: RwLock<Entry<T>>,
    refresh: Mutex<()>,
}

impl<T> Slot<T> {
    fn empty() -> Self {
        Self {
            entry: RwLock::new(Entry {
                value: None,
                expires_at: None,
            }),
            refresh: Mutex::new(()),
        }
    }

    fn fresh(&self, now: Instant) -> Option<Arc<T>> {
        let entry = self.entry.read();
        match (&entry.value, entry.expires_at) {
            (Some(value), Some(expires_at)) if now < expires_at => Some(value.clone()),
            _ => None,
        }
    }

    fn store(&self, value: Arc<T>, expires_at: Instant) {
        let mut entry = self.entry.write();
        entry.value = Some(value);
        entry.expires_at = Some(expires_at);
    }

    /// Renews the expiry of the current value and returns it, if there is one.
    fn renew_stale(&self, expires_at: Instant) -> Option<Arc<T>> {
        let mut entry = self.entry.write();
        let stale = entry.value.clone()?;
        entry.expires_at = Some(expires_at);
        Some(stale)
    }

    fn status(&self, now: Instant) -> SlotStatus {
        let entry = self.entry.read();
        let ttl_remaining = entry
            .expires_at
            .map(|e| e.saturating_duration_since(now))
            .unwrap_or_default();
        SlotStatus {
            valid: entry.value.is_some() && !ttl_remaining.is_zero(),
            ttl_remaining,
        }
    }
}

/// State of one cached response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotStatus {
    pub valid: bool,
    pub ttl_remaining: Duration,
}

impl SlotStatus {
    pub fn ttl_secs(&self) -> u64 {
        self.ttl_remaining.as_secs()
    }
}

/// Snapshot for the `/status` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStatus {
    pub prices: SlotStatus,
    pub exchange: SlotStatus,
}

/// Prices and exchange rates cached for `ttl`.
pub struct CachedMarket {
    client: Arc<dyn MarketClient>,
    ttl: Duration,
    prices: Slot<PriceTable>,
    exchange: Slot<ExchangeRates>,
}

impl CachedMarket {
    pub fn new(client: Arc<dyn MarketClient>, ttl: Duration) -> Self {
        Self {
            client,
            ttl,
            prices: Slot::empty(),
            exchange: Slot::empty(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn prices(&self) -> Result<Arc<PriceTable>, MarketError> {
        get_or_refresh(&self.prices, self.ttl, "prices", || self.client.fetch_prices()).await
    }

    pub async fn exchange_rates(&self) -> Result<Arc<ExchangeRates>, MarketError> {
        get_or_refresh(&self.exchange, self.ttl, "exchange", || {
            self.client.fetch_exchange_rates()
        })
        .await
    }

    /// Prices and exchange rates, refreshed concurrently.
    pub async fn snapshot(&self) -> Result<(Arc<PriceTable>, Arc<ExchangeRates>), MarketError> {
        tokio::try_join!(self.prices(), self.exchange_rates())
    }

    /// Never waits on an in-flight refresh.
    pub fn status(&self) -> CacheStatus {
        let now = Instant::now();
        CacheStatus {
            prices: self.prices.status(now),
            exchange: self.exchange.status(now),
        }
    }
}

async fn get_or_refresh<T, F, Fut>(
    slot: &Slot<T>,
    ttl: Duration,
    kind: &'static str,
    fetch: F,
) -> Result<Arc<T>, MarketError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, MarketError>>,
{
    if let Some(value) = slot.fresh(Instant::now()) {
        debug!(cache = kind, "Cache HIT");
        return Ok(value);
    }

    let _refresh = slot.refresh.lock().await;
    // Another task may have refreshed while we waited for the lock.
    if let Some(value) = slot.fresh(Instant::now()) {
        debug!(cache = kind, "Cache HIT after waiting for refresh");
        return Ok(value);
    }
    debug!(cache = kind, "Cache MISS");

    match fetch().await {
        Ok(value) => {
            let value = Arc::new(value);
            slot.store(value.clone(), Instant::now() + ttl);
            Ok(value)
        }
        Err(err) => match slot.renew_stale(Instant::now() + ttl) {
            Some(stale) => {
                warn!(cache = kind, error = %err, "Refresh failed, serving cached value");
                Ok(stale)
            }
            None => Err(err),
        },
    }
}
