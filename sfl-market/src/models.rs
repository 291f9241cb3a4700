//! Price table and exchange rates as returned by the sfl.world API.
//!
//! Prices response: `{"data": {"p2p": {"Wood": 0.0012, "Merino Wool": 0.31, ...}}, ...}`.
//! Exchange response: `{"sfl": {"usd": 0.05, ...}, ...}`.

use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

use crate::error::MarketError;

/// Item prices in SFL, keyed by lowercased item name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceTable {
    prices: BTreeMap<String, Decimal>,
}

impl PriceTable {
    pub fn new<I, S>(prices: I) -> Self
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: AsRef<str>,
    {
        Self {
            prices: prices
                .into_iter()
                .map(|(name, price)| (name.as_ref().to_lowercase(), price))
                .collect(),
        }
    }

    /// Parses the `data.p2p` object of a prices response. Entries that are not numbers are skipped.
    pub fn from_response(body: &Value) -> Result<Self, MarketError> {
        let p2p = body
            .get("data")
            .and_then(|d| d.get("p2p"))
            .and_then(Value::as_object)
            .ok_or(MarketError::MissingField("data.p2p"))?;

        Ok(Self::new(
            p2p.iter()
                .filter_map(|(name, v)| decimal_from_json(v).map(|price| (name, price))),
        ))
    }

    /// Finds an item ignoring case and spaces; returns the stored name and its price.
    pub fn lookup(&self, name: &str) -> Option<(&str, Decimal)> {
        let wanted = normalize_name(name);
        self.prices
            .iter()
            .find(|(key, _)| normalize_name(key) == wanted)
            .map(|(key, price)| (key.as_str(), *price))
    }

    /// Item names in alphabetical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.prices.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

/// Nested currency → currency → rate map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExchangeRates {
    rates: HashMap<String, HashMap<String, Decimal>>,
}

impl ExchangeRates {
    pub fn new(rates: HashMap<String, HashMap<String, Decimal>>) -> Self {
        Self { rates }
    }

    /// Parses an exchange response. Top-level entries that are not objects and leaves that are not numbers are skipped.
    pub fn from_response(body: &Value) -> Result<Self, MarketError> {
        let root = body
            .as_object()
            .ok_or_else(|| MarketError::Decode("exchange response is not an object".to_string()))?;

        let rates = root
            .iter()
            .filter_map(|(currency, v)| {
                let inner = v.as_object()?;
                let targets = inner
                    .iter()
                    .filter_map(|(target, rate)| {
                        decimal_from_json(rate).map(|r| (target.clone(), r))
                    })
                    .collect();
                Some((currency.clone(), targets))
            })
            .collect();

        Ok(Self { rates })
    }

    pub fn rate(&self, from: &str, to: &str) -> Option<Decimal> {
        self.rates.get(from).and_then(|m| m.get(to)).copied()
    }

    /// USD value of one SFL.
    pub fn sfl_usd(&self) -> Option<Decimal> {
        self.rate("sfl", "usd")
    }
}

fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Converts a JSON number (or numeric string) through its shortest text form, so `0.1` stays exactly `0.1`.
pub(crate) fn decimal_from_json(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}
