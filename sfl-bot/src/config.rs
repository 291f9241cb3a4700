//! Bot configuration loaded from environment variables (and `.env`, loaded by the binary).
//!
//! | variable | default |
//! |---|---|
//! | `BOT_TOKEN` (or `TELEGRAM_BOT_TOKEN`) | required |
//! | `TELEGRAM_API_URL` / `TELOXIDE_API_URL` | Telegram default |
//! | `LOG_FILE` | `logs/sfl-bot.log` |
//! | `HEALTH_PORT` | `8000` |
//! | `CACHE_TTL` (seconds) | `300` |
//! | `MARKET_FEE` | `0.10` |
//! | `PRICES_API_URL`, `EXCHANGE_API_URL` | sfl.world endpoints |
//! | `REQUEST_TIMEOUT` (seconds) | `5.0` |
//! | `RETRY_BACKOFF_MS` | `1000` |

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use sfl_market::ClientConfig;
use sfl_telegram::TelegramConfig;
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_LOG_FILE: &str = "logs/sfl-bot.log";
pub const DEFAULT_HEALTH_PORT: u16 = 8000;
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;
pub const DEFAULT_MARKET_FEE: &str = "0.10";
const DEFAULT_REQUEST_TIMEOUT_SECS: f64 = 5.0;
const DEFAULT_RETRY_BACKOFF_MS: u64 = 1000;

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub telegram: TelegramConfig,
    pub log_file: String,
    pub health_port: u16,
    pub cache_ttl: Duration,
    /// Fraction of the gross USD value taken by the marketplace.
    pub market_fee: Decimal,
    pub market: ClientConfig,
}

impl BotConfig {
    /// Loads from env. `token` overrides BOT_TOKEN if provided. Call validate() before use.
    pub fn load(token: Option<String>) -> Result<Self> {
        let telegram = TelegramConfig::load(token)?;
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
        let health_port = env_parse("HEALTH_PORT", DEFAULT_HEALTH_PORT)?;
        let cache_ttl = Duration::from_secs(env_parse("CACHE_TTL", DEFAULT_CACHE_TTL_SECS)?);
        let market_fee = match env::var("MARKET_FEE") {
            Ok(raw) => Decimal::from_str(raw.trim())
                .with_context(|| format!("MARKET_FEE is not a decimal: {}", raw))?,
            Err(_) => Decimal::from_str(DEFAULT_MARKET_FEE)?,
        };

        let defaults = ClientConfig::default();
        let timeout_secs: f64 = env_parse("REQUEST_TIMEOUT", DEFAULT_REQUEST_TIMEOUT_SECS)?;
        let timeout = Duration::try_from_secs_f64(timeout_secs)
            .with_context(|| format!("REQUEST_TIMEOUT out of range: {}", timeout_secs))?;
        let market = ClientConfig {
            prices_url: env::var("PRICES_API_URL").unwrap_or(defaults.prices_url),
            exchange_url: env::var("EXCHANGE_API_URL").unwrap_or(defaults.exchange_url),
            timeout,
            max_attempts: defaults.max_attempts,
            backoff_base: Duration::from_millis(env_parse(
                "RETRY_BACKOFF_MS",
                DEFAULT_RETRY_BACKOFF_MS,
            )?),
        };

        Ok(Self {
            telegram,
            log_file,
            health_port,
            cache_ttl,
            market_fee,
            market,
        })
    }

    /// Fails fast on values that would only break at request time.
    pub fn validate(&self) -> Result<()> {
        self.telegram.validate()?;
        if self.market_fee.is_sign_negative() || self.market_fee >= Decimal::ONE {
            anyhow::bail!("MARKET_FEE must be in [0, 1): {}", self.market_fee);
        }
        for (name, url) in [
            ("PRICES_API_URL", &self.market.prices_url),
            ("EXCHANGE_API_URL", &self.market.exchange_url),
        ] {
            check_url(url).with_context(|| format!("{} is not a valid URL: {}", name, url))?;
        }
        if self.market.timeout.is_zero() {
            anyhow::bail!("REQUEST_TIMEOUT must be positive");
        }
        Ok(())
    }
}

fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {}: {}", key, raw)),
        Err(_) => Ok(default),
    }
}

fn check_url(url: &str) -> Result<()> {
    let parsed = axum::http::Uri::from_str(url)?;
    if parsed.scheme().is_none() || parsed.host().is_none() {
        anyhow::bail!("missing scheme or host");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serial_test::serial;

    const KEYS: [&str; 12] = [
        "BOT_TOKEN",
        "TELEGRAM_BOT_TOKEN",
        "TELEGRAM_API_URL",
        "TELOXIDE_API_URL",
        "LOG_FILE",
        "HEALTH_PORT",
        "CACHE_TTL",
        "MARKET_FEE",
        "PRICES_API_URL",
        "EXCHANGE_API_URL",
        "REQUEST_TIMEOUT",
        "RETRY_BACKOFF_MS",
    ];

    fn reset_env() {
        for key in KEYS {
            env::remove_var(key);
        }
        env::set_var("BOT_TOKEN", "test_token");
    }

    #[test]
    #[serial]
    fn test_load_config_with_defaults() {
        reset_env();

        let config = BotConfig::load(None).unwrap();

        assert_eq!(config.telegram.bot_token, "test_token");
        assert!(config.telegram.telegram_api_url.is_none());
        assert_eq!(config.log_file, "logs/sfl-bot.log");
        assert_eq!(config.health_port, 8000);
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
        assert_eq!(config.market_fee, dec!(0.10));
        assert_eq!(config.market.prices_url, "https://sfl.world/api/v1/prices");
        assert_eq!(config.market.exchange_url, "https://sfl.world/api/v1/exchange");
        assert_eq!(config.market.timeout, Duration::from_secs(5));
        assert_eq!(config.market.backoff_base, Duration::from_secs(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_load_config_with_custom_values() {
        reset_env();
        env::set_var("LOG_FILE", "/tmp/sfl.log");
        env::set_var("HEALTH_PORT", "9090");
        env::set_var("CACHE_TTL", "60");
        env::set_var("MARKET_FEE", "0.05");
        env::set_var("PRICES_API_URL", "http://localhost:1234/prices");
        env::set_var("REQUEST_TIMEOUT", "2.5");
        env::set_var("RETRY_BACKOFF_MS", "0");

        let config = BotConfig::load(None).unwrap();

        assert_eq!(config.log_file, "/tmp/sfl.log");
        assert_eq!(config.health_port, 9090);
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
        assert_eq!(config.market_fee, dec!(0.05));
        assert_eq!(config.market.prices_url, "http://localhost:1234/prices");
        assert_eq!(config.market.timeout, Duration::from_millis(2500));
        assert!(config.market.backoff_base.is_zero());
        assert!(config.validate().is_ok());
        reset_env();
    }

    #[test]
    #[serial]
    fn test_invalid_number_is_an_error() {
        reset_env();
        env::set_var("HEALTH_PORT", "eighty");

        let err = BotConfig::load(None).unwrap_err();
        assert!(err.to_string().contains("HEALTH_PORT"));
        reset_env();
    }

    #[test]
    #[serial]
    fn test_validate_rejects_fee_out_of_range() {
        reset_env();
        env::set_var("MARKET_FEE", "1.5");

        let config = BotConfig::load(None).unwrap();
        assert!(config.validate().is_err());
        reset_env();
    }

    #[test]
    #[serial]
    fn test_validate_rejects_bad_api_url() {
        reset_env();
        env::set_var("EXCHANGE_API_URL", "sfl.world/exchange");

        let config = BotConfig::load(None).unwrap();
        assert!(config.validate().is_err());
        reset_env();
    }
}
