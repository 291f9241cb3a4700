//! Parses message text into a [`Command`].
//!
//! Grammar: `/<name>[ <amount>]`, where the amount is the last whitespace-separated token when it is
//! 1-20 characters of digits and dots. Everything else after the slash is the name, so item names may
//! contain spaces (`/merino wool 5`).

use rust_decimal::Decimal;
use sfl_market::DrillResource;
use std::str::FromStr;
use thiserror::Error;

use crate::messages::escape_markdown;

/// Longer input (after trimming, in characters) is rejected before parsing.
pub const MAX_INPUT_LENGTH: usize = 50;
const MAX_AMOUNT_LENGTH: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Status,
    /// SFL → USD.
    Usd(Option<Decimal>),
    /// USD → SFL.
    Sfl(Option<Decimal>),
    OilCost(DrillResource),
    LavaPit(DrillResource),
    Item {
        name: String,
        amount: Option<Decimal>,
    },
}

/// Input rejected before reaching the market. Display is the reply sent to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("⚠️ Input too long. Please shorten your request.")]
    TooLong,
    #[error("⚠️ Invalid format. Use /help")]
    InvalidFormat,
    #[error("⚠️ Invalid amount format")]
    InvalidAmount(String),
    #[error("⚠️ Unknown resource '{}'. Use leather or wool", escape_markdown(.0))]
    UnknownResource(String),
}

impl CommandError {
    pub fn reply(&self) -> String {
        self.to_string()
    }
}

impl Command {
    /// `Ok(None)` for text that is not a command.
    pub fn parse(text: &str) -> Result<Option<Command>, CommandError> {
        let text = text.trim();
        if text.chars().count() > MAX_INPUT_LENGTH {
            return Err(CommandError::TooLong);
        }
        let Some(body) = text.strip_prefix('/') else {
            return Ok(None);
        };
        if body.is_empty() || body.starts_with(char::is_whitespace) || body.contains('\n') {
            return Err(CommandError::InvalidFormat);
        }

        let (name, amount) = split_amount(body);
        let amount = amount.map(parse_amount).transpose()?;

        let mut words = name.split_whitespace();
        let Some(first) = words.next() else {
            return Err(CommandError::InvalidFormat);
        };
        // "/start@my_bot" in group chats.
        let first = first.split('@').next().unwrap_or(first);
        let rest: Vec<&str> = words.collect();

        let command = match first.to_lowercase().as_str() {
            "start" => Command::Start,
            "help" => Command::Help,
            "status" => Command::Status,
            "usd" if rest.is_empty() => Command::Usd(amount),
            "sfl" if rest.is_empty() => Command::Sfl(amount),
            "oilcost" => Command::OilCost(drill_resource(&rest, amount)?),
            "lavapit" => Command::LavaPit(drill_resource(&rest, amount)?),
            _ => {
                if first.is_empty() {
                    return Err(CommandError::InvalidFormat);
                }
                let name = std::iter::once(first)
                    .chain(rest.iter().copied())
                    .collect::<Vec<_>>()
                    .join(" ");
                Command::Item { name, amount }
            }
        };
        Ok(Some(command))
    }
}

/// Splits off a trailing amount token, if there is one and something precedes it.
fn split_amount(body: &str) -> (&str, Option<&str>) {
    if let Some(idx) = body.rfind(char::is_whitespace) {
        let (head, tail) = (body[..idx].trim_end(), body[idx..].trim_start());
        let is_amount = !tail.is_empty()
            && tail.chars().count() <= MAX_AMOUNT_LENGTH
            && tail.chars().all(|c| c.is_ascii_digit() || c == '.');
        if is_amount && !head.is_empty() {
            return (head, Some(tail));
        }
    }
    (body, None)
}

/// Accepts "5", "0.5", ".5" and "5."; rejects "." and "1.2.3".
fn parse_amount(raw: &str) -> Result<Decimal, CommandError> {
    let invalid = || CommandError::InvalidAmount(raw.to_string());
    if !raw.chars().any(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    let mut normalized = raw.strip_suffix('.').unwrap_or(raw).to_string();
    if normalized.starts_with('.') {
        normalized.insert(0, '0');
    }
    Decimal::from_str(&normalized).map_err(|_| invalid())
}

fn drill_resource(rest: &[&str], amount: Option<Decimal>) -> Result<DrillResource, CommandError> {
    if amount.is_some() {
        return Err(CommandError::InvalidFormat);
    }
    match rest {
        [] => Ok(DrillResource::default()),
        [word] => word
            .parse()
            .map_err(|_| CommandError::UnknownResource(word.to_string())),
        _ => Err(CommandError::UnknownResource(rest.join(" "))),
    }
}
