use async_trait::async_trait;
use rust_decimal::Decimal;
use sfl_core::{Handler, HandlerResponse, Message, Result};
use sfl_market::CachedMarket;
use std::sync::Arc;
use tracing::{debug, warn};

use super::{Conversions, ProductionCosts, StatusReport, Welcome};
use crate::command::Command;
use crate::messages;

/// Parses the message once and answers it. Text that is not a command ends the chain without a reply;
/// malformed input gets the parse error as its reply.
pub struct CommandHandler {
    welcome: Welcome,
    status: StatusReport,
    conversions: Conversions,
    production: ProductionCosts,
}

impl CommandHandler {
    pub fn new(market: Arc<CachedMarket>, market_fee: Decimal) -> Self {
        Self {
            welcome: Welcome::new(market.clone()),
            status: StatusReport::new(market.clone()),
            conversions: Conversions::new(market.clone(), market_fee),
            production: ProductionCosts::new(market),
        }
    }

    async fn reply(&self, command: Command) -> String {
        match command {
            Command::Start => self.welcome.reply().await,
            Command::Help => messages::HELP.to_string(),
            Command::Status => self.status.reply(),
            Command::Usd(amount) => self.conversions.sfl_to_usd(amount).await,
            Command::Sfl(amount) => self.conversions.usd_to_sfl(amount).await,
            Command::Item { name, amount } => self.conversions.item(&name, amount).await,
            Command::OilCost(resource) => self.production.report(resource, false).await,
            Command::LavaPit(resource) => self.production.report(resource, true).await,
        }
    }
}

#[async_trait]
impl Handler for CommandHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        match Command::parse(&message.content) {
            Ok(Some(command)) => {
                debug!(command = ?command, "step: command parsed");
                Ok(HandlerResponse::Reply(self.reply(command).await))
            }
            Ok(None) => {
                debug!(user_id = message.user.id, "Ignoring non-command text");
                Ok(HandlerResponse::Stop)
            }
            Err(e) => {
                warn!(user_id = message.user.id, error = ?e, "Rejected command input");
                Ok(HandlerResponse::Reply(e.reply()))
            }
        }
    }
}
