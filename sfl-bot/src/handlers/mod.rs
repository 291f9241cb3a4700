//! Handlers that make up the bot's chain, in chain order: logging, then the command handler.
//! The command handler parses each message once and hands the parsed [`crate::Command`] to the
//! reply builders for start/status, currency and item conversion, and production costs.

mod convert;
mod dispatch;
mod logging;
mod production;
mod start;
mod status;

pub use convert::Conversions;
pub use dispatch::CommandHandler;
pub use logging::LoggingHandler;
pub use production::ProductionCosts;
pub use start::Welcome;
pub use status::StatusReport;
