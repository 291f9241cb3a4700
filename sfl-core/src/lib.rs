//! # sfl-core
//!
//! Core types and traits for the SFL conversion bot: [`Bot`], [`Handler`], message and user types,
//! error enums and tracing initialization. Transport-agnostic; used by sfl-telegram, handler-chain and sfl-bot.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{Bot, ReplyFormat};
pub use error::{BotError, Result};
pub use logger::init_tracing;
pub use types::{Chat, Handler, HandlerResponse, Message, ToCoreMessage, ToCoreUser, User};
