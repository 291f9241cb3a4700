//! # sfl-telegram
//!
//! Telegram layer: adapters from teloxide types, [`sfl_core::Bot`] implementation, minimal config,
//! command-menu registration and the REPL runner that feeds the handler chain.
//! No market or conversion logic lives here.

mod adapters;
mod bot_adapter;
mod config;
mod runner;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use config::TelegramConfig;
pub use runner::{process_message, register_commands, run_repl, INTERNAL_ERROR_REPLY};
