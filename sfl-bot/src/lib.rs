//! # SFL conversion bot
//!
//! Wires the market cache, handler chain and Telegram runner, and serves the `/ping` health endpoint.
//! Config comes from env / `.env`; the binary is a thin clap wrapper around [`run_bot`].

pub mod cli;
pub mod command;
pub mod config;
pub mod handlers;
pub mod health;
pub mod messages;
pub mod runner;

pub use cli::{load_config, Cli, Commands};
pub use command::{Command, CommandError, MAX_INPUT_LENGTH};
pub use config::BotConfig;
pub use runner::{build_handler_chain, build_market, run_bot, BOT_COMMANDS};
