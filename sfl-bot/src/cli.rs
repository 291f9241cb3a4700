//! Command-line interface: `sfl-bot run [--token T] [--port P]`.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::BotConfig;

#[derive(Parser, Debug)]
#[command(name = "sfl-bot")]
#[command(about = "Sunflower Land conversion bot for Telegram", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the bot and the /ping health endpoint (config from env; flags override).
    Run {
        /// Overrides BOT_TOKEN.
        #[arg(short, long)]
        token: Option<String>,
        /// Overrides HEALTH_PORT.
        #[arg(short, long)]
        port: Option<u16>,
    },
}

/// Loads [`BotConfig`] from env and applies CLI overrides.
pub fn load_config(token: Option<String>, port: Option<u16>) -> Result<BotConfig> {
    let mut config = BotConfig::load(token)?;
    if let Some(port) = port {
        config.health_port = port;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_with_overrides() {
        let cli = Cli::try_parse_from(["sfl-bot", "run", "--token", "abc", "--port", "9000"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Run {
                token: Some("abc".to_string()),
                port: Some(9000),
            }
        );
    }

    #[test]
    fn test_parse_run_defaults() {
        let cli = Cli::try_parse_from(["sfl-bot", "run"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Run {
                token: None,
                port: None,
            }
        );
    }

    #[test]
    fn test_missing_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["sfl-bot"]).is_err());
    }
}
