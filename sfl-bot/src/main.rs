//! Binary for the SFL conversion bot.

use anyhow::Result;
use clap::Parser;
use sfl_bot::{load_config, run_bot, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token, port } => {
            let config = load_config(token, port)?;
            run_bot(config).await
        }
    }
}
