//! Binary entry point for the Chatwork bot.

use anyhow::Result;
use clap::{Parser, Subcommand};
use yuzubot::{run_bot, BotConfig};

#[derive(Parser)]
#[command(name = "yuzubot", about = "Chatwork bot: moderation, rankings, commands")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the webhook server
    Run {
        /// Listen port (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { port } => {
            let config = BotConfig::load(port)?;
            yuzubot_core::init_tracing(&config.log_file)?;
            run_bot(config).await
        }
    }
}
