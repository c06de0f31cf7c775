//! Bot configuration. Environment variables only; no config files.

use std::env;

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct BotConfig {
    /// CHATWORK_API_TOKEN
    pub chatwork_api_token: String,
    /// BOT_ACCOUNT_ID — the bot's own Chatwork account; its messages are
    /// ignored to avoid feedback loops.
    pub bot_account_id: i64,
    /// GEMINI_API_KEY; absent disables the /ai command.
    pub gemini_api_key: Option<String>,
    /// DATABASE_URL (SQLite)
    pub database_url: String,
    /// Listen port
    pub port: u16,
    /// Log file path
    pub log_file: String,
    /// EXCLUDED_ROOM_IDS — rooms left out of the leaderboards (CSV)
    pub excluded_room_ids: Vec<i64>,
}

impl BotConfig {
    /// Load from environment variables. `port` overrides PORT if provided.
    pub fn load(port: Option<u16>) -> Result<Self> {
        let chatwork_api_token =
            env::var("CHATWORK_API_TOKEN").context("CHATWORK_API_TOKEN not set")?;
        let bot_account_id = env::var("BOT_ACCOUNT_ID")
            .context("BOT_ACCOUNT_ID not set")?
            .parse()
            .context("BOT_ACCOUNT_ID must be a numeric account id")?;
        let gemini_api_key = env::var("GEMINI_API_KEY").ok();
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:yuzubot.db".to_string());
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "yuzubot.log".to_string());
        let port = match port {
            Some(p) => p,
            None => env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3000),
        };
        let excluded_room_ids = env::var("EXCLUDED_ROOM_IDS")
            .ok()
            .map(|s| parse_id_list(&s))
            .unwrap_or_default();

        Ok(Self {
            chatwork_api_token,
            bot_account_id,
            gemini_api_key,
            database_url,
            port,
            log_file,
            excluded_room_ids,
        })
    }
}

fn parse_id_list(s: &str) -> Vec<i64> {
    s.split(',')
        .filter_map(|part| part.trim().parse().ok())
        .collect()
}
