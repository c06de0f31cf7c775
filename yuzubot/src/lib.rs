//! # yuzubot
//!
//! Chatwork bot binary crate: webhook server, sliding-window spam
//! moderation, ranking snapshots/diffs, and the command handlers.

pub mod config;
pub mod handlers;
pub mod jst;
pub mod moderation;
pub mod ranking;
pub mod server;
pub mod tasks;

use std::sync::Arc;

use anyhow::{Context, Result};
use chatwork_client::ChatworkClient;
use gemini_client::GeminiClient;
use tracing::info;
use yuzubot_core::HandlerChain;
use yuzubot_storage::{
    FortuneRepository, MessageCountRepository, SnapshotRepository, SqlitePoolManager,
    TimeReportRepository,
};

pub use config::BotConfig;

use handlers::{
    AiHandler, BotMarkupFilter, CoinFlipHandler, DeleteMessageHandler, FortuneHandler,
    MemberRankingHandler, MessageCountHandler, PingHandler, RoomInfoHandler, StatsHandler,
    TimeReportHandler, WhoAmIHandler,
};
use moderation::{SenderHistory, SlidingWindowModerator};
use ranking::RankingEngine;
use server::AppState;

/// Wires repositories, clients, the handler chain, and the periodic tasks,
/// then serves the webhook endpoint until shutdown.
pub async fn run_bot(config: BotConfig) -> Result<()> {
    let pool = SqlitePoolManager::new(&config.database_url)
        .await
        .context("Failed to open database")?;

    let fortunes = FortuneRepository::new(pool.clone()).await?;
    let snapshots = SnapshotRepository::new(pool.clone()).await?;
    let counts = MessageCountRepository::new(pool.clone()).await?;
    let time_report = TimeReportRepository::new(pool.clone()).await?;

    let client = ChatworkClient::new(config.chatwork_api_token.clone());
    let gemini = config.gemini_api_key.clone().map(GeminiClient::new);

    let history = Arc::new(SenderHistory::new());
    let moderator =
        SlidingWindowModerator::new(client.clone(), history.clone(), config.bot_account_id);

    let engine = Arc::new(RankingEngine::new(
        client.clone(),
        snapshots,
        config.excluded_room_ids.clone(),
    ));

    let chain = HandlerChain::new()
        .add_middleware(Arc::new(moderator))
        .add_handler(Arc::new(PingHandler))
        .add_handler(Arc::new(DeleteMessageHandler::new(
            client.clone(),
            config.bot_account_id,
        )))
        .add_handler(Arc::new(BotMarkupFilter::new(config.bot_account_id)))
        .add_handler(Arc::new(FortuneHandler::new(fortunes)))
        .add_handler(Arc::new(CoinFlipHandler))
        .add_handler(Arc::new(WhoAmIHandler::new(client.clone())))
        .add_handler(Arc::new(RoomInfoHandler::new(client.clone())))
        .add_handler(Arc::new(AiHandler::new(gemini)))
        .add_handler(Arc::new(StatsHandler::new(engine.clone())))
        .add_handler(Arc::new(MemberRankingHandler::new(
            counts.clone(),
            client.clone(),
        )))
        .add_handler(Arc::new(TimeReportHandler::new(time_report.clone())))
        .add_handler(Arc::new(MessageCountHandler::new(counts)));

    tasks::spawn_history_sweeper(history);
    tasks::spawn_time_report(client.clone(), time_report);

    info!(port = config.port, "starting webhook server");

    let state = AppState {
        chain,
        client,
        bot_account_id: config.bot_account_id,
    };
    server::serve(state, config.port).await
}
