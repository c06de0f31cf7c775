//! Statistics commands: snapshot capture and the growth leaderboards.

use std::sync::Arc;

use async_trait::async_trait;
use chatwork_client::markup;
use tracing::error;
use yuzubot_core::{Handler, HandlerResponse, MessageEvent, Result};

use crate::ranking::{Leaderboard, RankingEngine, RankingMetric};

pub struct StatsHandler {
    engine: Arc<RankingEngine>,
}

impl StatsHandler {
    pub fn new(engine: Arc<RankingEngine>) -> Self {
        Self { engine }
    }

    async fn capture(&self) -> HandlerResponse {
        match self.engine.capture().await {
            Ok(()) => HandlerResponse::Reply("統計を開始しました！".to_string()),
            Err(e) => {
                error!(error = %e, "snapshot capture failed");
                HandlerResponse::Reply("統計データの保存中にエラーが発生しました。".to_string())
            }
        }
    }

    async fn leaderboard(&self, metric: RankingMetric, limit: usize) -> HandlerResponse {
        match self.engine.leaderboard(metric, limit).await {
            Ok(Leaderboard::Ready(text)) => HandlerResponse::Reply(text),
            Ok(Leaderboard::NoSnapshot) => HandlerResponse::Reply(
                "統計データがまだありません。/stat で統計を開始してください。".to_string(),
            ),
            Ok(Leaderboard::NoGrowth) => HandlerResponse::Reply(format!(
                "前回の統計からの{}増加数が0のため、ランキングを生成できませんでした。",
                metric.label()
            )),
            Err(e) => {
                error!(error = %e, ?metric, "leaderboard computation failed");
                HandlerResponse::Reply("ランキングデータの取得に失敗しました。".to_string())
            }
        }
    }
}

#[async_trait]
impl Handler for StatsHandler {
    async fn handle(&self, event: &MessageEvent) -> Result<HandlerResponse> {
        let response = match markup::strip_to_tags(&event.body).as_str() {
            "/stat" | "/saving" => self.capture().await,
            "/top" | "/topneo" => self.leaderboard(RankingMetric::Message, 8).await,
            "/topneohack" => self.leaderboard(RankingMetric::Message, 30).await,
            "/topfile" => self.leaderboard(RankingMetric::File, 8).await,
            _ => HandlerResponse::Continue,
        };
        Ok(response)
    }
}
