//! `/時報 OK` / `/時報 NO`: per-room opt in/out of the hourly time report.

use async_trait::async_trait;
use chatwork_client::markup;
use tracing::error;
use yuzubot_core::{Handler, HandlerResponse, MessageEvent, Result};
use yuzubot_storage::TimeReportRepository;

pub struct TimeReportHandler {
    repo: TimeReportRepository,
}

impl TimeReportHandler {
    pub fn new(repo: TimeReportRepository) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl Handler for TimeReportHandler {
    async fn handle(&self, event: &MessageEvent) -> Result<HandlerResponse> {
        let room_id = event.room.room_id;
        let outcome = match markup::strip_to_tags(&event.body).as_str() {
            "/時報 OK" => self.repo.enable(room_id).await.map(|inserted| {
                if inserted {
                    "この部屋で時報を開始します。"
                } else {
                    "この部屋はすでに時報設定がOKになっています。"
                }
            }),
            "/時報 NO" => self.repo.disable(room_id).await.map(|removed| {
                if removed {
                    "この部屋での時報を停止します。"
                } else {
                    "この部屋はすでに時報設定がNOになっています。"
                }
            }),
            _ => return Ok(HandlerResponse::Continue),
        };

        match outcome {
            Ok(reply) => Ok(HandlerResponse::Reply(reply.to_string())),
            Err(e) => {
                error!(error = %e, room_id, "time report toggle failed");
                Ok(HandlerResponse::Reply(
                    "時報設定の更新中にエラーが発生しました。".to_string(),
                ))
            }
        }
    }
}
