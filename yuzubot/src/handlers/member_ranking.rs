//! `/rmr <room_id>`: same-day per-member comment ranking of a room, from
//! the running message counter (not a snapshot diff).

use async_trait::async_trait;
use chatwork_client::{markup, ChatworkClient};
use tracing::error;
use yuzubot_core::{Handler, HandlerResponse, MessageEvent, Result};
use yuzubot_storage::{MemberCount, MessageCountRepository};

use crate::jst;

pub struct MemberRankingHandler {
    counts: MessageCountRepository,
    client: ChatworkClient,
}

impl MemberRankingHandler {
    pub fn new(counts: MessageCountRepository, client: ChatworkClient) -> Self {
        Self { counts, client }
    }
}

fn render_member_ranking(room_name: &str, ranking: &[MemberCount]) -> String {
    let mut total = 0;
    let mut out = format!("[info][title]{room_name}の本日のコメント数ランキング[/title]\n");
    for (i, row) in ranking.iter().enumerate() {
        out.push_str(&format!(
            "{}位 [piconname:{}] - {} コメント\n",
            i + 1,
            row.account_id,
            row.count
        ));
        total += row.count;
    }
    out.push_str(&format!("[hr]合計コメント数: {total} 件\n[/info]"));
    out
}

#[async_trait]
impl Handler for MemberRankingHandler {
    async fn handle(&self, event: &MessageEvent) -> Result<HandlerResponse> {
        let text = markup::strip_to_tags(&event.body);
        if text != "/rmr" && !text.starts_with("/rmr ") {
            return Ok(HandlerResponse::Continue);
        }

        let Some(target_room) = text
            .split_whitespace()
            .nth(1)
            .and_then(|arg| arg.parse::<i64>().ok())
        else {
            return Ok(HandlerResponse::Reply(
                "ルームIDを確認してください。使い方: /rmr ルームID".to_string(),
            ));
        };

        let ranking = match self.counts.top_for_day(target_room, &jst::today()).await {
            Ok(ranking) => ranking,
            Err(e) => {
                error!(error = %e, target_room, "member ranking query failed");
                return Ok(HandlerResponse::Reply(format!(
                    "ランキングの取得に失敗しました。ルームID {target_room} が正しいか確認してください。"
                )));
            }
        };
        if ranking.is_empty() {
            return Ok(HandlerResponse::Reply(
                "本日のランキングはまだありません。".to_string(),
            ));
        }

        let room_name = match self.client.room_info(target_room).await {
            Ok(info) => info.name,
            Err(e) => {
                error!(error = %e, target_room, "room info fetch failed");
                return Ok(HandlerResponse::Reply(format!(
                    "ランキングの取得に失敗しました。ルームID {target_room} が正しいか確認してください。"
                )));
            }
        };

        Ok(HandlerResponse::Reply(render_member_ranking(
            &room_name, &ranking,
        )))
    }
}
