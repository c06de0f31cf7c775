//! おみくじ: one fortune draw per sender per day.

use async_trait::async_trait;
use chatwork_client::markup;
use rand::seq::IndexedRandom;
use tracing::error;
use yuzubot_core::{Handler, HandlerResponse, MessageEvent, Result};
use yuzubot_storage::FortuneRepository;

use crate::jst;

pub const FORTUNES: &[&str] = &["大吉", "吉", "中吉", "小吉", "末吉", "凶", "大凶"];

pub struct FortuneHandler {
    repo: FortuneRepository,
}

impl FortuneHandler {
    pub fn new(repo: FortuneRepository) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl Handler for FortuneHandler {
    async fn handle(&self, event: &MessageEvent) -> Result<HandlerResponse> {
        if markup::strip_to_tags(&event.body) != "おみくじ" {
            return Ok(HandlerResponse::Continue);
        }

        let day = jst::today();
        let fortune = FORTUNES
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or("吉");

        match self
            .repo
            .try_draw(event.sender.account_id, &day, fortune)
            .await
        {
            Ok(true) => Ok(HandlerResponse::Reply(format!(
                "本日のおみくじの結果は「{fortune}」です。"
            ))),
            Ok(false) => Ok(HandlerResponse::Reply(
                "本日のおみくじは既に引きました。明日また引けます。".to_string(),
            )),
            Err(e) => {
                error!(error = %e, account_id = event.sender.account_id, "fortune draw failed");
                Ok(HandlerResponse::Reply(
                    "おみくじの履歴保存中にエラーが発生しました。".to_string(),
                ))
            }
        }
    }
}
