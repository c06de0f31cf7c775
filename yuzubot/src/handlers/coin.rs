//! コイントス: coin flip.

use async_trait::async_trait;
use chatwork_client::markup;
use yuzubot_core::{Handler, HandlerResponse, MessageEvent, Result};

pub struct CoinFlipHandler;

#[async_trait]
impl Handler for CoinFlipHandler {
    async fn handle(&self, event: &MessageEvent) -> Result<HandlerResponse> {
        if markup::strip_to_tags(&event.body) != "コイントス" {
            return Ok(HandlerResponse::Continue);
        }
        let side = if rand::random::<bool>() { "表" } else { "裏" };
        Ok(HandlerResponse::Reply(format!(
            "コイントスの結果は「{side}」です！"
        )))
    }
}
