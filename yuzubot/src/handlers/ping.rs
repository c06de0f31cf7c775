//! `/test` liveness command.

use async_trait::async_trait;
use chatwork_client::markup;
use yuzubot_core::{Handler, HandlerResponse, MessageEvent, Result};

pub struct PingHandler;

#[async_trait]
impl Handler for PingHandler {
    async fn handle(&self, event: &MessageEvent) -> Result<HandlerResponse> {
        if markup::strip_to_tags(&event.body) != "/test" {
            return Ok(HandlerResponse::Continue);
        }
        Ok(HandlerResponse::Reply("テスト成功です".to_string()))
    }
}
