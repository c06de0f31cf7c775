//! Consumes bodies that carry the bot's own markup or rendered blocks, so
//! its replies and `[info]` posts never loop back through the commands or
//! the message counter. Runs after the delete handler, which legitimately
//! matches reply markup addressed to the bot.

use async_trait::async_trait;
use chatwork_client::markup;
use tracing::debug;
use yuzubot_core::{Handler, HandlerResponse, MessageEvent, Result};

pub struct BotMarkupFilter {
    bot_account_id: i64,
}

impl BotMarkupFilter {
    pub fn new(bot_account_id: i64) -> Self {
        Self { bot_account_id }
    }
}

#[async_trait]
impl Handler for BotMarkupFilter {
    async fn handle(&self, event: &MessageEvent) -> Result<HandlerResponse> {
        if markup::starts_with_bot_markup(&event.body, self.bot_account_id) {
            debug!(
                account_id = event.sender.account_id,
                "markup-prefixed body filtered"
            );
            return Ok(HandlerResponse::Stop);
        }
        Ok(HandlerResponse::Continue)
    }
}
