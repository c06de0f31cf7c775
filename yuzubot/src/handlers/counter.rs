//! Fallback: ordinary messages feed the daily per-member counter. Runs
//! last; anything that looks like a command but matched no handler is a
//! no-op instead of being counted.

use async_trait::async_trait;
use chatwork_client::markup;
use tracing::{debug, error};
use yuzubot_core::{Handler, HandlerResponse, MessageEvent, Result};
use yuzubot_storage::MessageCountRepository;

use crate::jst;

pub struct MessageCountHandler {
    counts: MessageCountRepository,
}

impl MessageCountHandler {
    pub fn new(counts: MessageCountRepository) -> Self {
        Self { counts }
    }
}

#[async_trait]
impl Handler for MessageCountHandler {
    async fn handle(&self, event: &MessageEvent) -> Result<HandlerResponse> {
        let text = markup::strip_to_tags(&event.body);
        if text.starts_with('/') {
            debug!(command = %text, "unrecognized command, not counted");
            return Ok(HandlerResponse::Stop);
        }

        if let Err(e) = self
            .counts
            .increment(event.room.room_id, event.sender.account_id, &jst::today())
            .await
        {
            // Counting is background bookkeeping; never bubble into a reply.
            error!(error = %e, room_id = event.room.room_id, "message count update failed");
        }
        Ok(HandlerResponse::Stop)
    }
}
