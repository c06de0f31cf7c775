//! Admin-only message deletion. Triggered by replying to one of the bot's
//! messages with a body ending in `削除`; every referenced message id in
//! the reply markup is deleted. The admin check runs before anything is
//! touched.

use async_trait::async_trait;
use chatwork_client::{is_admin, markup, ChatworkClient};
use tracing::{error, info};
use yuzubot_core::{Handler, HandlerResponse, MessageEvent, Result};

pub struct DeleteMessageHandler {
    client: ChatworkClient,
    bot_account_id: i64,
}

impl DeleteMessageHandler {
    pub fn new(client: ChatworkClient, bot_account_id: i64) -> Self {
        Self {
            client,
            bot_account_id,
        }
    }
}

#[async_trait]
impl Handler for DeleteMessageHandler {
    async fn handle(&self, event: &MessageEvent) -> Result<HandlerResponse> {
        let body = &event.body;
        if !(markup::is_reply_to(body, self.bot_account_id) && body.trim().ends_with("削除")) {
            return Ok(HandlerResponse::Continue);
        }

        let members = match self.client.room_members(event.room.room_id).await {
            Ok(members) => members,
            Err(e) => {
                error!(error = %e, room_id = event.room.room_id, "member fetch failed");
                return Ok(HandlerResponse::Reply(
                    "メンバー情報の取得に失敗しました。".to_string(),
                ));
            }
        };
        if !is_admin(&members, event.sender.account_id) {
            return Ok(HandlerResponse::Reply(
                "このコマンドは管理者のみ実行できます。".to_string(),
            ));
        }

        let refs = markup::parse_reply_refs(body);
        if refs.is_empty() {
            return Ok(HandlerResponse::Reply(
                "削除対象のメッセージIDが見つかりませんでした。".to_string(),
            ));
        }

        let mut deleted = Vec::new();
        for reference in &refs {
            match self
                .client
                .delete_message(reference.room_id, &reference.message_id)
                .await
            {
                Ok(()) => deleted.push(reference.message_id.clone()),
                Err(e) => {
                    error!(
                        error = %e,
                        message_id = %reference.message_id,
                        "message deletion failed"
                    );
                }
            }
        }

        if deleted.is_empty() {
            return Ok(HandlerResponse::Reply(
                "メッセージの削除に失敗しました。".to_string(),
            ));
        }

        info!(
            room_id = event.room.room_id,
            count = deleted.len(),
            "messages deleted by admin command"
        );
        Ok(HandlerResponse::Reply(format!(
            "メッセージID {} を削除しました。",
            deleted.join(", ")
        )))
    }
}
