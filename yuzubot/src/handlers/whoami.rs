//! `/whoami`: the sender's own name, id, and role from the member list.

use async_trait::async_trait;
use chatwork_client::{markup, ChatworkClient};
use tracing::error;
use yuzubot_core::{Handler, HandlerResponse, MessageEvent, Result};

pub struct WhoAmIHandler {
    client: ChatworkClient,
}

impl WhoAmIHandler {
    pub fn new(client: ChatworkClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Handler for WhoAmIHandler {
    async fn handle(&self, event: &MessageEvent) -> Result<HandlerResponse> {
        if markup::strip_to_tags(&event.body) != "/whoami" {
            return Ok(HandlerResponse::Continue);
        }

        let members = match self.client.room_members(event.room.room_id).await {
            Ok(members) => members,
            Err(e) => {
                error!(error = %e, room_id = event.room.room_id, "member fetch failed");
                return Ok(HandlerResponse::Reply(
                    "メンバー情報の取得中にエラーが発生しました。".to_string(),
                ));
            }
        };

        match members
            .iter()
            .find(|m| m.account_id == event.sender.account_id)
        {
            Some(member) => Ok(HandlerResponse::Reply(format!(
                "[info][title]送信者情報[/title]\n名前: {}\nアカウントID: {}\n権限: {}\n[/info]",
                member.name,
                member.account_id,
                member.role.as_str()
            ))),
            None => Ok(HandlerResponse::Reply(
                "送信者情報が見つかりませんでした。".to_string(),
            )),
        }
    }
}
