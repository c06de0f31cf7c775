//! `/roominfo [id]`: one room's metadata, or the full joined-room listing.

use async_trait::async_trait;
use chatwork_client::{markup, ChatworkClient};
use tracing::error;
use yuzubot_core::{Handler, HandlerResponse, MessageEvent, Result};

pub struct RoomInfoHandler {
    client: ChatworkClient,
}

impl RoomInfoHandler {
    pub fn new(client: ChatworkClient) -> Self {
        Self { client }
    }

    async fn single_room(&self, room_id: i64) -> Option<String> {
        let info = self.client.room_info(room_id).await.ok()?;
        let member_count = self.client.room_members(room_id).await.ok()?.len();
        // Thumbnail path carries an rsz. prefix segment; the original image
        // sits at the same URL without it.
        let icon = info.icon_path.replace("rsz.", "");
        Some(format!(
            "[info][title]{}[/title]メンバー数: {}\nメッセージ数: {}\nファイル数: {}\nタスク数: {}\nアイコンURL: {}[/info]",
            info.name, member_count, info.message_num, info.file_num, info.task_num, icon
        ))
    }

    async fn all_rooms(&self) -> Option<String> {
        let rooms = self.client.room_list().await.ok()?;
        let mut out = String::from("[info][title]参加中の全ルーム情報[/title]\n");
        for (i, room) in rooms.iter().enumerate() {
            out.push_str(&format!(
                "{}. {}\n   ID: {}\n   メッセージ数: {}\n   ファイル数: {}\n   タスク数: {}\n\n",
                i + 1,
                room.name,
                room.room_id,
                room.message_num,
                room.file_num,
                room.task_num
            ));
        }
        out.push_str("[/info]");
        Some(out)
    }
}

#[async_trait]
impl Handler for RoomInfoHandler {
    async fn handle(&self, event: &MessageEvent) -> Result<HandlerResponse> {
        let text = markup::strip_to_tags(&event.body);
        if text != "/roominfo" && !text.starts_with("/roominfo ") {
            return Ok(HandlerResponse::Continue);
        }

        let reply = match text.split_whitespace().nth(1) {
            Some(arg) => match arg.parse::<i64>() {
                Ok(room_id) => self.single_room(room_id).await,
                Err(_) => {
                    return Ok(HandlerResponse::Reply(
                        "ルームIDが正しくありません。使い方: /roominfo ルームID".to_string(),
                    ))
                }
            },
            None => self.all_rooms().await,
        };

        match reply {
            Some(text) => Ok(HandlerResponse::Reply(text)),
            None => {
                error!(room_id = event.room.room_id, "room info fetch failed");
                Ok(HandlerResponse::Reply(
                    "ごめん。ルーム情報の取得に失敗したみたい(´・ω・｀)".to_string(),
                ))
            }
        }
    }
}
