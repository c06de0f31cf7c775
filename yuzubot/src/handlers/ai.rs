//! `/ai <質問>`: single-turn Gemini call, reply relayed as plain text.

use async_trait::async_trait;
use chatwork_client::markup;
use gemini_client::{sanitize_reply, GeminiClient};
use tracing::error;
use yuzubot_core::{Handler, HandlerResponse, MessageEvent, Result};

/// Fixed preamble asking for a short plain-text answer the chat client can
/// render as-is.
pub const SYSTEM_PREAMBLE: &str = "あなたはトークルーム「ゆずの部屋」のボットのゆずbotです。\
以下のメッセージに対して200字以下、markdown形式を使用しないで返答して下さい:";

pub struct AiHandler {
    client: Option<GeminiClient>,
}

impl AiHandler {
    /// `None` disables the command (no API key configured).
    pub fn new(client: Option<GeminiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Handler for AiHandler {
    async fn handle(&self, event: &MessageEvent) -> Result<HandlerResponse> {
        let text = markup::strip_to_tags(&event.body);
        if text != "/ai" && !text.starts_with("/ai ") {
            return Ok(HandlerResponse::Continue);
        }

        let query = text.trim_start_matches("/ai").trim();
        if query.is_empty() {
            return Ok(HandlerResponse::Reply(
                "質問を書いてね。例: /ai 今日の天気は？".to_string(),
            ));
        }

        let Some(client) = &self.client else {
            return Ok(HandlerResponse::Reply(
                "AI機能は現在利用できません。".to_string(),
            ));
        };

        match client.generate(&format!("{SYSTEM_PREAMBLE}{query}")).await {
            Ok(answer) => Ok(HandlerResponse::Reply(format!(
                "ゆずbotです。\n{}",
                sanitize_reply(&answer)
            ))),
            Err(e) => {
                error!(error = %e, account_id = event.sender.account_id, "AI call failed");
                Ok(HandlerResponse::Reply("エラーが発生しました。".to_string()))
            }
        }
    }
}
