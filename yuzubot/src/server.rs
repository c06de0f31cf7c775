//! Axum webhook server: one POST endpoint for Chatwork events plus a
//! liveness GET used by the hosting platform's keepalive pinger.
//!
//! Each webhook call is processed to completion (chain run, reply sent)
//! before the 200 goes back, so handler logic never runs concurrently for
//! the same request.

use std::net::SocketAddr;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chatwork_client::{markup, ChatworkClient};
use chrono::Utc;
use serde::Deserialize;
use tracing::{error, info, warn};
use yuzubot_core::{HandlerChain, HandlerResponse, MessageEvent, Room, Sender};

#[derive(Clone)]
pub struct AppState {
    pub chain: HandlerChain,
    pub client: ChatworkClient,
    pub bot_account_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub webhook_event_type: Option<String>,
    #[serde(default)]
    pub webhook_event: Option<WebhookEvent>,
}

/// Chatwork sends `account_id` on message events and `from_account_id` on
/// mention events; both land in the same field.
#[derive(Debug, Deserialize)]
pub struct WebhookEvent {
    #[serde(default, alias = "from_account_id")]
    pub account_id: Option<i64>,
    #[serde(default)]
    pub room_id: Option<i64>,
    #[serde(default)]
    pub message_id: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

/// Outcome of payload validation.
#[derive(Debug, PartialEq, Eq)]
enum Inbound {
    Event(MessageEvent),
    /// Bot's own message or empty body; acknowledged without processing.
    Ignored,
    /// Required fields missing; client error, no processing.
    Malformed,
}

fn classify(payload: WebhookPayload, bot_account_id: i64) -> Inbound {
    let Some(event) = payload.webhook_event else {
        return Inbound::Malformed;
    };
    let (Some(account_id), Some(room_id), Some(message_id)) =
        (event.account_id, event.room_id, event.message_id)
    else {
        return Inbound::Malformed;
    };

    if account_id == bot_account_id {
        return Inbound::Ignored;
    }

    let body = event.body.unwrap_or_default();
    if body.trim().is_empty() {
        return Inbound::Ignored;
    }

    Inbound::Event(MessageEvent {
        message_id,
        sender: Sender { account_id },
        room: Room { room_id },
        body,
        received_at: Utc::now(),
    })
}

async fn webhook(
    State(state): State<AppState>,
    Json(payload): Json<WebhookPayload>,
) -> StatusCode {
    let event = match classify(payload, state.bot_account_id) {
        Inbound::Malformed => {
            warn!("webhook payload missing required fields");
            return StatusCode::BAD_REQUEST;
        }
        Inbound::Ignored => return StatusCode::OK,
        Inbound::Event(event) => event,
    };

    info!(
        room_id = event.room.room_id,
        account_id = event.sender.account_id,
        message_id = %event.message_id,
        "webhook event received"
    );

    match state.chain.handle(&event).await {
        Ok(HandlerResponse::Reply(text)) => {
            let reply = markup::reply_to(
                event.sender.account_id,
                event.room.room_id,
                &event.message_id,
                &text,
            );
            if let Err(e) = state.client.send_message(event.room.room_id, &reply).await {
                error!(error = %e, room_id = event.room.room_id, "failed to send reply");
            }
        }
        Ok(HandlerResponse::Stop) | Ok(HandlerResponse::Continue) => {}
        Err(e) => {
            error!(error = %e, room_id = event.room.room_id, "handler chain failed");
            let reply = markup::reply_to(
                event.sender.account_id,
                event.room.room_id,
                &event.message_id,
                "ごめん。処理中にエラーが発生したみたい(´・ω・｀)",
            );
            if let Err(e) = state.client.send_message(event.room.room_id, &reply).await {
                error!(error = %e, room_id = event.room.room_id, "failed to send apology");
            }
        }
    }

    StatusCode::OK
}

async fn liveness() -> &'static str {
    "Webhook is running"
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/webhook", get(liveness).post(webhook))
        .with_state(state)
}

/// Binds and serves until shutdown.
pub async fn serve(state: AppState, port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "webhook server listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(json: &str) -> WebhookPayload {
        serde_json::from_str(json).expect("payload should deserialize")
    }

    #[test]
    fn message_created_event_builds_a_message_event() {
        let p = payload(
            r#"{
                "webhook_event_type": "message_created",
                "webhook_event": {
                    "account_id": 123,
                    "room_id": 456,
                    "message_id": "789",
                    "body": "おみくじ"
                }
            }"#,
        );

        match classify(p, 999) {
            Inbound::Event(event) => {
                assert_eq!(event.sender.account_id, 123);
                assert_eq!(event.room.room_id, 456);
                assert_eq!(event.message_id, "789");
                assert_eq!(event.body, "おみくじ");
            }
            other => panic!("expected Event, got {:?}", other),
        }
    }

    #[test]
    fn mention_event_field_alias_is_accepted() {
        let p = payload(
            r#"{
                "webhook_event_type": "mention_to_me",
                "webhook_event": {
                    "from_account_id": 123,
                    "room_id": 456,
                    "message_id": "789",
                    "body": "[To:999]/test"
                }
            }"#,
        );

        assert!(matches!(classify(p, 999), Inbound::Event(_)));
    }

    #[test]
    fn missing_fields_are_malformed() {
        let p = payload(r#"{"webhook_event": {"room_id": 456}}"#);
        assert_eq!(classify(p, 999), Inbound::Malformed);

        let p = payload(r#"{"webhook_event_type": "message_created"}"#);
        assert_eq!(classify(p, 999), Inbound::Malformed);
    }

    #[test]
    fn bot_own_messages_are_ignored() {
        let p = payload(
            r#"{
                "webhook_event": {
                    "account_id": 999,
                    "room_id": 456,
                    "message_id": "789",
                    "body": "テスト成功です"
                }
            }"#,
        );

        assert_eq!(classify(p, 999), Inbound::Ignored);
    }

    #[test]
    fn blank_bodies_are_ignored() {
        let p = payload(
            r#"{
                "webhook_event": {
                    "account_id": 123,
                    "room_id": 456,
                    "message_id": "789",
                    "body": "   "
                }
            }"#,
        );

        assert_eq!(classify(p, 999), Inbound::Ignored);
    }
}
