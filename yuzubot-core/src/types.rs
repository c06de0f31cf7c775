//! Core types: sender, room, inbound message event, and the handler traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Message author identity. Chatwork webhooks only carry the account id;
/// name and role are resolved through the members API when needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sender {
    pub account_id: i64,
}

/// A chat room, identified by its numeric Chatwork room id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub room_id: i64,
}

/// One inbound webhook message. Ephemeral; built per webhook call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEvent {
    pub message_id: String,
    pub sender: Sender,
    pub room: Room,
    pub body: String,
    pub received_at: DateTime<Utc>,
}

/// Handler result for the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Not this handler's message; the chain tries the next one.
    Continue,
    /// Consumed; nothing to send back.
    Stop,
    /// Consumed; the runner posts this text as a reply to the event.
    Reply(String),
}

/// Runs before any handler sees the event. Returning `false` aborts the
/// chain; the event counts as fully handled by the middleware.
#[async_trait]
pub trait Middleware: Send + Sync {
    async fn before(&self, event: &MessageEvent) -> crate::error::Result<bool>;
}

/// A single command handler. Return [`HandlerResponse::Continue`] when the
/// message is not yours so the chain can keep going.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, event: &MessageEvent) -> crate::error::Result<HandlerResponse>;
}
