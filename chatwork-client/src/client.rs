//! Chatwork REST API v2 client.
//!
//! Thin request/response wrapper over reqwest: token header, form-encoded
//! writes, JSON reads. Non-2xx responses surface as
//! [`ClientError::Status`] with the response body attached.

use tracing::{info, instrument};

use crate::error::{ClientError, Result};
use crate::types::{RoleAssignment, RoomMember, RoomSummary};

pub const API_BASE: &str = "https://api.chatwork.com/v2";

#[derive(Clone)]
pub struct ChatworkClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl ChatworkClient {
    /// Creates a client against the production API.
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(token, API_BASE)
    }

    /// Creates a client against a custom base URL.
    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    /// Posts a message body to a room.
    #[instrument(skip(self, body))]
    pub async fn send_message(&self, room_id: i64, body: &str) -> Result<()> {
        let url = format!("{}/rooms/{}/messages", self.base_url, room_id);
        let response = self
            .http
            .post(&url)
            .header("X-ChatWorkToken", &self.token)
            .form(&[("body", body)])
            .send()
            .await?;
        Self::check(response).await?;
        info!(room_id, "message sent");
        Ok(())
    }

    /// Deletes a single message by id.
    #[instrument(skip(self))]
    pub async fn delete_message(&self, room_id: i64, message_id: &str) -> Result<()> {
        let url = format!("{}/rooms/{}/messages/{}", self.base_url, room_id, message_id);
        let response = self
            .http
            .delete(&url)
            .header("X-ChatWorkToken", &self.token)
            .send()
            .await?;
        Self::check(response).await?;
        info!(room_id, message_id, "message deleted");
        Ok(())
    }

    /// Lists a room's members with their roles.
    #[instrument(skip(self))]
    pub async fn room_members(&self, room_id: i64) -> Result<Vec<RoomMember>> {
        let url = format!("{}/rooms/{}/members", self.base_url, room_id);
        let response = self
            .http
            .get(&url)
            .header("X-ChatWorkToken", &self.token)
            .send()
            .await?;
        let members = Self::check(response).await?.json().await?;
        Ok(members)
    }

    /// Replaces a room's role sets. The API takes the full admin/member/
    /// readonly id lists on every call.
    #[instrument(skip(self, assignment))]
    pub async fn update_member_roles(
        &self,
        room_id: i64,
        assignment: &RoleAssignment,
    ) -> Result<()> {
        let url = format!("{}/rooms/{}/members", self.base_url, room_id);
        let response = self
            .http
            .put(&url)
            .header("X-ChatWorkToken", &self.token)
            .form(&[
                ("members_admin_ids", join_ids(&assignment.admin_ids)),
                ("members_member_ids", join_ids(&assignment.member_ids)),
                ("members_readonly_ids", join_ids(&assignment.readonly_ids)),
            ])
            .send()
            .await?;
        Self::check(response).await?;
        info!(room_id, "member roles updated");
        Ok(())
    }

    /// Lists every room the bot account participates in, with counters.
    #[instrument(skip(self))]
    pub async fn room_list(&self) -> Result<Vec<RoomSummary>> {
        let url = format!("{}/rooms", self.base_url);
        let response = self
            .http
            .get(&url)
            .header("X-ChatWorkToken", &self.token)
            .send()
            .await?;
        let rooms = Self::check(response).await?.json().await?;
        Ok(rooms)
    }

    /// Fetches a single room's metadata and counters.
    #[instrument(skip(self))]
    pub async fn room_info(&self, room_id: i64) -> Result<RoomSummary> {
        let url = format!("{}/rooms/{}", self.base_url, room_id);
        let response = self
            .http
            .get(&url)
            .header("X-ChatWorkToken", &self.token)
            .send()
            .await?;
        let room = Self::check(response).await?.json().await?;
        Ok(room)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ClientError::Status { status, body })
    }
}

fn join_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
